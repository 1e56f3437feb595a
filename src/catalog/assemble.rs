use std::cmp::Ordering;

use super::types::{MoleculeRecord, ScoredMolecule};
use crate::scoring::{project_market, score_with_markets, ScoringConfig, TherapeuticArea};

/// Score one record and attach its market projection.
pub fn score_record(record: MoleculeRecord, config: &ScoringConfig) -> ScoredMolecule {
    let attrs = record.attributes();
    let market_data = project_market(&record.name, &attrs, config);
    let scores = score_with_markets(&attrs, &market_data, config);
    ScoredMolecule {
        overall_score: scores.overall,
        record,
        scores,
        market_data,
    }
}

/// Score every record and order the catalog by overall score descending.
/// Ties are broken by id ascending so the order is stable across runs.
pub fn assemble_catalog(records: Vec<MoleculeRecord>, config: &ScoringConfig) -> Vec<ScoredMolecule> {
    let mut scored: Vec<ScoredMolecule> = records
        .into_iter()
        .map(|record| score_record(record, config))
        .collect();

    scored.sort_by(|a, b| {
        // Primary: score descending
        let score_cmp = b.overall_score.partial_cmp(&a.overall_score).unwrap_or(Ordering::Equal);
        if score_cmp != Ordering::Equal {
            return score_cmp;
        }
        // Tie-breaker: id ascending
        a.record.id.cmp(&b.record.id)
    });

    tracing::debug!(molecules = scored.len(), "assembled scored catalog");
    scored
}

/// Keep only molecules in the given therapeutic area
pub fn filter_by_area(molecules: Vec<ScoredMolecule>, area: TherapeuticArea) -> Vec<ScoredMolecule> {
    molecules
        .into_iter()
        .filter(|m| TherapeuticArea::parse(&m.record.therapeutic_area) == area)
        .collect()
}

/// Drop failed programmes
pub fn exclude_failed(molecules: Vec<ScoredMolecule>) -> Vec<ScoredMolecule> {
    molecules
        .into_iter()
        .filter(|m| !m.record.attributes().is_failed())
        .collect()
}

/// Case-insensitive lookup by record id.
pub fn find_molecule<'a>(molecules: &'a [ScoredMolecule], id: &str) -> Option<&'a ScoredMolecule> {
    let id = id.trim();
    molecules.iter().find(|m| m.record.id.eq_ignore_ascii_case(id))
}
