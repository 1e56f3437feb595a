use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::types::MoleculeRecord;

const PREFIXES: &[&str] = &["ar", "bel", "cor", "dal", "eli", "fen", "gal", "ixa", "lor", "mav", "nor", "ozi", "ral", "sel", "tar", "vex", "zan"];
const STEMS: &[&str] = &["to", "ri", "ca", "mo", "ne", "si", "la", "ve", "du", "po"];

// Suffixes follow INN naming stems for each modality
const SUFFIXES: &[(&str, &str)] = &[
    ("mab", "Monoclonal antibody"),
    ("tinib", "Tyrosine kinase inhibitor"),
    ("gliflozin", "SGLT2 inhibitor"),
    ("glutide", "GLP-1 receptor agonist"),
    ("ciclib", "CDK4/6 inhibitor"),
    ("parib", "PARP inhibitor"),
    ("vir", "Antiviral"),
    ("sertib", "Serine/threonine kinase inhibitor"),
    ("tide", "Peptide"),
    ("gene", "Gene therapy"),
];

const COMPANIES: &[(&str, &str)] = &[
    ("Northwind Therapeutics", "fast"),
    ("Helix Biosciences", "average"),
    ("Meridian Pharma", "fast"),
    ("Cobalt Bio", "slow"),
    ("Aster Laboratories", "average"),
    ("Kestrel Medicines", "slow"),
    ("Lumen Oncology", "average"),
    ("Tidewater Pharmaceuticals", "fast"),
];

const AREAS: &[(&str, &[&str])] = &[
    ("Oncology", &["Non-small cell lung cancer", "Metastatic breast cancer", "Pancreatic cancer", "Glioblastoma", "Prostate cancer"]),
    ("Hematology", &["Multiple myeloma", "Sickle cell disease", "Hemophilia A"]),
    ("Immunology", &["Rheumatoid arthritis", "Ulcerative colitis", "Plaque psoriasis"]),
    ("Cardiovascular", &["Heart failure", "Hypertension", "Hypercholesterolemia"]),
    ("Metabolic", &["Type 2 diabetes", "Obesity", "NASH"]),
    ("Neurology", &["Alzheimer's disease", "Parkinson's disease", "Migraine", "ALS"]),
    ("Psychiatry", &["Major depressive disorder", "Schizophrenia"]),
    ("Infectious Disease", &["HIV", "Hepatitis B", "Complicated urinary tract infection"]),
    ("Respiratory", &["Asthma", "COPD", "Cystic fibrosis"]),
    ("Rare Disease", &["Duchenne muscular dystrophy", "Spinal muscular atrophy", "Fabry disease"]),
];

// Weighted towards early development, as real pipelines are
const PHASES: &[(&str, u32)] = &[
    ("Preclinical", 20),
    ("Phase I", 25),
    ("Phase II", 25),
    ("Phase III", 15),
    ("NDA/BLA", 6),
    ("Approved", 5),
    ("Discontinued", 4),
];

const FAILED_PROBABILITY: f64 = 0.05;

/// Generate a reproducible synthetic catalog.
///
/// The same `seed` and `count` always yield the same records, on every
/// platform and toolchain, since the ChaCha stream is fixed. Ids are
/// `SYN-0001`, `SYN-0002` and so on, so they are unique within a catalog.
pub fn generate_catalog(count: usize, seed: u64) -> Vec<MoleculeRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let records: Vec<MoleculeRecord> = (1..=count).map(|i| generate_record(&mut rng, i)).collect();
    tracing::debug!(count, seed, "generated synthetic catalog");
    records
}

fn generate_record(rng: &mut ChaCha8Rng, index: usize) -> MoleculeRecord {
    let (suffix, mechanism) = pick(rng, SUFFIXES);
    let name = capitalise(&format!("{}{}{}", pick(rng, PREFIXES), pick(rng, STEMS), suffix));
    let (company, track_record) = pick(rng, COMPANIES);
    let (area, indications) = pick(rng, AREAS);
    let indication = pick(rng, indications);
    let phase = weighted_phase(rng);

    let competitors = (0..rng.gen_range(0..=3))
        .map(|_| format!("{}{}", pick(rng, PREFIXES), pick(rng, SUFFIXES).0))
        .collect();

    let patent_expiry = NaiveDate::from_ymd_opt(
        rng.gen_range(2028..=2042),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28),
    );

    MoleculeRecord {
        id: format!("SYN-{:04}", index),
        name,
        company: company.to_string(),
        phase: phase.to_string(),
        indication: indication.to_string(),
        therapeutic_area: area.to_string(),
        failed: rng.gen_bool(FAILED_PROBABILITY),
        track_record: track_record.to_string(),
        mechanism: Some(mechanism.to_string()),
        competitors,
        patent_expiry,
    }
}

fn pick<T: Copy>(rng: &mut ChaCha8Rng, items: &[T]) -> T {
    // Every table above is non-empty
    *items.choose(rng).unwrap_or(&items[0])
}

fn weighted_phase(rng: &mut ChaCha8Rng) -> &'static str {
    let total: u32 = PHASES.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (phase, weight) in PHASES {
        if roll < *weight {
            return phase;
        }
        roll -= weight;
    }
    "Phase I"
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::storage::validate_catalog;
    use crate::scoring::Phase;

    #[test]
    fn test_same_seed_same_catalog() {
        assert_eq!(generate_catalog(25, 42), generate_catalog(25, 42));
    }

    #[test]
    fn test_seed_42_is_stable() {
        let records = generate_catalog(3, 42);
        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.id.as_str(), r.name.as_str(), r.phase.as_str(), r.therapeutic_area.as_str()))
            .collect();
        assert_eq!(
            summary,
            [
                ("SYN-0001", "Corpogliflozin", "Phase II", "Metabolic"),
                ("SYN-0002", "Mavsigliflozin", "Phase II", "Rare Disease"),
                ("SYN-0003", "Normotinib", "Phase I", "Psychiatry"),
            ]
        );

        let first = &records[0];
        assert_eq!(first.company, "Lumen Oncology");
        assert_eq!(first.indication, "Obesity");
        assert_eq!(first.track_record, "average");
        assert_eq!(first.competitors, ["fenglutide"]);
        assert_eq!(first.patent_expiry, NaiveDate::from_ymd_opt(2030, 10, 18));
        assert!(records.iter().all(|r| !r.failed));
        assert!(records[2].competitors.is_empty());
    }

    #[test]
    fn test_different_seed_different_catalog() {
        assert_ne!(generate_catalog(25, 1), generate_catalog(25, 2));
    }

    #[test]
    fn test_generated_catalog_is_valid() {
        let records = generate_catalog(200, 7);
        assert_eq!(records.len(), 200);
        assert!(validate_catalog(&records).is_ok());
        assert_eq!(records[0].id, "SYN-0001");
        assert_eq!(records[199].id, "SYN-0200");
    }

    #[test]
    fn test_generated_phases_are_recognised() {
        for record in generate_catalog(100, 3) {
            assert_ne!(record.attributes().phase, Phase::Unknown, "{}", record.phase);
            assert!(record.patent_expiry.is_some());
            assert!(record.competitors.len() <= 3);
        }
    }

    #[test]
    fn test_zero_count() {
        assert!(generate_catalog(0, 9).is_empty());
    }

    #[test]
    fn test_capitalise() {
        assert_eq!(capitalise("belmab"), "Belmab");
        assert_eq!(capitalise(""), "");
    }
}
