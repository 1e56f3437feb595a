use serde::Serialize;

use super::categories::{is_orphan_indication, mentions, IndicationRisk, MoleculeAttributes, TherapeuticArea};
use super::config::ScoringConfig;
use super::factors::Effect;
use super::market::{project_market, MarketProjection};
use super::tables;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Therapeutic area", "Track record"
    pub description: String, // e.g. "Oncology -> x0.85"
    pub target: String,      // sub-score the factor acted on
    pub before: f64,
    pub after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
}

/// Likelihood (0-100) of expedited regulatory designations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegulatoryPathway {
    pub breakthrough: f64,
    pub orphan: f64,
}

/// Probability and composite scores for one molecule. Every field is finite
/// and on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBundle {
    pub meeting_endpoints: f64,
    pub approval: f64,
    pub dropout_ranking: f64,
    pub next_phase: f64,
    pub regulatory_pathway: RegulatoryPathway,
    pub clinical: f64,
    pub economic: f64,
    pub access: f64,
    pub political: f64,
    pub overall: f64,
    pub breakdown: ScoreBreakdown,
}

/// Phase-derived sub-scores before composites are formed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SubScores {
    pub meeting_endpoints: f64,
    pub approval: f64,
    pub dropout_ranking: f64,
    pub next_phase: f64,
    pub pathway: RegulatoryPathway,
    pub factors: Vec<FactorContribution>,
}

/// Score a molecule. Total over its inputs: unknown categories resolve to
/// neutral defaults and nothing here can fail.
pub fn score_molecule(attrs: &MoleculeAttributes, config: &ScoringConfig) -> ScoreBundle {
    let markets = project_market("", attrs, config);
    score_with_markets(attrs, &markets, config)
}

/// Score a molecule against an already computed market projection, so
/// catalog assembly projects each molecule only once.
pub fn score_with_markets(
    attrs: &MoleculeAttributes,
    markets: &[MarketProjection],
    config: &ScoringConfig,
) -> ScoreBundle {
    let sub = sub_scores(attrs, config);

    let clinical = clamp_score((sub.meeting_endpoints + sub.approval) / 2.0);
    let economic = if markets.is_empty() {
        0.0
    } else {
        let mean_year1 = markets
            .iter()
            .map(|m| m.revenue_projection.year1)
            .sum::<f64>()
            / markets.len() as f64;
        clamp_score(mean_year1 / config.effective_revenue_ceiling() * 100.0)
    };
    let access = if markets.is_empty() {
        0.0
    } else {
        let mean_hta = markets
            .iter()
            .map(|m| m.market_access_strategy.hta)
            .sum::<f64>()
            / markets.len() as f64;
        clamp_score(mean_hta * 100.0)
    };
    let political = clamp_score((sub.pathway.breakthrough + sub.pathway.orphan) / 2.0);

    let overall = clamp_score(
        config
            .effective_weights()
            .combine([clinical, economic, access, political]),
    );

    ScoreBundle {
        meeting_endpoints: sub.meeting_endpoints,
        approval: sub.approval,
        dropout_ranking: sub.dropout_ranking,
        next_phase: sub.next_phase,
        regulatory_pathway: sub.pathway,
        clinical,
        economic,
        access,
        political,
        overall,
        breakdown: ScoreBreakdown {
            factors: sub.factors,
        },
    }
}

pub(crate) fn sub_scores(attrs: &MoleculeAttributes, config: &ScoringConfig) -> SubScores {
    if attrs.is_failed() {
        let band = tables::FAILED_BASE;
        return SubScores {
            meeting_endpoints: band.meeting_endpoints,
            approval: band.approval,
            dropout_ranking: band.dropout_ranking,
            next_phase: band.next_phase,
            pathway: RegulatoryPathway {
                breakthrough: tables::FAILED_DESIGNATION,
                orphan: tables::FAILED_DESIGNATION,
            },
            factors: vec![FactorContribution {
                label: "Failed".to_string(),
                description: format!("programme failed at {} -> terminal band", attrs.phase),
                target: "all".to_string(),
                before: tables::phase_base(attrs.phase).approval,
                after: band.approval,
            }],
        };
    }

    let base = tables::phase_base(attrs.phase);
    let risk = attrs.indication_risk();
    let mut factors = Vec::new();

    // Approval: area risk modifier, then configured area overrides.
    // Approved programmes keep their certainty.
    let mut approval = base.approval;
    let mut next_phase = base.next_phase;
    if !attrs.phase.is_terminal() {
        let modifier = tables::area_approval_modifier(attrs.therapeutic_area);
        if modifier != 1.0 {
            let before = approval;
            approval *= modifier;
            next_phase *= modifier;
            factors.push(FactorContribution {
                label: "Therapeutic area".to_string(),
                description: format!("{} -> x{}", attrs.therapeutic_area, modifier),
                target: "approval".to_string(),
                before,
                after: approval,
            });
        }
        for (name, effect) in area_overrides(attrs.therapeutic_area, config) {
            let before = approval;
            approval = effect.apply(approval);
            factors.push(FactorContribution {
                label: format!("Area: {}", name),
                description: format!("configured area '{}' -> {}", name, effect),
                target: "approval".to_string(),
                before,
                after: approval,
            });
        }
    }

    // Endpoint confidence: indication risk, then configured keyword overrides
    let mut meeting_endpoints = base.meeting_endpoints;
    let shift = tables::indication_endpoint_shift(risk);
    if shift != 0.0 {
        let before = meeting_endpoints;
        meeting_endpoints += shift;
        factors.push(FactorContribution {
            label: "Indication risk".to_string(),
            description: format!("{} risk -> {:+}", risk, shift),
            target: "meetingEndpoints".to_string(),
            before,
            after: meeting_endpoints,
        });
    }
    let indication = attrs.indication.to_lowercase();
    if let Some(ref overrides) = config.indications {
        for rule in overrides {
            if !mentions(&indication, &rule.keyword.trim().to_lowercase()) {
                continue;
            }
            if let Ok(effect) = Effect::parse(&rule.effect) {
                let before = meeting_endpoints;
                meeting_endpoints = effect.apply(meeting_endpoints);
                factors.push(FactorContribution {
                    label: format!("Indication: {}", rule.keyword),
                    description: format!("matched '{}' -> {}", rule.keyword, effect),
                    target: "meetingEndpoints".to_string(),
                    before,
                    after: meeting_endpoints,
                });
            }
        }
    }

    // Track record only moves the timeline-sensitive next-phase estimate
    if !attrs.phase.is_terminal() {
        let effect = config.track_record_effect(attrs.track_record);
        let before = next_phase;
        next_phase = effect.apply(next_phase);
        if next_phase != before {
            factors.push(FactorContribution {
                label: "Track record".to_string(),
                description: format!("{} sponsor -> {}", attrs.track_record, effect),
                target: "nextPhase".to_string(),
                before,
                after: next_phase,
            });
        }
    }

    let dropout_ranking = base.dropout_ranking + shift / 2.0;

    let maturity = tables::phase_maturity(attrs.phase);
    let mut breakthrough = tables::area_breakthrough_base(attrs.therapeutic_area);
    if risk == IndicationRisk::High {
        breakthrough += tables::HIGH_RISK_BREAKTHROUGH_BONUS;
    }
    breakthrough *= maturity;
    let orphan = if is_orphan_indication(&attrs.indication) {
        tables::ORPHAN_INDICATION_LIKELIHOOD
    } else {
        tables::area_orphan_base(attrs.therapeutic_area)
    };

    SubScores {
        meeting_endpoints: clamp_score(meeting_endpoints),
        approval: clamp_score(approval),
        dropout_ranking: clamp_score(dropout_ranking),
        next_phase: clamp_score(next_phase),
        pathway: RegulatoryPathway {
            breakthrough: clamp_score(breakthrough),
            orphan: clamp_score(orphan),
        },
        factors,
    }
}

/// Configured area effects matching `area`, skipping unparseable entries.
fn area_overrides(area: TherapeuticArea, config: &ScoringConfig) -> Vec<(String, Effect)> {
    config
        .areas
        .iter()
        .flatten()
        .filter(|rule| TherapeuticArea::parse(&rule.name) == area)
        .filter_map(|rule| {
            Effect::parse(&rule.effect)
                .ok()
                .map(|effect| (rule.name.clone(), effect))
        })
        .collect()
}

/// Replace non-finite values with 0 and clamp into 0-100.
pub(crate) fn clamp_score(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
