pub mod categories;
pub mod config;
pub mod factors;
pub mod engine;
pub mod market;
pub mod tables;
pub mod validation;

pub use categories::{IndicationRisk, MoleculeAttributes, Phase, TherapeuticArea, TrackRecord};
pub use config::*;
pub use factors::Effect;
pub use engine::{score_molecule, score_with_markets, FactorContribution, RegulatoryPathway, ScoreBreakdown, ScoreBundle};
pub use market::{lead_launch_years, project_market, MarketAccessStrategy, MarketProjection, RevenueProjection};
pub use validation::validate_scoring;
