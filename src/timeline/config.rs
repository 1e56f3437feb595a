use serde::{Deserialize, Serialize};

use super::jurisdictions::{default_jurisdictions, RegulatoryOption};
use super::selection::{FilingStrategy, ReviewType};

/// Timeline calculator defaults.
///
/// Example YAML:
/// ```yaml
/// timeline:
///   strategy: sequential
///   default_review: priority
///   jurisdictions:
///     - { code: "US", name: "United States", agency: "FDA", standard_review: 10,
///         priority_review: 6, accelerated_review: 4, parallel_filing: true,
///         reference_required: false }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct TimelineConfig {
    /// Filing strategy used when the command line does not pick one
    #[serde(default)]
    pub strategy: Option<FilingStrategy>,

    /// Review track for countries given without an explicit `:review` suffix
    #[serde(default)]
    pub default_review: Option<ReviewType>,

    /// Replaces the built-in jurisdiction table entirely when set
    #[serde(default)]
    pub jurisdictions: Option<Vec<RegulatoryOption>>,
}

impl TimelineConfig {
    pub fn effective_strategy(&self) -> FilingStrategy {
        self.strategy.unwrap_or_default()
    }

    pub fn effective_review(&self) -> ReviewType {
        self.default_review.unwrap_or_default()
    }

    /// The jurisdiction table to schedule against.
    pub fn table(&self) -> Vec<RegulatoryOption> {
        match self.jurisdictions {
            Some(ref table) if !table.is_empty() => table.clone(),
            _ => default_jurisdictions(),
        }
    }
}
