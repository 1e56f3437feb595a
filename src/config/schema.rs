use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;
use crate::timeline::TimelineConfig;

/// Top-level config file.
///
/// Both sections are optional; a missing section uses built-in defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub timeline: Option<TimelineConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: Some(ScoringConfig::default()),
            timeline: Some(TimelineConfig::default()),
        }
    }
}

impl Config {
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn effective_timeline(&self) -> TimelineConfig {
        self.timeline.clone().unwrap_or_default()
    }
}
