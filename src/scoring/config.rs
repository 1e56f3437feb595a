use serde::{Deserialize, Serialize};

use super::categories::TrackRecord;
use super::factors::Effect;

pub const DEFAULT_REVENUE_CEILING: f64 = 150.0;
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;

/// Scoring rubric overrides.
///
/// Every field is optional; unset fields fall back to the built-in rubric.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   weights: { clinical: 0.4, economic: 0.25, access: 0.2, political: 0.15 }
///   revenue_ceiling: 150
///   discount_rate: 0.1
///   track_record: { fast: "x1.15", average: "x1", slow: "x0.85" }
///   areas:
///     - { name: "oncology", effect: "x0.9" }
///   indications:
///     - { keyword: "glioblastoma", effect: "+-10" }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Weights combining the four composite dimensions into the overall score
    #[serde(default)]
    pub weights: Option<CompositeWeights>,

    /// Mean first-year regional revenue (USD millions) that maps to an
    /// economic score of 100
    #[serde(default)]
    pub revenue_ceiling: Option<f64>,

    /// Annual discount rate applied to revenue launching in later years
    #[serde(default)]
    pub discount_rate: Option<f64>,

    /// Next-phase multipliers per company track record
    #[serde(default)]
    pub track_record: Option<TrackRecordEffects>,

    /// Extra effects on approval probability for a therapeutic area
    #[serde(default)]
    pub areas: Option<Vec<AreaEffect>>,

    /// Extra effects on endpoint confidence when the indication mentions a keyword
    #[serde(default)]
    pub indications: Option<Vec<IndicationEffect>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Some(CompositeWeights::default()),
            revenue_ceiling: Some(DEFAULT_REVENUE_CEILING),
            discount_rate: Some(DEFAULT_DISCOUNT_RATE),
            track_record: Some(TrackRecordEffects::default()),
            areas: None,
            indications: None,
        }
    }
}

impl ScoringConfig {
    /// Effective composite weights, normalised to sum to 1.0.
    /// Falls back to the defaults when the configured weights are unusable.
    pub fn effective_weights(&self) -> CompositeWeights {
        let mut weights = self.weights.clone().unwrap_or_default();
        if !weights.is_usable() {
            return CompositeWeights::default();
        }
        if !weights.validate() {
            weights.normalise();
        }
        weights
    }

    pub fn effective_revenue_ceiling(&self) -> f64 {
        match self.revenue_ceiling {
            Some(v) if v.is_finite() && v > 0.0 => v,
            _ => DEFAULT_REVENUE_CEILING,
        }
    }

    pub fn effective_discount_rate(&self) -> f64 {
        match self.discount_rate {
            Some(v) if v.is_finite() && (0.0..1.0).contains(&v) => v,
            _ => DEFAULT_DISCOUNT_RATE,
        }
    }

    /// Next-phase effect for a track record; unparseable config strings fall
    /// back to the built-in multiplier.
    pub fn track_record_effect(&self, track: TrackRecord) -> Effect {
        let defaults = TrackRecordEffects::default();
        let configured = self.track_record.as_ref().unwrap_or(&defaults);
        configured
            .effect_str(track)
            .and_then(|s| Effect::parse(s).ok())
            .or_else(|| defaults.effect_str(track).and_then(|s| Effect::parse(s).ok()))
            .unwrap_or(Effect::Multiply(1.0))
    }
}

/// The weight vector over composite dimensions.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompositeWeights {
    pub clinical: f64,
    pub economic: f64,
    pub access: f64,
    pub political: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            clinical: 0.40,
            economic: 0.25,
            access: 0.20,
            political: 0.15,
        }
    }
}

impl CompositeWeights {
    fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// True if all weights sum to ~1.0
    pub fn validate(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }

    /// Finite, non-negative and not all zero.
    pub fn is_usable(&self) -> bool {
        self.as_array().iter().all(|w| w.is_finite() && *w >= 0.0) && self.sum() > 0.0
    }

    /// Renormalise weights so they sum to 1.0
    pub fn normalise(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            self.clinical /= sum;
            self.economic /= sum;
            self.access /= sum;
            self.political /= sum;
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.clinical, self.economic, self.access, self.political]
    }

    /// Weighted sum of `[clinical, economic, access, political]`.
    pub fn combine(&self, composites: [f64; 4]) -> f64 {
        self.as_array()
            .iter()
            .zip(composites)
            .map(|(w, c)| w * c)
            .sum()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TrackRecordEffects {
    #[serde(default)]
    pub fast: Option<String>,
    #[serde(default)]
    pub average: Option<String>,
    #[serde(default)]
    pub slow: Option<String>,
}

impl Default for TrackRecordEffects {
    fn default() -> Self {
        Self {
            fast: Some("x1.15".to_string()),
            average: Some("x1".to_string()),
            slow: Some("x0.85".to_string()),
        }
    }
}

impl TrackRecordEffects {
    pub fn effect_str(&self, track: TrackRecord) -> Option<&str> {
        match track {
            TrackRecord::Fast => self.fast.as_deref(),
            TrackRecord::Average => self.average.as_deref(),
            TrackRecord::Slow => self.slow.as_deref(),
        }
    }
}

/// Therapeutic-area override. `name` is matched with the same lenient
/// classification as catalog data.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AreaEffect {
    pub name: String,
    pub effect: String,
}

/// Indication override, applied when the indication mentions `keyword`
/// as a whole word (case-insensitive).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IndicationEffect {
    pub keyword: String,
    pub effect: String,
}
