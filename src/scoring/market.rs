use serde::Serialize;

use super::categories::{is_orphan_indication, MoleculeAttributes};
use super::config::ScoringConfig;
use super::engine::sub_scores;
use super::tables;

/// Launch-relative revenue in USD millions, risk-adjusted and discounted
/// to today.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct RevenueProjection {
    pub year1: f64,
    pub year2: f64,
    pub year3: f64,
    pub year4: f64,
    pub year5: f64,
}

impl RevenueProjection {
    pub fn as_array(&self) -> [f64; 5] {
        [self.year1, self.year2, self.year3, self.year4, self.year5]
    }

    fn from_array(values: [f64; 5]) -> Self {
        let [year1, year2, year3, year4, year5] = values.map(non_negative);
        Self {
            year1,
            year2,
            year3,
            year4,
            year5,
        }
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketAccessStrategy {
    /// Health-technology-assessment strength, 0-1
    pub hta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketProjection {
    pub molecule: String,
    pub region: String,
    pub region_name: String,
    /// Years from today until launch in this region
    pub launch_year: u32,
    pub peak_sales: f64,
    pub revenue_projection: RevenueProjection,
    pub market_access_strategy: MarketAccessStrategy,
}

/// Project multi-year revenue per region for one molecule.
///
/// Always returns one entry per region. Later phases launch sooner, carry a
/// higher approval probability and are discounted less; the sponsor's
/// track record shifts both the launch date and the uptake curve. A failed
/// programme projects zero revenue everywhere.
pub fn project_market(
    name: &str,
    attrs: &MoleculeAttributes,
    config: &ScoringConfig,
) -> Vec<MarketProjection> {
    let failed = attrs.is_failed();
    let probability = if failed {
        0.0
    } else {
        sub_scores(attrs, config).approval / 100.0
    };
    let lead_years = lead_launch_years(attrs);
    let curve = tables::uptake_curve(attrs.track_record);
    let peak = tables::area_peak_sales(attrs.therapeutic_area);
    let rate = config.effective_discount_rate();

    let orphan = is_orphan_indication(&attrs.indication);
    let hta_shift = tables::indication_hta_shift(attrs.indication_risk())
        + if orphan { tables::ORPHAN_HTA_BONUS } else { 0.0 };

    tables::REGIONS
        .iter()
        .map(|region| {
            let launch_year = lead_years + region.launch_lag;
            let regional_peak = peak * region.peak_share;

            let (revenue, hta) = if failed {
                (RevenueProjection::default(), tables::FAILED_HTA)
            } else {
                let discount = 1.0 / (1.0 + rate).powi(launch_year as i32);
                let revenue = RevenueProjection::from_array(
                    curve.map(|uptake| regional_peak * uptake * probability * discount),
                );
                (revenue, unit_interval(region.hta + hta_shift))
            };

            MarketProjection {
                molecule: name.to_string(),
                region: region.code.to_string(),
                region_name: region.name.to_string(),
                launch_year,
                peak_sales: if failed { 0.0 } else { non_negative(regional_peak) },
                revenue_projection: revenue,
                market_access_strategy: MarketAccessStrategy { hta },
            }
        })
        .collect()
}

/// Years until the lead-market launch, scaled by sponsor speed.
pub fn lead_launch_years(attrs: &MoleculeAttributes) -> u32 {
    let years = tables::years_to_launch(attrs.phase) * tables::track_record_timing(attrs.track_record);
    years.round().max(0.0) as u32
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

fn unit_interval(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
