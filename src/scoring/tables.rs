//! Static rubric tables. Read-only reference weights; nothing here is
//! mutated at runtime.

use super::categories::{IndicationRisk, Phase, TherapeuticArea, TrackRecord};

/// Per-phase base confidence, all on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseBase {
    pub meeting_endpoints: f64,
    pub approval: f64,
    pub next_phase: f64,
    /// Retention ranking: higher means less likely to drop out.
    pub dropout_ranking: f64,
}

const fn base(meeting_endpoints: f64, approval: f64, next_phase: f64, dropout_ranking: f64) -> PhaseBase {
    PhaseBase {
        meeting_endpoints,
        approval,
        next_phase,
        dropout_ranking,
    }
}

/// Terminal band for failed programmes, independent of phase.
pub const FAILED_BASE: PhaseBase = base(5.0, 0.0, 0.0, 5.0);
pub const FAILED_DESIGNATION: f64 = 5.0;
pub const FAILED_HTA: f64 = 0.1;

pub fn phase_base(phase: Phase) -> PhaseBase {
    match phase {
        Phase::Preclinical => base(35.0, 5.0, 60.0, 30.0),
        Phase::Phase1 | Phase::Unknown => base(55.0, 10.0, 63.0, 40.0),
        Phase::Phase2 => base(60.0, 16.0, 31.0, 50.0),
        Phase::Phase3 => base(65.0, 50.0, 58.0, 70.0),
        Phase::Filed => base(85.0, 85.0, 85.0, 85.0),
        Phase::Approved => base(95.0, 100.0, 100.0, 95.0),
        Phase::Failed => FAILED_BASE,
    }
}

/// Years until the lead-market launch for an average sponsor.
pub fn years_to_launch(phase: Phase) -> f64 {
    match phase {
        Phase::Preclinical => 8.0,
        Phase::Phase1 | Phase::Unknown => 6.0,
        Phase::Phase2 => 4.0,
        Phase::Phase3 => 2.0,
        Phase::Filed => 1.0,
        Phase::Approved | Phase::Failed => 0.0,
    }
}

/// How much of an expedited-designation likelihood a phase has realised.
pub fn phase_maturity(phase: Phase) -> f64 {
    match phase {
        Phase::Preclinical => 0.5,
        Phase::Phase1 | Phase::Unknown => 0.8,
        Phase::Phase2 | Phase::Phase3 | Phase::Filed | Phase::Approved => 1.0,
        Phase::Failed => 0.0,
    }
}

/// Multiplier on approval / next-phase probabilities.
pub fn area_approval_modifier(area: TherapeuticArea) -> f64 {
    match area {
        TherapeuticArea::Oncology => 0.85,
        TherapeuticArea::Hematology => 1.25,
        TherapeuticArea::Immunology => 1.05,
        TherapeuticArea::Cardiovascular => 0.9,
        TherapeuticArea::Metabolic => 1.05,
        TherapeuticArea::Neurology => 0.85,
        TherapeuticArea::Psychiatry => 0.85,
        TherapeuticArea::InfectiousDisease => 1.15,
        TherapeuticArea::Vaccines => 1.2,
        TherapeuticArea::Respiratory => 0.95,
        TherapeuticArea::Ophthalmology => 1.0,
        TherapeuticArea::Dermatology => 1.1,
        TherapeuticArea::RareDisease => 1.2,
        TherapeuticArea::Other => 1.0,
    }
}

pub fn area_breakthrough_base(area: TherapeuticArea) -> f64 {
    match area {
        TherapeuticArea::Oncology => 45.0,
        TherapeuticArea::Hematology | TherapeuticArea::RareDisease => 40.0,
        TherapeuticArea::InfectiousDisease | TherapeuticArea::Vaccines => 30.0,
        TherapeuticArea::Neurology | TherapeuticArea::Psychiatry => 25.0,
        _ => 15.0,
    }
}

pub fn area_orphan_base(area: TherapeuticArea) -> f64 {
    match area {
        TherapeuticArea::RareDisease => 70.0,
        TherapeuticArea::Hematology => 35.0,
        TherapeuticArea::Oncology => 30.0,
        TherapeuticArea::Neurology => 20.0,
        _ => 10.0,
    }
}

/// Orphan likelihood when the indication itself reads as a rare disease.
pub const ORPHAN_INDICATION_LIKELIHOOD: f64 = 80.0;

/// Added to breakthrough likelihood for high unmet-need indications.
pub const HIGH_RISK_BREAKTHROUGH_BONUS: f64 = 15.0;

/// Global peak sales in USD millions.
pub fn area_peak_sales(area: TherapeuticArea) -> f64 {
    match area {
        TherapeuticArea::Oncology => 2500.0,
        TherapeuticArea::Immunology => 2000.0,
        TherapeuticArea::Metabolic => 1800.0,
        TherapeuticArea::Neurology => 1500.0,
        TherapeuticArea::Cardiovascular => 1400.0,
        TherapeuticArea::Hematology => 1200.0,
        TherapeuticArea::Respiratory => 1100.0,
        TherapeuticArea::Vaccines | TherapeuticArea::Other => 1000.0,
        TherapeuticArea::Psychiatry => 950.0,
        TherapeuticArea::RareDisease => 900.0,
        TherapeuticArea::InfectiousDisease | TherapeuticArea::Dermatology => 800.0,
        TherapeuticArea::Ophthalmology => 700.0,
    }
}

/// Additive shift on `meeting_endpoints`.
pub fn indication_endpoint_shift(risk: IndicationRisk) -> f64 {
    match risk {
        IndicationRisk::High => -10.0,
        IndicationRisk::Average => 0.0,
        IndicationRisk::Low => 8.0,
    }
}

/// Additive shift on regional HTA strength.
pub fn indication_hta_shift(risk: IndicationRisk) -> f64 {
    match risk {
        IndicationRisk::High => 0.05,
        IndicationRisk::Average => 0.0,
        IndicationRisk::Low => -0.05,
    }
}

pub const ORPHAN_HTA_BONUS: f64 = 0.1;

/// Scales lead-launch delay.
pub fn track_record_timing(track: TrackRecord) -> f64 {
    match track {
        TrackRecord::Fast => 0.8,
        TrackRecord::Average => 1.0,
        TrackRecord::Slow => 1.25,
    }
}

/// Share of regional peak sales reached in launch years 1..=5.
pub fn uptake_curve(track: TrackRecord) -> [f64; 5] {
    match track {
        TrackRecord::Fast => [0.35, 0.65, 0.85, 1.0, 1.0],
        TrackRecord::Average => [0.25, 0.5, 0.75, 0.9, 1.0],
        TrackRecord::Slow => [0.15, 0.35, 0.6, 0.8, 0.9],
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub peak_share: f64,
    pub hta: f64,
    /// Years after the lead-market launch.
    pub launch_lag: u32,
}

pub const REGIONS: [RegionProfile; 5] = [
    RegionProfile { code: "US", name: "United States", peak_share: 0.45, hta: 0.75, launch_lag: 0 },
    RegionProfile { code: "EU", name: "European Union", peak_share: 0.25, hta: 0.6, launch_lag: 1 },
    RegionProfile { code: "JP", name: "Japan", peak_share: 0.08, hta: 0.7, launch_lag: 1 },
    RegionProfile { code: "CN", name: "China", peak_share: 0.10, hta: 0.5, launch_lag: 2 },
    RegionProfile { code: "ROW", name: "Rest of World", peak_share: 0.12, hta: 0.45, launch_lag: 2 },
];
