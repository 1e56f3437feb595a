use std::fmt;

/// Development stage of a programme.
///
/// Variants are declared in clinical order so `Ord` follows progression.
/// `Failed` and `Unknown` sit after the progression and are handled
/// explicitly by every table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Preclinical,
    Phase1,
    Phase2,
    Phase3,
    Filed, // NDA/BLA submitted
    Approved,
    Failed,
    Unknown,
}

impl Phase {
    /// Parse a free-text phase label. Never fails: anything unrecognised
    /// becomes `Phase::Unknown`.
    ///
    /// Combined labels such as "Phase I/II" resolve to the earlier phase.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim().to_lowercase();
        if s.is_empty() {
            return Phase::Unknown;
        }

        if ["fail", "discontinu", "terminat", "withdrawn"]
            .iter()
            .any(|k| s.contains(k))
        {
            return Phase::Failed;
        }
        if ["approved", "marketed", "launched"].iter().any(|k| s.contains(k)) {
            return Phase::Approved;
        }
        // Short agency acronyms need whole-word matching ("standard" contains "nda").
        if ["nda", "bla", "maa", "filed", "submitted", "under review", "registration"]
            .iter()
            .any(|k| mentions(&s, k))
        {
            return Phase::Filed;
        }
        if ["preclinical", "pre-clinical", "discovery", "ind-enabling"]
            .iter()
            .any(|k| s.contains(k))
        {
            return Phase::Preclinical;
        }

        let rest = s
            .strip_prefix("phase")
            .or_else(|| s.strip_prefix("ph"))
            .unwrap_or(&s);
        let first = rest.split('/').next().unwrap_or_default();
        match phase_numeral(first) {
            Some(1) => Phase::Phase1,
            Some(2) => Phase::Phase2,
            Some(3) => Phase::Phase3,
            _ => Phase::Unknown,
        }
    }

    /// True for phases where the outcome is already decided.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Approved | Phase::Failed)
    }
}

fn phase_numeral(token: &str) -> Option<u8> {
    let token = token
        .split(|c: char| !c.is_alphanumeric())
        .find(|t| !t.is_empty())?;
    let token = token
        .strip_suffix(|c: char| c == 'a' || c == 'b')
        .unwrap_or(token);
    match token {
        "1" | "i" => Some(1),
        "2" | "ii" => Some(2),
        "3" | "iii" => Some(3),
        _ => None,
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Preclinical => "Preclinical",
            Phase::Phase1 => "Phase I",
            Phase::Phase2 => "Phase II",
            Phase::Phase3 => "Phase III",
            Phase::Filed => "NDA/BLA",
            Phase::Approved => "Approved",
            Phase::Failed => "Failed",
            Phase::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TherapeuticArea {
    Oncology,
    Hematology,
    Immunology,
    Cardiovascular,
    Metabolic,
    Neurology,
    Psychiatry,
    InfectiousDisease,
    Vaccines,
    Respiratory,
    Ophthalmology,
    Dermatology,
    RareDisease,
    Other,
}

impl TherapeuticArea {
    pub const ALL: [TherapeuticArea; 14] = [
        TherapeuticArea::Oncology,
        TherapeuticArea::Hematology,
        TherapeuticArea::Immunology,
        TherapeuticArea::Cardiovascular,
        TherapeuticArea::Metabolic,
        TherapeuticArea::Neurology,
        TherapeuticArea::Psychiatry,
        TherapeuticArea::InfectiousDisease,
        TherapeuticArea::Vaccines,
        TherapeuticArea::Respiratory,
        TherapeuticArea::Ophthalmology,
        TherapeuticArea::Dermatology,
        TherapeuticArea::RareDisease,
        TherapeuticArea::Other,
    ];

    /// Classify a free-text therapeutic area. Unrecognised text maps to
    /// `TherapeuticArea::Other`, the neutral-risk bucket.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim().to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| s.contains(k));

        // Order matters: "neuro-oncology" is oncology, "rare blood disorder" is hematology.
        if has(&["oncolog", "cancer", "tumor", "tumour"]) {
            TherapeuticArea::Oncology
        } else if has(&["hematolog", "haematolog", "blood"]) {
            TherapeuticArea::Hematology
        } else if has(&["vaccin"]) {
            TherapeuticArea::Vaccines
        } else if has(&["infect", "antiviral", "antibacterial", "antifungal"]) {
            TherapeuticArea::InfectiousDisease
        } else if has(&["immunolog", "autoimmun", "inflammat"]) {
            TherapeuticArea::Immunology
        } else if has(&["cardio", "cardiac", "vascular"]) {
            TherapeuticArea::Cardiovascular
        } else if has(&["metabol", "endocrin", "diabet", "obesity"]) {
            TherapeuticArea::Metabolic
        } else if has(&["psychiatr", "mental"]) {
            TherapeuticArea::Psychiatry
        } else if has(&["neuro", "cns"]) {
            TherapeuticArea::Neurology
        } else if has(&["respirat", "pulmon"]) {
            TherapeuticArea::Respiratory
        } else if has(&["ophthalm", "retina", "eye"]) {
            TherapeuticArea::Ophthalmology
        } else if has(&["dermatolog", "skin"]) {
            TherapeuticArea::Dermatology
        } else if has(&["rare", "orphan"]) {
            TherapeuticArea::RareDisease
        } else {
            TherapeuticArea::Other
        }
    }
}

impl fmt::Display for TherapeuticArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TherapeuticArea::Oncology => "Oncology",
            TherapeuticArea::Hematology => "Hematology",
            TherapeuticArea::Immunology => "Immunology",
            TherapeuticArea::Cardiovascular => "Cardiovascular",
            TherapeuticArea::Metabolic => "Metabolic",
            TherapeuticArea::Neurology => "Neurology",
            TherapeuticArea::Psychiatry => "Psychiatry",
            TherapeuticArea::InfectiousDisease => "Infectious Disease",
            TherapeuticArea::Vaccines => "Vaccines",
            TherapeuticArea::Respiratory => "Respiratory",
            TherapeuticArea::Ophthalmology => "Ophthalmology",
            TherapeuticArea::Dermatology => "Dermatology",
            TherapeuticArea::RareDisease => "Rare Disease",
            TherapeuticArea::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Development risk of an indication, derived from keyword lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicationRisk {
    Low,
    Average,
    High,
}

const HIGH_RISK_INDICATIONS: &[&str] = &[
    "alzheimer",
    "alzheimer's",
    "parkinson",
    "parkinson's",
    "huntington",
    "huntington's",
    "als",
    "amyotrophic lateral sclerosis",
    "glioblastoma",
    "pancreatic",
    "sepsis",
    "nash",
    "mash",
    "stroke",
    "schizophrenia",
    "heart failure",
    "small cell lung cancer",
    "mesothelioma",
];

const LOW_RISK_INDICATIONS: &[&str] = &[
    "hypertension",
    "psoriasis",
    "hiv",
    "hepatitis",
    "hemophilia",
    "haemophilia",
    "migraine",
    "type 2 diabetes",
    "hypercholesterolemia",
    "dyslipidemia",
    "influenza",
    "covid-19",
    "atopic dermatitis",
    "rheumatoid arthritis",
];

const ORPHAN_INDICATIONS: &[&str] = &[
    "rare",
    "orphan",
    "syndrome",
    "dystrophy",
    "cystic fibrosis",
    "sickle cell",
    "hemophilia",
    "haemophilia",
    "amyloidosis",
    "spinal muscular atrophy",
    "lysosomal",
    "fabry",
    "gaucher",
    "pompe",
    "huntington",
    "huntington's",
    "als",
    "glioblastoma",
    "aml",
    "myelofibrosis",
    "mesothelioma",
];

impl IndicationRisk {
    /// Classify a free-text indication. No match means `Average`.
    pub fn classify(indication: &str) -> Self {
        let s = indication.to_lowercase();
        if HIGH_RISK_INDICATIONS.iter().any(|k| mentions(&s, k)) {
            IndicationRisk::High
        } else if LOW_RISK_INDICATIONS.iter().any(|k| mentions(&s, k)) {
            IndicationRisk::Low
        } else {
            IndicationRisk::Average
        }
    }
}

impl fmt::Display for IndicationRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IndicationRisk::Low => "low",
            IndicationRisk::Average => "average",
            IndicationRisk::High => "high",
        };
        f.write_str(label)
    }
}

/// True if the indication looks like an orphan / rare-disease programme.
pub fn is_orphan_indication(indication: &str) -> bool {
    let s = indication.to_lowercase();
    ORPHAN_INDICATIONS.iter().any(|k| mentions(&s, k))
}

/// Whole-word match of `keyword` inside an already lowercased `haystack`.
/// A negated occurrence ("non-small cell") does not count.
pub(crate) fn mentions(haystack: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    haystack.match_indices(keyword).any(|(i, _)| {
        let prefix = &haystack[..i];
        let before = prefix.chars().next_back();
        let after = haystack[i + keyword.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric)
            && !after.is_some_and(char::is_alphanumeric)
            && !is_negated(prefix)
    })
}

/// True if `prefix` ends with the word "non" followed by a hyphen or space.
fn is_negated(prefix: &str) -> bool {
    let Some(rest) = prefix
        .strip_suffix('-')
        .or_else(|| prefix.strip_suffix(' '))
        .and_then(|p| p.strip_suffix("non"))
    else {
        return false;
    };
    !rest.chars().next_back().is_some_and(char::is_alphanumeric)
}

/// Historical execution speed of the sponsoring company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackRecord {
    Fast,
    #[default]
    Average,
    Slow,
}

impl TrackRecord {
    /// Unrecognised or missing ratings are treated as `Average`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "fast" | "strong" | "excellent" | "high" => TrackRecord::Fast,
            "slow" | "weak" | "poor" | "low" => TrackRecord::Slow,
            _ => TrackRecord::Average,
        }
    }
}

impl fmt::Display for TrackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrackRecord::Fast => "fast",
            TrackRecord::Average => "average",
            TrackRecord::Slow => "slow",
        };
        f.write_str(label)
    }
}

/// Categorical inputs to the scoring engine for one molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeAttributes {
    pub phase: Phase,
    pub indication: String,
    pub therapeutic_area: TherapeuticArea,
    pub failed: bool,
    pub track_record: TrackRecord,
}

impl MoleculeAttributes {
    /// Build attributes from the raw strings a catalog record carries.
    pub fn from_raw(
        phase: &str,
        indication: &str,
        therapeutic_area: &str,
        failed: bool,
        track_record: &str,
    ) -> Self {
        let parsed_phase = Phase::parse(phase);
        if parsed_phase == Phase::Unknown {
            tracing::debug!(phase, "unrecognised phase, using Phase I weights");
        }
        let area = TherapeuticArea::parse(therapeutic_area);
        if area == TherapeuticArea::Other && !therapeutic_area.trim().is_empty() {
            tracing::debug!(therapeutic_area, "unrecognised therapeutic area, using neutral modifier");
        }
        Self {
            phase: parsed_phase,
            indication: indication.to_string(),
            therapeutic_area: area,
            failed,
            track_record: TrackRecord::parse(track_record),
        }
    }

    /// `failed` is an explicit override; a `Failed` phase label has the same effect.
    pub fn is_failed(&self) -> bool {
        self.failed || self.phase == Phase::Failed
    }

    pub fn indication_risk(&self) -> IndicationRisk {
        IndicationRisk::classify(&self.indication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_phase_labels() {
        assert_eq!(Phase::parse("Preclinical"), Phase::Preclinical);
        assert_eq!(Phase::parse("Phase I"), Phase::Phase1);
        assert_eq!(Phase::parse("phase 2"), Phase::Phase2);
        assert_eq!(Phase::parse("Phase IIb"), Phase::Phase2);
        assert_eq!(Phase::parse("Phase III"), Phase::Phase3);
        assert_eq!(Phase::parse("NDA/BLA"), Phase::Filed);
        assert_eq!(Phase::parse("BLA submitted"), Phase::Filed);
        assert_eq!(Phase::parse("Approved"), Phase::Approved);
        assert_eq!(Phase::parse("Failed"), Phase::Failed);
        assert_eq!(Phase::parse("Discontinued"), Phase::Failed);
        assert_eq!(Phase::parse("Phase III (standard arm)"), Phase::Phase3);
    }

    #[test]
    fn test_parse_combined_phase_takes_earlier() {
        assert_eq!(Phase::parse("Phase I/II"), Phase::Phase1);
        assert_eq!(Phase::parse("Phase 2/3"), Phase::Phase2);
        assert_eq!(Phase::parse("Phase II/III"), Phase::Phase2);
    }

    #[test]
    fn test_parse_phase_unknown() {
        assert_eq!(Phase::parse(""), Phase::Unknown);
        assert_eq!(Phase::parse("Phase IV-ish"), Phase::Unknown);
        assert_eq!(Phase::parse("whatever"), Phase::Unknown);
    }

    #[test]
    fn test_phase_ordering_follows_progression() {
        assert!(Phase::Preclinical < Phase::Phase1);
        assert!(Phase::Phase3 < Phase::Filed);
        assert!(Phase::Filed < Phase::Approved);
    }

    #[test]
    fn test_phase_display_roundtrip() {
        for phase in [
            Phase::Preclinical,
            Phase::Phase1,
            Phase::Phase2,
            Phase::Phase3,
            Phase::Filed,
            Phase::Approved,
            Phase::Failed,
        ] {
            assert_eq!(Phase::parse(&phase.to_string()), phase);
        }
    }

    #[test]
    fn test_parse_areas() {
        assert_eq!(TherapeuticArea::parse("Oncology"), TherapeuticArea::Oncology);
        assert_eq!(TherapeuticArea::parse("Neuro-oncology"), TherapeuticArea::Oncology);
        assert_eq!(TherapeuticArea::parse("CNS"), TherapeuticArea::Neurology);
        assert_eq!(TherapeuticArea::parse("Infectious Disease"), TherapeuticArea::InfectiousDisease);
        assert_eq!(TherapeuticArea::parse("Vaccines"), TherapeuticArea::Vaccines);
        assert_eq!(TherapeuticArea::parse("Rare Disease"), TherapeuticArea::RareDisease);
        assert_eq!(TherapeuticArea::parse("Gastroenterology"), TherapeuticArea::Other);
        assert_eq!(TherapeuticArea::parse(""), TherapeuticArea::Other);
    }

    #[test]
    fn test_area_display_roundtrip() {
        for area in TherapeuticArea::ALL {
            assert_eq!(TherapeuticArea::parse(&area.to_string()), area);
        }
    }

    #[test]
    fn test_indication_risk() {
        assert_eq!(IndicationRisk::classify("Alzheimer's disease"), IndicationRisk::High);
        assert_eq!(IndicationRisk::classify("Metastatic pancreatic cancer"), IndicationRisk::High);
        assert_eq!(IndicationRisk::classify("Plaque psoriasis"), IndicationRisk::Low);
        assert_eq!(IndicationRisk::classify("Chronic kidney disease"), IndicationRisk::Average);
        assert_eq!(IndicationRisk::classify("Small cell lung cancer"), IndicationRisk::High);
        assert_eq!(IndicationRisk::classify("Extensive-stage small cell lung cancer"), IndicationRisk::High);
        assert_eq!(IndicationRisk::classify("Non-small cell lung cancer"), IndicationRisk::Average);
        assert_eq!(IndicationRisk::classify("Non small cell lung cancer"), IndicationRisk::Average);
    }

    #[test]
    fn test_mentions_requires_word_boundary() {
        assert!(mentions("als with bulbar onset", "als"));
        assert!(!mentions("also known as", "als"));
        assert!(!mentions("renals", "als"));
        assert!(mentions("hiv-1 infection", "hiv"));
        assert!(!mentions("anything", ""));
        assert!(!mentions("non-small cell lung cancer", "small cell lung cancer"));
        assert!(mentions("anon-small cell lung cancer", "small cell lung cancer"));
    }

    #[test]
    fn test_orphan_indication() {
        assert!(is_orphan_indication("Duchenne muscular dystrophy"));
        assert!(is_orphan_indication("Relapsed AML"));
        assert!(!is_orphan_indication("Hypertension"));
    }

    #[test]
    fn test_parse_track_record() {
        assert_eq!(TrackRecord::parse("fast"), TrackRecord::Fast);
        assert_eq!(TrackRecord::parse(" Slow "), TrackRecord::Slow);
        assert_eq!(TrackRecord::parse("average"), TrackRecord::Average);
        assert_eq!(TrackRecord::parse("unheard-of"), TrackRecord::Average);
    }

    #[test]
    fn test_attributes_failed_from_phase_label() {
        let attrs = MoleculeAttributes::from_raw("Failed", "Sepsis", "Infectious Disease", false, "fast");
        assert!(attrs.is_failed());
        let attrs = MoleculeAttributes::from_raw("Phase II", "Sepsis", "Infectious Disease", false, "fast");
        assert!(!attrs.is_failed());
    }
}
