use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scoring::{MarketProjection, MoleculeAttributes, ScoreBundle};

/// One drug-development programme as authored in the catalog file.
///
/// Field names are camelCase on the wire; snake_case spellings are also
/// accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoleculeRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: String,
    pub phase: String,
    #[serde(default)]
    pub indication: String,
    #[serde(default, alias = "therapeutic_area")]
    pub therapeutic_area: String,
    #[serde(default)]
    pub failed: bool,
    #[serde(default, rename = "companyTrackRecord", alias = "track_record")]
    pub track_record: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub competitors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "patent_expiry")]
    pub patent_expiry: Option<NaiveDate>,
}

impl MoleculeRecord {
    /// The categorical inputs the scoring engine reads.
    pub fn attributes(&self) -> MoleculeAttributes {
        MoleculeAttributes::from_raw(
            &self.phase,
            &self.indication,
            &self.therapeutic_area,
            self.failed,
            &self.track_record,
        )
    }
}

/// A catalog record with its computed scores and market projection attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMolecule {
    #[serde(flatten)]
    pub record: MoleculeRecord,
    pub overall_score: f64,
    pub scores: ScoreBundle,
    pub market_data: Vec<MarketProjection>,
}

impl ScoredMolecule {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// Sum of the five projected years across all regions, USD millions.
    pub fn projected_revenue(&self) -> f64 {
        self.market_data
            .iter()
            .map(|m| m.revenue_projection.total())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Phase, TherapeuticArea, TrackRecord};

    #[test]
    fn test_parse_camel_case_record() {
        let yaml = r#"
id: "MOL-001"
name: "Examplimab"
company: "Acme Bio"
phase: "Phase III"
indication: "Non-small cell lung cancer"
therapeuticArea: "Oncology"
companyTrackRecord: "fast"
mechanism: "PD-L1 inhibitor"
competitors: ["pembrolizumab", "atezolizumab"]
patentExpiry: "2036-05-01"
"#;
        let record: MoleculeRecord = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(record.id, "MOL-001");
        assert_eq!(record.competitors.len(), 2);
        assert_eq!(record.patent_expiry, NaiveDate::from_ymd_opt(2036, 5, 1));
        assert!(!record.failed);

        let attrs = record.attributes();
        assert_eq!(attrs.phase, Phase::Phase3);
        assert_eq!(attrs.therapeutic_area, TherapeuticArea::Oncology);
        assert_eq!(attrs.track_record, TrackRecord::Fast);
    }

    #[test]
    fn test_parse_snake_case_record() {
        let json = r#"{
            "id": "MOL-002",
            "name": "Slowstatin",
            "phase": "Phase I",
            "therapeutic_area": "Cardiovascular",
            "track_record": "slow",
            "failed": true
        }"#;
        let record: MoleculeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.therapeutic_area, "Cardiovascular");
        assert!(record.attributes().is_failed());
        assert_eq!(record.attributes().track_record, TrackRecord::Slow);
    }

    #[test]
    fn test_missing_optional_fields() {
        let record: MoleculeRecord =
            serde_json::from_str(r#"{"id": "X", "name": "X", "phase": "Preclinical"}"#).unwrap();
        assert!(record.company.is_empty());
        assert!(record.mechanism.is_none());
        assert_eq!(record.attributes().track_record, TrackRecord::Average);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("mechanism").is_none());
        assert!(json.get("patentExpiry").is_none());
        assert_eq!(json["companyTrackRecord"], "");
    }
}
