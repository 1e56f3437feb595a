use serde::{Deserialize, Serialize};

use super::selection::ReviewType;

/// A regulatory jurisdiction and its review clocks, in months.
///
/// Example YAML:
/// ```yaml
/// - code: "CN"
///   name: "China"
///   agency: "NMPA"
///   standard_review: 18
///   priority_review: 12
///   accelerated_review: 8
///   parallel_filing: true
///   reference_required: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegulatoryOption {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub agency: String,
    pub standard_review: u32,
    pub priority_review: u32,
    pub accelerated_review: u32,
    /// May run concurrently with the reference jurisdiction
    pub parallel_filing: bool,
    /// Clock cannot start until an approval exists elsewhere
    pub reference_required: bool,
}

impl RegulatoryOption {
    pub fn duration(&self, review_type: ReviewType) -> u32 {
        match review_type {
            ReviewType::Standard => self.standard_review,
            ReviewType::Priority => self.priority_review,
            ReviewType::Accelerated => self.accelerated_review,
        }
    }

    /// Independent jurisdictions can file on day one.
    pub fn is_independent(&self) -> bool {
        self.parallel_filing && !self.reference_required
    }
}

fn option(
    code: &str,
    name: &str,
    agency: &str,
    [standard_review, priority_review, accelerated_review]: [u32; 3],
    parallel_filing: bool,
    reference_required: bool,
) -> RegulatoryOption {
    RegulatoryOption {
        code: code.to_string(),
        name: name.to_string(),
        agency: agency.to_string(),
        standard_review,
        priority_review,
        accelerated_review,
        parallel_filing,
        reference_required,
    }
}

/// Built-in jurisdiction table. Its order is the scheduling order.
pub fn default_jurisdictions() -> Vec<RegulatoryOption> {
    vec![
        option("US", "United States", "FDA", [12, 8, 6], true, false),
        option("EU", "European Union", "EMA", [15, 11, 8], true, false),
        option("JP", "Japan", "PMDA", [12, 9, 6], true, false),
        option("UK", "United Kingdom", "MHRA", [10, 7, 5], true, false),
        option("CA", "Canada", "Health Canada", [12, 8, 6], true, false),
        option("AU", "Australia", "TGA", [11, 8, 6], true, false),
        option("CH", "Switzerland", "Swissmedic", [12, 8, 6], true, false),
        option("KR", "South Korea", "MFDS", [14, 10, 8], true, false),
        option("CN", "China", "NMPA", [18, 12, 8], true, true),
        option("BR", "Brazil", "ANVISA", [24, 15, 12], false, false),
        option("IN", "India", "CDSCO", [18, 12, 9], false, true),
        option("SA", "Saudi Arabia", "SFDA", [12, 8, 6], true, true),
        option("MX", "Mexico", "COFEPRIS", [18, 12, 9], false, true),
    ]
}

/// Case-insensitive lookup by jurisdiction code.
pub fn find_jurisdiction<'a>(table: &'a [RegulatoryOption], code: &str) -> Option<&'a RegulatoryOption> {
    let code = code.trim();
    table.iter().find(|o| o.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_codes_unique() {
        let table = default_jurisdictions();
        let codes: HashSet<_> = table.iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes.len(), table.len());
    }

    #[test]
    fn test_default_durations_ordered() {
        for o in default_jurisdictions() {
            assert!(o.accelerated_review <= o.priority_review, "{}", o.code);
            assert!(o.priority_review <= o.standard_review, "{}", o.code);
            assert!(o.accelerated_review > 0, "{}", o.code);
        }
    }

    #[test]
    fn test_reference_values() {
        let table = default_jurisdictions();
        let us = find_jurisdiction(&table, "US").unwrap();
        assert_eq!(us.duration(ReviewType::Standard), 12);
        assert!(us.is_independent());

        let eu = find_jurisdiction(&table, "eu").unwrap();
        assert_eq!(eu.duration(ReviewType::Standard), 15);

        let cn = find_jurisdiction(&table, "CN").unwrap();
        assert_eq!(cn.duration(ReviewType::Standard), 18);
        assert!(cn.reference_required);
        assert!(!cn.is_independent());
    }

    #[test]
    fn test_non_parallel_is_dependent() {
        let table = default_jurisdictions();
        let br = find_jurisdiction(&table, "BR").unwrap();
        assert!(!br.reference_required);
        assert!(!br.is_independent());
    }

    #[test]
    fn test_find_missing() {
        assert!(find_jurisdiction(&default_jurisdictions(), "XX").is_none());
    }

    #[test]
    fn test_option_yaml_parse() {
        let yaml = r#"
code: "NZ"
name: "New Zealand"
agency: "Medsafe"
standard_review: 10
priority_review: 8
accelerated_review: 6
parallel_filing: true
reference_required: true
"#;
        let option: RegulatoryOption = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(option.code, "NZ");
        assert_eq!(option.duration(ReviewType::Priority), 8);
        assert!(!option.is_independent());
    }
}
