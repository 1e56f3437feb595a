use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionParseError {
    #[error("unknown review type '{0}' (expected standard, priority or accelerated)")]
    ReviewType(String),

    #[error("unknown filing strategy '{0}' (expected parallel or sequential)")]
    Strategy(String),

    #[error("missing jurisdiction code in '{0}'")]
    EmptyCode(String),
}

/// Review track chosen for a jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    #[default]
    Standard,
    Priority,
    Accelerated,
}

impl FromStr for ReviewType {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "std" => Ok(ReviewType::Standard),
            "priority" | "pri" => Ok(ReviewType::Priority),
            "accelerated" | "acc" => Ok(ReviewType::Accelerated),
            _ => Err(SelectionParseError::ReviewType(s.to_string())),
        }
    }
}

impl fmt::Display for ReviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReviewType::Standard => "standard",
            ReviewType::Priority => "priority",
            ReviewType::Accelerated => "accelerated",
        };
        f.write_str(label)
    }
}

/// Global filing strategy for the independent jurisdictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingStrategy {
    #[default]
    Parallel,
    Sequential,
}

impl FromStr for FilingStrategy {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parallel" => Ok(FilingStrategy::Parallel),
            "sequential" => Ok(FilingStrategy::Sequential),
            _ => Err(SelectionParseError::Strategy(s.to_string())),
        }
    }
}

impl fmt::Display for FilingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilingStrategy::Parallel => f.write_str("parallel"),
            FilingStrategy::Sequential => f.write_str("sequential"),
        }
    }
}

/// A jurisdiction the user picked, with its review track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedCountry {
    pub code: String,
    #[serde(default)]
    pub review_type: ReviewType,
}

impl SelectedCountry {
    pub fn new(code: &str, review_type: ReviewType) -> Self {
        Self {
            code: code.trim().to_uppercase(),
            review_type,
        }
    }
}

/// Parses `CODE` or `CODE:review`, e.g. `US`, `eu:priority`.
impl FromStr for SelectedCountry {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, review) = match s.split_once(':') {
            Some((code, review)) => (code, review.parse()?),
            None => (s, ReviewType::default()),
        };
        if code.trim().is_empty() {
            return Err(SelectionParseError::EmptyCode(s.to_string()));
        }
        Ok(SelectedCountry::new(code, review))
    }
}

/// The jurisdictions currently picked in the calculator.
///
/// Owned and mutated only by the interactive layer; the scheduler reads a
/// snapshot via [`Selection::countries`] and is re-run after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    countries: Vec<SelectedCountry>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn countries(&self) -> &[SelectedCountry] {
        &self.countries
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.position(code).is_some()
    }

    /// Add `code` with `review_type` if absent, remove it if present.
    /// Returns true if the jurisdiction is selected afterwards.
    pub fn toggle(&mut self, code: &str, review_type: ReviewType) -> bool {
        match self.position(code) {
            Some(i) => {
                self.countries.remove(i);
                false
            }
            None => {
                self.countries.push(SelectedCountry::new(code, review_type));
                true
            }
        }
    }

    /// Change the review track of an already selected jurisdiction.
    /// Returns false if `code` is not selected.
    pub fn set_review_type(&mut self, code: &str, review_type: ReviewType) -> bool {
        match self.position(code) {
            Some(i) => {
                self.countries[i].review_type = review_type;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.countries.clear();
    }

    fn position(&self, code: &str) -> Option<usize> {
        let code = code.trim();
        self.countries
            .iter()
            .position(|c| c.code.eq_ignore_ascii_case(code))
    }
}

impl FromIterator<SelectedCountry> for Selection {
    /// Later duplicates of a code are dropped.
    fn from_iter<I: IntoIterator<Item = SelectedCountry>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for country in iter {
            if !selection.is_selected(&country.code) {
                selection.countries.push(country);
            }
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_review_type() {
        assert_eq!("standard".parse::<ReviewType>().unwrap(), ReviewType::Standard);
        assert_eq!("Priority".parse::<ReviewType>().unwrap(), ReviewType::Priority);
        assert_eq!("acc".parse::<ReviewType>().unwrap(), ReviewType::Accelerated);
        assert_eq!(
            "fast".parse::<ReviewType>().unwrap_err(),
            SelectionParseError::ReviewType("fast".to_string())
        );
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("parallel".parse::<FilingStrategy>().unwrap(), FilingStrategy::Parallel);
        assert_eq!("SEQUENTIAL".parse::<FilingStrategy>().unwrap(), FilingStrategy::Sequential);
        assert!("staggered".parse::<FilingStrategy>().is_err());
    }

    #[test]
    fn test_parse_selected_country() {
        let plain: SelectedCountry = "us".parse().unwrap();
        assert_eq!(plain, SelectedCountry::new("US", ReviewType::Standard));

        let with_review: SelectedCountry = "eu:priority".parse().unwrap();
        assert_eq!(with_review.code, "EU");
        assert_eq!(with_review.review_type, ReviewType::Priority);

        assert!(":priority".parse::<SelectedCountry>().is_err());
        assert!("JP:slow".parse::<SelectedCountry>().is_err());
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = Selection::new();
        assert!(selection.toggle("US", ReviewType::Standard));
        assert!(selection.toggle("EU", ReviewType::Priority));
        assert_eq!(selection.countries().len(), 2);

        assert!(!selection.toggle("us", ReviewType::Standard));
        assert_eq!(selection.countries().len(), 1);
        assert!(!selection.is_selected("US"));
        assert!(selection.is_selected("eu"));
    }

    #[test]
    fn test_set_review_type() {
        let mut selection = Selection::new();
        selection.toggle("JP", ReviewType::Standard);
        assert!(selection.set_review_type("jp", ReviewType::Accelerated));
        assert_eq!(selection.countries()[0].review_type, ReviewType::Accelerated);
        assert!(!selection.set_review_type("CN", ReviewType::Priority));
    }

    #[test]
    fn test_collect_drops_duplicates() {
        let selection: Selection = vec![
            SelectedCountry::new("US", ReviewType::Priority),
            SelectedCountry::new("us", ReviewType::Standard),
            SelectedCountry::new("EU", ReviewType::Standard),
        ]
        .into_iter()
        .collect();
        assert_eq!(selection.countries().len(), 2);
        assert_eq!(selection.countries()[0].review_type, ReviewType::Priority);
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::new();
        selection.toggle("US", ReviewType::Standard);
        selection.clear();
        assert!(selection.is_empty());
    }
}
