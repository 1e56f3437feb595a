use chrono::{Months, NaiveDate};
use serde::Serialize;

use super::jurisdictions::{find_jurisdiction, RegulatoryOption};
use super::selection::{FilingStrategy, ReviewType, SelectedCountry};

/// Which side of the reference-approval dependency a jurisdiction sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingGroup {
    /// Parallel filing allowed and no reference approval needed
    Independent,
    /// Waits for the independent group to resolve
    Dependent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub code: String,
    pub duration: u32,
    pub start_month: u32,
    pub end_month: u32,
    pub review_type: ReviewType,
    pub group: FilingGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Timeline {
    /// Months until the last jurisdiction approves
    pub total: u32,
    pub breakdown: Vec<ScheduleEntry>,
}

/// Schedule the selected jurisdictions.
///
/// Jurisdictions are processed in `table` order, not selection order.
/// Independent ones all start at month 0 under `Parallel`, or run
/// back-to-back under `Sequential`; dependent ones always run back-to-back
/// after the independent group has finished. Codes missing from `table`
/// are skipped; a repeated code keeps its first selection.
pub fn compute_timeline(
    selected: &[SelectedCountry],
    strategy: FilingStrategy,
    table: &[RegulatoryOption],
) -> Timeline {
    for country in selected {
        if find_jurisdiction(table, &country.code).is_none() {
            tracing::debug!(code = %country.code, "skipping jurisdiction missing from table");
        }
    }

    let resolved: Vec<(&RegulatoryOption, ReviewType)> = table
        .iter()
        .filter_map(|option| {
            selected
                .iter()
                .find(|c| c.code.trim().eq_ignore_ascii_case(&option.code))
                .map(|c| (option, c.review_type))
        })
        .collect();

    let (independent, dependent): (Vec<_>, Vec<_>) =
        resolved.into_iter().partition(|(option, _)| option.is_independent());

    let mut breakdown = Vec::with_capacity(independent.len() + dependent.len());
    let mut cursor: u32 = 0;

    for (option, review_type) in independent {
        let duration = option.duration(review_type);
        let start_month = match strategy {
            FilingStrategy::Parallel => 0,
            FilingStrategy::Sequential => cursor,
        };
        let end_month = start_month.saturating_add(duration);
        cursor = match strategy {
            FilingStrategy::Parallel => cursor.max(end_month),
            FilingStrategy::Sequential => end_month,
        };
        breakdown.push(entry(option, review_type, start_month, end_month, FilingGroup::Independent));
    }

    for (option, review_type) in dependent {
        let start_month = cursor;
        let end_month = start_month.saturating_add(option.duration(review_type));
        cursor = end_month;
        breakdown.push(entry(option, review_type, start_month, end_month, FilingGroup::Dependent));
    }

    let total = breakdown.iter().map(|e| e.end_month).max().unwrap_or(0);
    tracing::debug!(%strategy, jurisdictions = breakdown.len(), total, "computed filing timeline");

    Timeline { total, breakdown }
}

fn entry(
    option: &RegulatoryOption,
    review_type: ReviewType,
    start_month: u32,
    end_month: u32,
    group: FilingGroup,
) -> ScheduleEntry {
    ScheduleEntry {
        code: option.code.clone(),
        duration: end_month - start_month,
        start_month,
        end_month,
        review_type,
        group,
    }
}

/// Calendar dates for one scheduled jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEntry {
    pub code: String,
    pub filing_date: NaiveDate,
    pub approval_date: NaiveDate,
}

/// Project the month offsets of `timeline` onto the calendar from `start`.
/// Dates beyond chrono's range saturate at `NaiveDate::MAX`.
pub fn market_entry_dates(timeline: &Timeline, start: NaiveDate) -> Vec<MarketEntry> {
    let shift = |months: u32| {
        start
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX)
    };
    timeline
        .breakdown
        .iter()
        .map(|e| MarketEntry {
            code: e.code.clone(),
            filing_date: shift(e.start_month),
            approval_date: shift(e.end_month),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::jurisdictions::default_jurisdictions;

    fn pick(codes: &[&str]) -> Vec<SelectedCountry> {
        codes
            .iter()
            .map(|c| c.parse::<SelectedCountry>().unwrap())
            .collect()
    }

    fn span(timeline: &Timeline, code: &str) -> (u32, u32) {
        let e = timeline.breakdown.iter().find(|e| e.code == code).unwrap();
        (e.start_month, e.end_month)
    }

    #[test]
    fn test_parallel_independent() {
        let timeline = compute_timeline(&pick(&["US", "EU"]), FilingStrategy::Parallel, &default_jurisdictions());
        assert_eq!(timeline.breakdown.len(), 2);
        assert_eq!(span(&timeline, "US"), (0, 12));
        assert_eq!(span(&timeline, "EU"), (0, 15));
        assert_eq!(timeline.total, 15);
    }

    #[test]
    fn test_sequential_independent() {
        let timeline = compute_timeline(&pick(&["US", "EU"]), FilingStrategy::Sequential, &default_jurisdictions());
        assert_eq!(span(&timeline, "US"), (0, 12));
        assert_eq!(span(&timeline, "EU"), (12, 27));
        assert_eq!(timeline.total, 27);
    }

    #[test]
    fn test_reference_required_waits_for_parallel_group() {
        let timeline = compute_timeline(&pick(&["US", "EU", "CN"]), FilingStrategy::Parallel, &default_jurisdictions());
        let codes: Vec<_> = timeline.breakdown.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["US", "EU", "CN"]);
        assert_eq!(span(&timeline, "CN"), (15, 33));
        assert_eq!(timeline.breakdown[2].group, FilingGroup::Dependent);
        assert_eq!(timeline.total, 33);
    }

    #[test]
    fn test_reference_required_waits_for_sequential_group() {
        let timeline = compute_timeline(&pick(&["CN", "EU", "US"]), FilingStrategy::Sequential, &default_jurisdictions());
        assert_eq!(span(&timeline, "CN"), (27, 45));
        assert_eq!(timeline.total, 45);
    }

    #[test]
    fn test_dependent_group_is_sequential() {
        let timeline = compute_timeline(
            &pick(&["US", "CN:priority", "IN", "BR"]),
            FilingStrategy::Parallel,
            &default_jurisdictions(),
        );
        // Table order: CN, BR, IN
        assert_eq!(span(&timeline, "US"), (0, 12));
        assert_eq!(span(&timeline, "CN"), (12, 24));
        assert_eq!(span(&timeline, "BR"), (24, 48));
        assert_eq!(span(&timeline, "IN"), (48, 66));
        assert_eq!(timeline.total, 66);
    }

    #[test]
    fn test_only_dependent_starts_at_zero() {
        let timeline = compute_timeline(&pick(&["CN"]), FilingStrategy::Parallel, &default_jurisdictions());
        assert_eq!(span(&timeline, "CN"), (0, 18));
        assert_eq!(timeline.total, 18);
    }

    #[test]
    fn test_table_order_not_selection_order() {
        let timeline = compute_timeline(&pick(&["JP", "EU", "US"]), FilingStrategy::Sequential, &default_jurisdictions());
        let codes: Vec<_> = timeline.breakdown.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["US", "EU", "JP"]);
        assert_eq!(span(&timeline, "JP"), (27, 39));
    }

    #[test]
    fn test_review_type_selects_duration() {
        let timeline = compute_timeline(
            &pick(&["US:accelerated", "EU:priority"]),
            FilingStrategy::Parallel,
            &default_jurisdictions(),
        );
        assert_eq!(span(&timeline, "US"), (0, 6));
        assert_eq!(span(&timeline, "EU"), (0, 11));
        assert_eq!(timeline.breakdown[0].review_type, ReviewType::Accelerated);
    }

    #[test]
    fn test_empty_selection() {
        for strategy in [FilingStrategy::Parallel, FilingStrategy::Sequential] {
            let timeline = compute_timeline(&[], strategy, &default_jurisdictions());
            assert_eq!(timeline, Timeline { total: 0, breakdown: vec![] });
        }
    }

    #[test]
    fn test_unknown_codes_skipped() {
        let timeline = compute_timeline(&pick(&["XX", "US", "ZZ:priority"]), FilingStrategy::Parallel, &default_jurisdictions());
        assert_eq!(timeline.breakdown.len(), 1);
        assert_eq!(timeline.total, 12);
    }

    #[test]
    fn test_duplicate_code_keeps_first() {
        let timeline = compute_timeline(&pick(&["US:priority", "US"]), FilingStrategy::Parallel, &default_jurisdictions());
        assert_eq!(timeline.breakdown.len(), 1);
        assert_eq!(span(&timeline, "US"), (0, 8));
    }

    #[test]
    fn test_invariants_hold_for_all_selections() {
        let table = default_jurisdictions();
        let all: Vec<_> = table.iter().map(|o| SelectedCountry::new(&o.code, ReviewType::Priority)).collect();
        for strategy in [FilingStrategy::Parallel, FilingStrategy::Sequential] {
            for n in 0..=all.len() {
                let timeline = compute_timeline(&all[..n], strategy, &table);
                let independent_end = timeline
                    .breakdown
                    .iter()
                    .filter(|e| e.group == FilingGroup::Independent)
                    .map(|e| e.end_month)
                    .max()
                    .unwrap_or(0);
                for e in &timeline.breakdown {
                    assert_eq!(e.end_month - e.start_month, e.duration);
                    if e.group == FilingGroup::Dependent {
                        assert!(e.start_month >= independent_end);
                    }
                }
                let max_end = timeline.breakdown.iter().map(|e| e.end_month).max().unwrap_or(0);
                assert_eq!(timeline.total, max_end);
            }
        }
    }

    #[test]
    fn test_market_entry_dates() {
        let timeline = compute_timeline(&pick(&["US", "CN"]), FilingStrategy::Parallel, &default_jurisdictions());
        let start = NaiveDate::from_ymd_opt(2027, 1, 31).unwrap();
        let dates = market_entry_dates(&timeline, start);
        assert_eq!(dates[0].filing_date, start);
        assert_eq!(dates[0].approval_date, NaiveDate::from_ymd_opt(2028, 1, 31).unwrap());
        // Month arithmetic clamps to the end of shorter months
        assert_eq!(dates[1].approval_date, NaiveDate::from_ymd_opt(2029, 7, 31).unwrap());
    }
}
