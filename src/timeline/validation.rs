use std::collections::HashSet;

use super::config::TimelineConfig;

/// Validate the timeline section of the config.
/// Returns all validation errors at once (not just the first).
pub fn validate_timeline(config: &TimelineConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref table) = config.jurisdictions {
        let mut seen = HashSet::new();
        for (i, option) in table.iter().enumerate() {
            // Lookups compare table codes verbatim, so padding would never match
            let trimmed = option.code.trim();
            if trimmed.is_empty() {
                errors.push(format!("timeline.jurisdictions[{}].code: must not be empty", i));
            } else {
                if trimmed != option.code {
                    errors.push(format!(
                        "timeline.jurisdictions[{}].code: '{}' must not have surrounding whitespace",
                        i, option.code
                    ));
                }
                let code = trimmed.to_uppercase();
                if !seen.insert(code.clone()) {
                    errors.push(format!(
                        "timeline.jurisdictions[{}].code: duplicate jurisdiction '{}'",
                        i, code
                    ));
                }
            }
            if option.standard_review == 0 {
                errors.push(format!(
                    "timeline.jurisdictions[{}].standard_review: must be at least 1 month",
                    i
                ));
            }
            if option.priority_review > option.standard_review
                || option.accelerated_review > option.priority_review
            {
                tracing::debug!(
                    code = %option.code,
                    "review clocks are not ordered standard >= priority >= accelerated"
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
