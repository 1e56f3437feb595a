use super::categories::TherapeuticArea;
use super::config::ScoringConfig;
use super::factors::Effect;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref weights) = config.weights {
        for (name, value) in [
            ("clinical", weights.clinical),
            ("economic", weights.economic),
            ("access", weights.access),
            ("political", weights.political),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("scoring.weights.{}: must be a non-negative number", name));
            }
        }
        if weights.is_usable() && !weights.validate() {
            tracing::debug!("scoring weights do not sum to 1.0, they will be normalised");
        } else if weights.as_array().iter().all(|w| *w == 0.0) {
            errors.push("scoring.weights: at least one weight must be positive".to_string());
        }
    }

    if let Some(ceiling) = config.revenue_ceiling {
        if !ceiling.is_finite() || ceiling <= 0.0 {
            errors.push("scoring.revenue_ceiling: must be positive".to_string());
        }
    }

    if let Some(rate) = config.discount_rate {
        if !rate.is_finite() || !(0.0..1.0).contains(&rate) {
            errors.push("scoring.discount_rate: must be in [0, 1)".to_string());
        }
    }

    if let Some(ref track) = config.track_record {
        for (name, value) in [
            ("fast", &track.fast),
            ("average", &track.average),
            ("slow", &track.slow),
        ] {
            if let Some(s) = value {
                if let Err(e) = Effect::parse(s) {
                    errors.push(format!("scoring.track_record.{}: invalid '{}' - {}", name, s, e));
                }
            }
        }
    }

    if let Some(ref areas) = config.areas {
        for (i, rule) in areas.iter().enumerate() {
            if TherapeuticArea::parse(&rule.name) == TherapeuticArea::Other
                && !rule.name.trim().eq_ignore_ascii_case("other")
            {
                errors.push(format!(
                    "scoring.areas[{}].name: unrecognised therapeutic area '{}'",
                    i, rule.name
                ));
            }
            if let Err(e) = Effect::parse(&rule.effect) {
                errors.push(format!(
                    "scoring.areas[{}].effect: invalid '{}' - {}",
                    i, rule.effect, e
                ));
            }
        }
    }

    if let Some(ref indications) = config.indications {
        for (i, rule) in indications.iter().enumerate() {
            if rule.keyword.trim().is_empty() {
                errors.push(format!("scoring.indications[{}].keyword: must not be empty", i));
            }
            if let Err(e) = Effect::parse(&rule.effect) {
                errors.push(format!(
                    "scoring.indications[{}].effect: invalid '{}' - {}",
                    i, rule.effect, e
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
