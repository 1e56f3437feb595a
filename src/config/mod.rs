mod init;
mod schema;

pub use init::run_init;
pub use schema::Config;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/rx-outlook/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("rx-outlook"))
}

/// Get the default config file path (~/.config/rx-outlook/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Ensure the parent directory of `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/rx-outlook/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing file at the default path is not an error; built-in defaults are used.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using built-in defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Validate every section of the config.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref scoring) = config.scoring {
        if let Err(e) = crate::scoring::validate_scoring(scoring) {
            errors.extend(e);
        }
    }
    if let Some(ref timeline) = config.timeline {
        if let Err(e) = crate::timeline::validate_timeline(timeline) {
            errors.extend(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Write a config file atomically, creating parent directories as needed.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CompositeWeights, ScoringConfig};
    use crate::timeline::{FilingStrategy, TimelineConfig};
    use std::env;

    #[test]
    fn test_explicit_missing_path_is_error() {
        let path = env::temp_dir().join("rx_outlook_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_partial_config() {
        let path = env::temp_dir().join("rx_outlook_test_partial_config.yaml");
        fs::write(&path, "timeline:\n  strategy: sequential\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert!(config.scoring.is_none());
        assert_eq!(config.effective_scoring(), ScoringConfig::default());
        assert_eq!(config.effective_timeline().effective_strategy(), FilingStrategy::Sequential);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_top_level_field_rejected() {
        let path = env::temp_dir().join("rx_outlook_test_unknown_field.yaml");
        fs::write(&path, "queries: []\n").unwrap();
        assert!(load_config(Some(path.clone())).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_and_load_roundtrip() {
        let path = env::temp_dir().join("rx_outlook_test_config_dir").join("config.yaml");
        let _ = fs::remove_file(&path);

        let config = Config::default();
        write_config(&path, &config).unwrap();
        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
        assert!(validate_config(&Config { scoring: None, timeline: None }).is_ok());
    }

    #[test]
    fn test_validate_collects_both_sections() {
        let config = Config {
            scoring: Some(ScoringConfig {
                weights: Some(CompositeWeights {
                    clinical: 0.0,
                    economic: 0.0,
                    access: 0.0,
                    political: 0.0,
                }),
                ..ScoringConfig::default()
            }),
            timeline: Some(TimelineConfig {
                jurisdictions: Some(vec![]),
                ..TimelineConfig::default()
            }),
        };
        assert!(validate_config(&config).is_err());

        let mut table = crate::timeline::default_jurisdictions();
        table[1].code = "US".to_string();
        let config = Config {
            timeline: Some(TimelineConfig {
                jurisdictions: Some(table),
                ..TimelineConfig::default()
            }),
            ..config
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("scoring."));
        assert!(errors[1].starts_with("timeline."));
    }
}
