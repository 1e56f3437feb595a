use super::types::{MoleculeRecord, ScoredMolecule};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;

/// On-disk catalog layout, in either YAML or JSON:
///
/// ```yaml
/// molecules:
///   - id: "MOL-001"
///     name: "Examplimab"
///     phase: "Phase III"
/// ```
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile<T> {
    molecules: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(CatalogFormat::Yaml),
            Some("json") => Ok(CatalogFormat::Json),
            _ => anyhow::bail!(
                "Unsupported catalog file {}: expected a .yaml, .yml or .json extension",
                path.display()
            ),
        }
    }
}

/// Load and validate a molecule catalog.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any record
/// fails validation. All validation problems are reported together.
pub fn load_catalog(path: &Path) -> Result<Vec<MoleculeRecord>> {
    let format = CatalogFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog at {}", path.display()))?;

    let file: CatalogFile<MoleculeRecord> = match format {
        CatalogFormat::Yaml => serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: invalid YAML in {}", path.display()))?,
        CatalogFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: invalid JSON in {}", path.display()))?,
    };

    if let Err(errors) = validate_catalog(&file.molecules) {
        anyhow::bail!(
            "Invalid catalog {}:\n  - {}",
            path.display(),
            errors.join("\n  - ")
        );
    }

    tracing::debug!(path = %path.display(), molecules = file.molecules.len(), "loaded catalog");
    Ok(file.molecules)
}

/// Check record identity. Returns all validation errors at once.
pub fn validate_catalog(records: &[MoleculeRecord]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, record) in records.iter().enumerate() {
        let id = record.id.trim();
        if id.is_empty() {
            errors.push(format!("molecules[{}].id: must not be empty", i));
        } else if !seen.insert(id) {
            errors.push(format!("molecules[{}].id: duplicate id '{}'", i, id));
        }
        if record.name.trim().is_empty() {
            errors.push(format!("molecules[{}].name: must not be empty", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Save raw catalog records atomically, in the format implied by `path`.
pub fn save_catalog(path: &Path, records: &[MoleculeRecord]) -> Result<()> {
    write_document(path, &CatalogFile { molecules: records.to_vec() })
}

/// Save scored records (with `overallScore` and `marketData`) atomically.
pub fn save_scored_catalog(path: &Path, molecules: &[ScoredMolecule]) -> Result<()> {
    write_document(path, &CatalogFile { molecules: molecules.to_vec() })
}

fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let format = CatalogFormat::from_path(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    match format {
        CatalogFormat::Json => {
            serde_json::to_writer_pretty(&mut file, document).context("Failed to serialize catalog")?;
            file.write_all(b"\n").context("Failed to write catalog")?;
        }
        CatalogFormat::Yaml => {
            let yaml = serde_saphyr::to_string(document)
                .map_err(|e| anyhow::anyhow!("Failed to serialize catalog: {}", e))?;
            file.write_all(yaml.as_bytes()).context("Failed to write catalog")?;
        }
    }

    file.commit()
        .with_context(|| format!("Failed to save catalog to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn record(id: &str) -> MoleculeRecord {
        MoleculeRecord {
            id: id.to_string(),
            name: format!("Molecule {}", id),
            company: "Acme Bio".to_string(),
            phase: "Phase II".to_string(),
            indication: "Rheumatoid arthritis".to_string(),
            therapeutic_area: "Immunology".to_string(),
            failed: false,
            track_record: "average".to_string(),
            mechanism: None,
            competitors: vec![],
            patent_expiry: None,
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(CatalogFormat::from_path(Path::new("a.yml")).unwrap(), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("a.YAML")).unwrap(), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("a.json")).unwrap(), CatalogFormat::Json);
        assert!(CatalogFormat::from_path(Path::new("a.csv")).is_err());
        assert!(CatalogFormat::from_path(Path::new("catalog")).is_err());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut blank = record(" ");
        blank.name = String::new();
        let records = vec![record("A"), record("A"), blank];
        let errors = validate_catalog(&records).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("duplicate id 'A'"));
        assert!(errors[1].contains("molecules[2].id"));
        assert!(errors[2].contains("molecules[2].name"));
    }

    #[test]
    fn test_validate_empty_catalog() {
        assert!(validate_catalog(&[]).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let path = env::temp_dir().join("rx_outlook_test_missing_catalog.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_catalog(&path).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip_json() {
        let path = env::temp_dir().join("rx_outlook_test_roundtrip.json");
        let _ = fs::remove_file(&path);

        let records = vec![record("A"), record("B")];
        save_catalog(&path, &records).unwrap();
        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, records);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_and_load_roundtrip_yaml() {
        let path = env::temp_dir().join("rx_outlook_test_roundtrip.yaml");
        let _ = fs::remove_file(&path);

        let mut with_metadata = record("C");
        with_metadata.mechanism = Some("JAK1 inhibitor".to_string());
        with_metadata.competitors = vec!["tofacitinib".to_string()];
        let records = vec![with_metadata];
        save_catalog(&path, &records).unwrap();
        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, records);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let path = env::temp_dir().join("rx_outlook_test_duplicates.json");
        fs::write(
            &path,
            r#"{"molecules": [
                {"id": "A", "name": "One", "phase": "Phase I"},
                {"id": "A", "name": "Two", "phase": "Phase II"}
            ]}"#,
        )
        .unwrap();

        let err = load_catalog(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate id 'A'"));

        let _ = fs::remove_file(&path);
    }
}
