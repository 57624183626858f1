//! JSON file-backed DatasetRepository implementation.

use crate::dto::DatasetFileDto;
use prizm_core::debate::{DatasetRepository, DebateDataset};
use prizm_core::error::{PrizmError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads debate datasets from a JSON file.
///
/// The file is read on every `load`, so edits are picked up by the next
/// analysis without a restart.
#[derive(Debug, Clone)]
pub struct JsonDatasetRepository {
    path: PathBuf,
}

impl JsonDatasetRepository {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `dataset` to the repository's file in the wrapped form.
    pub fn save(&self, dataset: &DebateDataset) -> Result<()> {
        let content = serde_json::to_string_pretty(&DatasetFileDto::from(dataset))?;
        fs::write(&self.path, content).map_err(|e| {
            PrizmError::io(format!(
                "Failed to write dataset file at {:?}: {}",
                self.path, e
            ))
        })
    }
}

impl DatasetRepository for JsonDatasetRepository {
    fn load(&self) -> Result<DebateDataset> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            PrizmError::io(format!(
                "Failed to read dataset file at {:?}: {}",
                self.path, e
            ))
        })?;

        let dto: DatasetFileDto = serde_json::from_str(&content)?;
        let dataset = DebateDataset::from(dto);

        tracing::debug!(
            path = ?self.path,
            records = dataset.len(),
            "[JsonDatasetRepository] Loaded dataset"
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prizm_core::debate::builtin_dataset;
    use tempfile::TempDir;

    const RECORD_JSON: &str = r#"{
        "factor": {
            "title": "Churn",
            "description": "Customer retention trend.",
            "source_quote": "Churn fell to 4%."
        },
        "supportive": {
            "summary": "Retention is improving.",
            "logic": "Lower churn compounds."
        },
        "opposing": {
            "summary": "One quarter is not a trend."
        }
    }"#;

    fn write(dir: &TempDir, content: &str) -> JsonDatasetRepository {
        let path = dir.path().join("debates.json");
        fs::write(&path, content).unwrap();
        JsonDatasetRepository::with_path(path)
    }

    #[test]
    fn test_load_wrapped_form() {
        let dir = TempDir::new().unwrap();
        let repo = write(&dir, &format!(r#"{{"records": [{RECORD_JSON}]}}"#));

        let dataset = repo.load().unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].factor.title, "Churn");
        assert!(dataset.records[0].opposing.critiques.is_empty());
        assert!(dataset.records[0].opposing.missing_context.is_empty());
    }

    #[test]
    fn test_load_bare_array() {
        let dir = TempDir::new().unwrap();
        let repo = write(&dir, &format!("[{RECORD_JSON}, {RECORD_JSON}]"));

        assert_eq!(repo.load().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_dataset_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let repo = write(&dir, "[]");

        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let repo = JsonDatasetRepository::with_path(dir.path().join("absent.json"));

        assert!(matches!(repo.load(), Err(PrizmError::Io { .. })));
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let repo = write(&dir, r#"{"records": [{"factor": 3}]}"#);

        assert!(matches!(repo.load(), Err(PrizmError::Serialization { .. })));
    }

    #[test]
    fn test_save_then_load_builtin() {
        let dir = TempDir::new().unwrap();
        let repo = JsonDatasetRepository::with_path(dir.path().join("builtin.json"));

        repo.save(&builtin_dataset()).unwrap();
        assert_eq!(repo.load().unwrap(), builtin_dataset());
    }
}
