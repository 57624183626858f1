use anyhow::{Context, Result, bail};
use prizm_core::config::PrizmConfig;
use prizm_core::debate::{DatasetRepository, StaticDatasetRepository, builtin_dataset};
use prizm_core::session::{Attachment, SUPPORTED_ATTACHMENT_EXTENSIONS, is_supported_attachment};
use prizm_infrastructure::{ConfigService, ExportFormat, JsonDatasetRepository};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Builds the config service for `--config`, or the default path.
pub fn config_service(path: Option<&Path>) -> Result<ConfigService> {
    match path {
        Some(path) => Ok(ConfigService::with_path(path)),
        None => ConfigService::new().context("Failed to resolve config path"),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<PrizmConfig> {
    let service = config_service(path)?;
    service
        .get_config()
        .with_context(|| format!("Failed to load config from {:?}", service.path()))
}

/// Selects the dataset source: an explicit file, then the configured file,
/// then the builtin dataset.
pub fn dataset_repository(
    explicit: Option<&Path>,
    config: &PrizmConfig,
) -> Arc<dyn DatasetRepository> {
    let path: Option<PathBuf> = explicit
        .map(Path::to_path_buf)
        .or_else(|| config.dataset.path.clone());

    match path {
        Some(path) => Arc::new(JsonDatasetRepository::with_path(path)),
        None => Arc::new(StaticDatasetRepository::new(builtin_dataset())),
    }
}

/// Reads an attachment from disk, enforcing the upload extension policy.
pub fn read_attachment(path: &Path) -> Result<Attachment> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid attachment path {:?}", path))?;

    if !is_supported_attachment(name) {
        bail!(
            "Unsupported attachment {:?}; expected one of: {}",
            name,
            SUPPORTED_ATTACHMENT_EXTENSIONS.join(", ")
        );
    }

    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    Ok(Attachment::new(name, bytes))
}

/// Checks an `--export` target up front, so a bad extension fails before
/// any playback runs.
pub fn check_export_path(path: Option<&Path>) -> Result<Option<ExportFormat>> {
    path.map(|path| {
        ExportFormat::from_path(path)
            .with_context(|| format!("Cannot export transcript to {:?}", path))
    })
    .transpose()
}
