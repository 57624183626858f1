//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` (by default
//! `~/.config/prizm/config.toml`) and caches it.

use crate::paths::PrizmPaths;
use prizm_core::config::PrizmConfig;
use prizm_core::error::{PrizmError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// A missing or empty file yields the default configuration. A file that
/// exists but cannot be parsed, or that holds invalid settings, is an error.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<PrizmConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config path.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the config directory cannot be resolved.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(PrizmPaths::config_file()?))
    }

    /// Creates a service reading a custom config path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading it from file if not cached.
    pub fn get_config(&self) -> Result<PrizmConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = load_config(&self.path)?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Writes `config` to the service's path, creating parent directories.
    pub fn save(&self, config: &PrizmConfig) -> Result<()> {
        config.validate()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PrizmError::io(format!(
                    "Failed to create config directory at {:?}: {}",
                    parent, e
                ))
            })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content).map_err(|e| {
            PrizmError::io(format!(
                "Failed to write config file at {:?}: {}",
                self.path, e
            ))
        })?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        tracing::debug!(path = ?self.path, "[ConfigService] Saved config");
        Ok(())
    }
}

/// Reads and validates a configuration file.
///
/// # Returns
///
/// - `Ok(PrizmConfig)`: The parsed configuration, or the defaults if the file
///   does not exist or is empty
/// - `Err(PrizmError)`: The file could not be read or parsed, or holds
///   invalid settings
pub fn load_config(path: &Path) -> Result<PrizmConfig> {
    if !path.exists() {
        tracing::debug!(path = ?path, "[ConfigService] No config file, using defaults");
        return Ok(PrizmConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        PrizmError::io(format!("Failed to read config file at {:?}: {}", path, e))
    })?;

    if content.trim().is_empty() {
        return Ok(PrizmConfig::default());
    }

    let config: PrizmConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
