//! Path management for Prizm configuration and output files.
//!
//! ```text
//! ~/.config/prizm/           # Config directory
//! └── config.toml            # Application configuration
//!
//! ~/.local/share/prizm/      # Data directory
//! ├── exports/               # Exported transcripts
//! └── logs/                  # Saved execution flows
//! ```

use prizm_core::error::{PrizmError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "prizm";

/// Resolves platform directories for Prizm.
pub struct PrizmPaths;

impl PrizmPaths {
    /// Returns the Prizm configuration directory (e.g. `~/.config/prizm/`).
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the platform config directory is unknown.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| PrizmError::config("Cannot find config directory"))
    }

    /// Returns the Prizm data directory (e.g. `~/.local/share/prizm/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| PrizmError::config("Cannot find data directory"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn exports_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("exports"))
    }

    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_config_dir() {
        // Platforms without a home directory have nothing to check
        let (Ok(dir), Ok(file)) = (PrizmPaths::config_dir(), PrizmPaths::config_file()) else {
            return;
        };
        assert!(dir.ends_with("prizm"));
        assert_eq!(file.parent(), Some(dir.as_path()));
        assert_eq!(file.file_name().and_then(|n| n.to_str()), Some("config.toml"));
    }

    #[test]
    fn test_output_dirs_live_in_data_dir() {
        let Ok(data) = PrizmPaths::data_dir() else {
            return;
        };
        assert_eq!(PrizmPaths::exports_dir().unwrap(), data.join("exports"));
        assert_eq!(PrizmPaths::logs_dir().unwrap(), data.join("logs"));
    }
}
