//! Application configuration model.
//!
//! The delivery interval and start delay are presentation tuning, not
//! behavioral contracts, so both live here rather than as constants.

use crate::error::{PrizmError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_INTERVAL_MS: u64 = 2500;
pub const DEFAULT_START_DELAY_MS: u64 = 500;

/// Playback tuning.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DeliverySettings {
    /// Time between two emitted messages.
    pub interval_ms: u64,
    /// Time between session creation and the start of playback.
    pub start_delay_ms: u64,
    /// Cancel the previously active session's playback when the user
    /// switches away from it or starts a new analysis.
    pub cancel_on_switch: bool,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            start_delay_ms: DEFAULT_START_DELAY_MS,
            cancel_on_switch: false,
        }
    }
}

impl DeliverySettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    /// Rejects settings the scheduler cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(PrizmError::config(
                "delivery.interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Where debate records come from.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DatasetSettings {
    /// JSON dataset file. `None` selects the builtin dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// The signed-in user, as far as the config file knows.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UserSettings {
    pub nickname: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            nickname: "You".to_string(),
        }
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PrizmConfig {
    pub delivery: DeliverySettings,
    pub dataset: DatasetSettings,
    pub user: UserSettings,
}

impl PrizmConfig {
    pub fn validate(&self) -> Result<()> {
        self.delivery.validate()
    }
}
