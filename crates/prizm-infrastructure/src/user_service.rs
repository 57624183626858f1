//! Configuration-based user service implementation.

use crate::config_service::ConfigService;
use prizm_core::user::{UserProfile, UserService};

/// User service that reads the signed-in user from `config.toml`.
///
/// A blank nickname, or a config file that cannot be loaded, means nobody is
/// signed in.
#[derive(Debug, Clone)]
pub struct ConfigBasedUserService {
    config: ConfigService,
}

impl ConfigBasedUserService {
    pub fn new(config: ConfigService) -> Self {
        Self { config }
    }
}

impl UserService for ConfigBasedUserService {
    fn current_user(&self) -> Option<UserProfile> {
        let config = match self.config.get_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[ConfigBasedUserService] Failed to load config: {}", e);
                return None;
            }
        };

        let nickname = config.user.nickname.trim();
        if nickname.is_empty() {
            return None;
        }
        Some(UserProfile {
            nickname: nickname.to_string(),
        })
    }
}
