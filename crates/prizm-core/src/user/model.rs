//! UserProfile domain model.

use serde::{Deserialize, Serialize};

/// The authenticated user, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User's display nickname
    pub nickname: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            nickname: "You".to_string(),
        }
    }
}
