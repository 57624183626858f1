//! User service boundary.
//!
//! Credential validation belongs to an external identity provider. The core
//! only asks whether someone is signed in before exposing the session UI.

use super::model::UserProfile;
use crate::error::{PrizmError, Result};

/// Service reporting the currently authenticated user.
pub trait UserService: Send + Sync {
    /// Returns the signed-in user, or `None` when nobody is authenticated.
    fn current_user(&self) -> Option<UserProfile>;

    /// Returns the signed-in user or fails with `Unauthenticated`.
    fn require_user(&self) -> Result<UserProfile> {
        self.current_user().ok_or(PrizmError::Unauthenticated)
    }
}

/// User service with a fixed answer.
#[derive(Debug, Clone, Default)]
pub struct StaticUserService {
    user: Option<UserProfile>,
}

impl StaticUserService {
    pub fn signed_in(user: UserProfile) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

impl UserService for StaticUserService {
    fn current_user(&self) -> Option<UserProfile> {
        self.user.clone()
    }
}
