//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User profile domain model
//! - `service`: User service trait and a static implementation

mod model;
mod service;

// Re-export public API
pub use model::UserProfile;
pub use service::{StaticUserService, UserService};
