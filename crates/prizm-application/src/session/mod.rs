//! Session management for the application layer.

mod controller;
mod store;

pub use controller::SessionLifecycleController;
pub use store::SessionStore;
