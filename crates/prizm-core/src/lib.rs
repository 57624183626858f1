//! Domain layer of Prizm.
//!
//! Sessions and their transcripts, the debate dataset schema and its script
//! compiler, the delivery job model, and the timer abstraction every
//! scheduled behavior is built on.

pub mod config;
pub mod debate;
pub mod delivery;
pub mod error;
pub mod session;
pub mod timer;
pub mod user;

// Re-export common error type
pub use error::{PrizmError, Result};
