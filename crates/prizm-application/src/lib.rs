//! Application layer for Prizm.
//!
//! This crate wires the domain types from `prizm-core` into running
//! behavior: the session store, the lifecycle controller that starts and
//! switches analyses, the delivery scheduler that plays compiled scripts
//! back on a timer, and the read-only projection presentation layers poll.

pub mod delivery;
pub mod projection;
pub mod session;

pub use delivery::{DeliveryHandle, DeliveryScheduler};
pub use projection::{RenderedMessage, TranscriptProjection};
pub use session::{SessionLifecycleController, SessionStore};
