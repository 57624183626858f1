//! Delivery scheduling.
//!
//! The scheduler is built purely on the [`prizm_core::timer::Timer`]
//! primitive: every tick is a scheduled callback, and cancelling a playback
//! cancels the pending callback.

mod scheduler;

pub use scheduler::{DeliveryHandle, DeliveryScheduler};
