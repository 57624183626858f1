//! Delivery domain module.
//!
//! Contains the delivery job model and delivery status; the scheduler that
//! drives jobs lives in the application layer.

mod job;

pub use job::{DeliveryJob, DeliveryStatus, JobState};
