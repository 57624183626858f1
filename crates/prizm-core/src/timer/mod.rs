//! Scheduled-task abstraction.
//!
//! Everything time-driven in Prizm is built on one primitive: run a callback
//! after a delay, and hand back a handle that can cancel it. Production code
//! backs this with tokio; tests use [`VirtualClock`] so no test ever sleeps
//! on the wall clock.

mod virtual_clock;

pub use virtual_clock::VirtualClock;

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Work run when a scheduled delay elapses.
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Cancellation handle for a scheduled callback.
///
/// Cancelling guarantees the callback never runs if it has not started yet.
/// Clones share the same underlying token.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The token backing this handle, for timers that await cancellation.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// A clock that can run callbacks after a delay.
pub trait Timer: Send + Sync {
    /// Schedules `callback` to run once `delay` has elapsed.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Current time according to this timer.
    fn now(&self) -> DateTime<Utc>;
}
