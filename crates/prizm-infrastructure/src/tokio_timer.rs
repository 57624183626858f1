//! Tokio-backed timer.

use chrono::{DateTime, Utc};
use prizm_core::error::{PrizmError, Result};
use prizm_core::timer::{Timer, TimerCallback, TimerHandle};
use std::time::Duration;
use tokio::runtime::Handle;

/// Runs scheduled callbacks on a tokio runtime.
///
/// Each scheduled callback is a spawned task racing `tokio::time::sleep`
/// against its cancellation token. Callbacks run on a runtime worker and must
/// not block.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    /// Creates a timer on the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` error when called outside a tokio runtime.
    pub fn current() -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| PrizmError::internal(format!("No tokio runtime: {}", e)))?;
        Ok(Self { runtime })
    }

    pub fn with_handle(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Timer for TokioTimer {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle::new();
        let token = handle.token().clone();

        self.runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if !token.is_cancelled() {
                        callback();
                    }
                }
            }
        });

        handle
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
