use crate::session::SessionStore;
use prizm_core::delivery::{DeliveryJob, DeliveryStatus, JobState};
use prizm_core::error::{PrizmError, Result};
use prizm_core::session::{Message, MessagePayload};
use prizm_core::timer::{Timer, TimerHandle};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

struct Playback {
    job: DeliveryJob,
    /// The tick scheduled next, if any
    pending: Option<TimerHandle>,
}

/// Shared handle to a job being played back.
///
/// Clones refer to the same job. The handle is how callers observe and
/// cancel a playback.
#[derive(Clone)]
pub struct DeliveryHandle {
    playback: Arc<Mutex<Playback>>,
    job_id: String,
    session_id: String,
}

impl DeliveryHandle {
    fn lock(&self) -> MutexGuard<'_, Playback> {
        self.playback.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> JobState {
        self.lock().job.state()
    }

    /// Index of the next payload to emit.
    pub fn cursor(&self) -> usize {
        self.lock().job.cursor()
    }

    pub fn remaining(&self) -> usize {
        self.lock().job.remaining()
    }
}

impl std::fmt::Debug for DeliveryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryHandle")
            .field("job_id", &self.job_id)
            .field("session_id", &self.session_id)
            .field("state", &self.state())
            .finish()
    }
}

/// Plays delivery jobs back into session transcripts at a fixed cadence.
///
/// Each tick emits exactly one payload and schedules the next tick, so a
/// job's messages are appended strictly in compiled order. Jobs for
/// different sessions are independent tick chains.
#[derive(Clone)]
pub struct DeliveryScheduler {
    store: SessionStore,
    timer: Arc<dyn Timer>,
    interval: Duration,
}

impl std::fmt::Debug for DeliveryScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryScheduler")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl DeliveryScheduler {
    /// Creates a scheduler emitting one message every `interval`.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if `interval` is zero.
    pub fn new(store: SessionStore, timer: Arc<dyn Timer>, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(PrizmError::config("delivery interval must be positive"));
        }
        Ok(Self {
            store,
            timer,
            interval,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Begins playback of `job`.
    ///
    /// The first message is emitted one interval from now.
    pub fn start(&self, job: DeliveryJob) -> DeliveryHandle {
        let handle = DeliveryHandle {
            job_id: job.id().to_string(),
            session_id: job.session_id().to_string(),
            playback: Arc::new(Mutex::new(Playback { job, pending: None })),
        };

        if let Err(e) = self
            .store
            .set_delivery_status(&handle.session_id, DeliveryStatus::Running)
        {
            tracing::warn!(
                job_id = %handle.job_id,
                session_id = %handle.session_id,
                "[DeliveryScheduler] Starting job for unknown session: {}",
                e
            );
        }

        tracing::info!(
            job_id = %handle.job_id,
            session_id = %handle.session_id,
            queued = handle.remaining(),
            "[DeliveryScheduler] Playback started"
        );

        let mut playback = handle.lock();
        self.schedule_tick(&handle, &mut playback);
        drop(playback);

        handle
    }

    /// Cancels a playback.
    ///
    /// No tick scheduled after this call emits anything. Idempotent;
    /// cancelling a completed job leaves it completed.
    ///
    /// # Returns
    ///
    /// `true` if this call moved the job from running to cancelled.
    pub fn cancel(&self, handle: &DeliveryHandle) -> bool {
        let mut playback = handle.lock();
        if let Some(pending) = playback.pending.take() {
            pending.cancel();
        }

        let cancelled = playback.job.cancel();
        if cancelled {
            let _ = self
                .store
                .set_delivery_status(&handle.session_id, DeliveryStatus::Cancelled);
            tracing::info!(
                job_id = %handle.job_id,
                session_id = %handle.session_id,
                cursor = playback.job.cursor(),
                "[DeliveryScheduler] Playback cancelled"
            );
        }
        cancelled
    }

    // Must be called with the playback lock held, so a tick firing early
    // cannot observe a stale `pending` slot.
    fn schedule_tick(&self, handle: &DeliveryHandle, playback: &mut Playback) {
        let scheduler = self.clone();
        let tick_handle = handle.clone();
        let timer_handle = self
            .timer
            .schedule(self.interval, Box::new(move || scheduler.tick(&tick_handle)));
        playback.pending = Some(timer_handle);
    }

    fn tick(&self, handle: &DeliveryHandle) {
        let mut playback = handle.lock();
        playback.pending = None;

        if playback.job.state() != JobState::Running {
            return;
        }

        if !self.store.contains(&handle.session_id) {
            playback.job.cancel();
            tracing::warn!(
                job_id = %handle.job_id,
                session_id = %handle.session_id,
                "[DeliveryScheduler] Session disappeared, stopping playback"
            );
            return;
        }

        // An empty queue completes on its first tick without emitting.
        if let Some(payload) = playback.job.advance() {
            self.emit(handle, &playback.job, payload);
        }

        match playback.job.state() {
            JobState::Running => self.schedule_tick(handle, &mut playback),
            JobState::Completed => {
                let _ = self
                    .store
                    .set_delivery_status(&handle.session_id, DeliveryStatus::Completed);
                tracing::info!(
                    job_id = %handle.job_id,
                    session_id = %handle.session_id,
                    delivered = playback.job.cursor(),
                    "[DeliveryScheduler] Playback completed"
                );
            }
            JobState::Cancelled => {}
        }
    }

    fn emit(&self, handle: &DeliveryHandle, job: &DeliveryJob, payload: MessagePayload) {
        let role = payload.role;
        let message = Message::from_payload(
            payload,
            uuid::Uuid::new_v4().to_string(),
            self.timer.now(),
        );
        match self.store.append(&handle.session_id, message) {
            Ok(len) => tracing::debug!(
                job_id = %handle.job_id,
                session_id = %handle.session_id,
                role = %role,
                cursor = job.cursor(),
                transcript_len = len,
                "[DeliveryScheduler] Message delivered"
            ),
            Err(e) => tracing::warn!(
                job_id = %handle.job_id,
                session_id = %handle.session_id,
                "[DeliveryScheduler] Append failed: {}",
                e
            ),
        }
    }
}
