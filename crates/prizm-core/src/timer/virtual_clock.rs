use super::{Timer, TimerCallback, TimerHandle};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

struct Scheduled {
    handle: TimerHandle,
    callback: TimerCallback,
}

struct ClockState {
    origin: DateTime<Utc>,
    elapsed: Duration,
    next_seq: u64,
    // Keyed by (due time, scheduling order) so equal deadlines fire FIFO.
    queue: BTreeMap<(Duration, u64), Scheduled>,
}

/// A manually advanced clock.
///
/// Time only moves when [`VirtualClock::advance`] is called. Callbacks fire
/// in due-time order, ties broken by scheduling order, and callbacks that
/// schedule further work during an advance see that work fire in the same
/// advance when it falls due.
#[derive(Clone)]
pub struct VirtualClock {
    state: Arc<Mutex<ClockState>>,
}

impl VirtualClock {
    /// Creates a clock whose `now()` starts at the current wall-clock time.
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(origin: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ClockState {
                origin,
                elapsed: Duration::ZERO,
                next_seq: 0,
                queue: BTreeMap::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed
    }

    /// Number of scheduled callbacks that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        self.lock()
            .queue
            .values()
            .filter(|s| !s.handle.is_cancelled())
            .count()
    }

    /// Moves time forward by `by`, firing every callback that falls due.
    ///
    /// Returns the number of callbacks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().elapsed + by;
        let mut fired = 0;

        loop {
            let next = {
                let mut state = self.lock();
                let due = state
                    .queue
                    .first_key_value()
                    .map(|(key, _)| *key)
                    .filter(|(at, _)| *at <= target);

                match due {
                    Some(key) => {
                        state.elapsed = key.0;
                        state.queue.remove(&key)
                    }
                    None => {
                        state.elapsed = target;
                        None
                    }
                }
            };

            // The lock is released here so callbacks can schedule more work.
            let Some(scheduled) = next else { break };
            if !scheduled.handle.is_cancelled() {
                (scheduled.callback)();
                fired += 1;
            }
        }

        fired
    }

    /// Advances until nothing is left to run, at most `max_steps` callbacks.
    ///
    /// Returns the number of callbacks that ran.
    pub fn run_until_idle(&self, max_steps: usize) -> usize {
        let mut fired = 0;
        while fired < max_steps {
            let next_due = {
                let state = self.lock();
                state
                    .queue
                    .iter()
                    .find(|(_, s)| !s.handle.is_cancelled())
                    .map(|((at, _), _)| *at)
                    .map(|at| at.saturating_sub(state.elapsed))
            };
            let Some(wait) = next_due else { break };
            fired += self.advance(wait);
        }
        fired
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for VirtualClock {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut state = self.lock();
        let key = (state.elapsed + delay, state.next_seq);
        state.next_seq += 1;
        state.queue.insert(
            key,
            Scheduled {
                handle: handle.clone(),
                callback,
            },
        );
        handle
    }

    fn now(&self) -> DateTime<Utc> {
        let state = self.lock();
        let elapsed =
            chrono::Duration::from_std(state.elapsed).unwrap_or_else(|_| chrono::Duration::zero());
        state.origin + elapsed
    }
}
