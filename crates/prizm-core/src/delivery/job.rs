//! Delivery job model.

use crate::session::MessagePayload;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a delivery job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Running,
    Cancelled,
    Completed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobState::Running)
    }
}

/// Delivery status of a session as seen by presentation layers.
///
/// `Scheduled` covers the window between session creation and the start of
/// playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Scheduled,
    Running,
    Completed,
    Cancelled,
}

impl DeliveryStatus {
    /// True while messages may still be appended.
    pub fn is_active(&self) -> bool {
        matches!(self, DeliveryStatus::Scheduled | DeliveryStatus::Running)
    }
}

impl From<JobState> for DeliveryStatus {
    fn from(state: JobState) -> Self {
        match state {
            JobState::Running => DeliveryStatus::Running,
            JobState::Cancelled => DeliveryStatus::Cancelled,
            JobState::Completed => DeliveryStatus::Completed,
        }
    }
}

/// The playback of a compiled script into one session's transcript.
///
/// The queue holds the whole script; `cursor` is the index of the next
/// payload to emit. A job only moves forward: `Running` to either
/// `Completed` (after the last payload) or `Cancelled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryJob {
    id: String,
    session_id: String,
    queue: Vec<MessagePayload>,
    cursor: usize,
    state: JobState,
}

impl DeliveryJob {
    /// Creates a running job bound to `session_id`.
    pub fn new(session_id: impl Into<String>, queue: Vec<MessagePayload>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            queue,
            cursor: 0,
            state: JobState::Running,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn queue(&self) -> &[MessagePayload] {
        &self.queue
    }

    /// Number of payloads not yet emitted.
    pub fn remaining(&self) -> usize {
        self.queue.len() - self.cursor
    }

    /// Takes the next payload and advances the cursor.
    ///
    /// Returns `None` once the job is no longer running. Taking the final
    /// payload marks the job completed.
    pub fn advance(&mut self) -> Option<MessagePayload> {
        if self.state != JobState::Running {
            return None;
        }

        let Some(payload) = self.queue.get(self.cursor).cloned() else {
            self.state = JobState::Completed;
            return None;
        };

        self.cursor += 1;
        if self.cursor == self.queue.len() {
            self.state = JobState::Completed;
        }
        Some(payload)
    }

    /// Marks a running job cancelled.
    ///
    /// Returns `true` if this call changed the state. Cancelling a job that
    /// already finished is a no-op.
    pub fn cancel(&mut self) -> bool {
        if self.state == JobState::Running {
            self.state = JobState::Cancelled;
            true
        } else {
            false
        }
    }
}
