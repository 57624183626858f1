//! Read-only transcript views for presentation layers.

use crate::session::SessionStore;
use prizm_core::delivery::DeliveryStatus;
use prizm_core::session::{Alignment, Message, RoleStyle, Session, SessionSummary};
use serde::Serialize;

/// A message joined with its role's layout entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMessage {
    pub message: Message,
    pub alignment: Alignment,
    pub label: &'static str,
    pub accent: &'static str,
}

impl From<Message> for RenderedMessage {
    fn from(message: Message) -> Self {
        let style = RoleStyle::of(message.role);
        Self {
            message,
            alignment: style.alignment,
            label: style.label,
            accent: style.accent,
        }
    }
}

/// Read-only accessor over the session store.
///
/// Reads are snapshots: while a playback is running, successive calls see a
/// growing prefix of the same sequence, never a shorter or reordered one.
#[derive(Clone)]
pub struct TranscriptProjection {
    store: SessionStore,
}

impl TranscriptProjection {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Ordered messages of a session. Unknown sessions yield an empty list.
    pub fn messages_for(&self, session_id: &str) -> Vec<Message> {
        self.store.messages(session_id)
    }

    /// Messages appended after the first `offset` ones, for incremental polling.
    pub fn messages_since(&self, session_id: &str, offset: usize) -> Vec<Message> {
        self.store.messages_since(session_id, offset)
    }

    /// Messages of a session with their layout attached.
    pub fn rendered_for(&self, session_id: &str) -> Vec<RenderedMessage> {
        self.messages_for(session_id)
            .into_iter()
            .map(RenderedMessage::from)
            .collect()
    }

    pub fn delivery_status(&self, session_id: &str) -> Option<DeliveryStatus> {
        self.store.delivery_status(session_id)
    }

    /// True while messages may still be appended to the session.
    pub fn is_delivering(&self, session_id: &str) -> bool {
        self.delivery_status(session_id)
            .is_some_and(|status| status.is_active())
    }

    /// A snapshot of the whole session, transcript included.
    pub fn session(&self, session_id: &str) -> Option<Session> {
        self.store.session(session_id)
    }

    /// All sessions, newest first.
    pub fn sessions(&self) -> Vec<SessionSummary> {
        self.store.list()
    }
}
