//! In-memory session store.

use prizm_core::delivery::DeliveryStatus;
use prizm_core::error::{PrizmError, Result};
use prizm_core::session::{Message, Session, SessionSummary};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct SessionEntry {
    session: Session,
    delivery: Option<DeliveryStatus>,
}

impl SessionEntry {
    fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.session.id.clone(),
            title: self.session.title.clone(),
            created_at: self.session.created_at,
            message_count: self.session.transcript.len(),
            delivery_status: self.delivery,
        }
    }
}

#[derive(Default)]
struct StoreState {
    sessions: HashMap<String, SessionEntry>,
    /// Session IDs in creation order
    order: Vec<String>,
}

/// Holds every session and its transcript.
///
/// `SessionStore` is a cheap, cloneable handle: clones share the same
/// sessions. It is passed explicitly to the controller, scheduler and
/// projection, so each test can build an isolated store.
///
/// Writers are the lifecycle controller (creates sessions, seeds the first
/// message) and the delivery scheduler (appends). Transcripts are
/// append-only.
#[derive(Clone, Default)]
pub struct SessionStore {
    state: Arc<RwLock<StoreState>>,
}

impl SessionStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation is a single insert or append, so a poisoned lock still
    // guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts a new session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if a session with the same ID already exists;
    /// the stored session and its transcript are left untouched.
    pub fn insert(&self, session: Session) -> Result<()> {
        let mut state = self.write();
        if state.sessions.contains_key(&session.id) {
            return Err(PrizmError::invalid_request(format!(
                "Session '{}' already exists",
                session.id
            )));
        }

        let id = session.id.clone();
        state.order.push(id.clone());
        state.sessions.insert(
            id,
            SessionEntry {
                session,
                delivery: None,
            },
        );
        Ok(())
    }

    /// Returns true if the store holds a session with this ID.
    pub fn contains(&self, session_id: &str) -> bool {
        self.read().sessions.contains_key(session_id)
    }

    /// Returns a copy of the session, transcript included.
    pub fn session(&self, session_id: &str) -> Option<Session> {
        self.read()
            .sessions
            .get(session_id)
            .map(|entry| entry.session.clone())
    }

    /// Appends a message to a session's transcript.
    ///
    /// # Returns
    ///
    /// The transcript length after the append.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the session does not exist.
    pub fn append(&self, session_id: &str, message: Message) -> Result<usize> {
        let mut state = self.write();
        let entry = state
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| PrizmError::not_found("Session", session_id))?;

        entry.session.transcript.append(message);
        Ok(entry.session.transcript.len())
    }

    /// Returns a snapshot of the session's transcript.
    ///
    /// Unknown sessions yield an empty sequence.
    pub fn messages(&self, session_id: &str) -> Vec<Message> {
        self.read()
            .sessions
            .get(session_id)
            .map(|entry| entry.session.transcript.messages().to_vec())
            .unwrap_or_default()
    }

    /// Returns the messages after the first `offset` ones.
    pub fn messages_since(&self, session_id: &str, offset: usize) -> Vec<Message> {
        self.read()
            .sessions
            .get(session_id)
            .map(|entry| {
                let messages = entry.session.transcript.messages();
                messages[offset.min(messages.len())..].to_vec()
            })
            .unwrap_or_default()
    }

    /// Number of messages in the session's transcript (0 for unknown sessions).
    pub fn message_count(&self, session_id: &str) -> usize {
        self.read()
            .sessions
            .get(session_id)
            .map(|entry| entry.session.transcript.len())
            .unwrap_or(0)
    }

    /// Records the delivery status of a session.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the session does not exist.
    pub fn set_delivery_status(&self, session_id: &str, status: DeliveryStatus) -> Result<()> {
        let mut state = self.write();
        let entry = state
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| PrizmError::not_found("Session", session_id))?;
        entry.delivery = Some(status);
        Ok(())
    }

    /// Returns the delivery status of a session, if playback was ever set up.
    pub fn delivery_status(&self, session_id: &str) -> Option<DeliveryStatus> {
        self.read()
            .sessions
            .get(session_id)
            .and_then(|entry| entry.delivery)
    }

    pub fn summary(&self, session_id: &str) -> Option<SessionSummary> {
        self.read().sessions.get(session_id).map(SessionEntry::summary)
    }

    /// Lists all sessions, newest first.
    pub fn list(&self) -> Vec<SessionSummary> {
        let state = self.read();
        state
            .order
            .iter()
            .rev()
            .filter_map(|id| state.sessions.get(id))
            .map(SessionEntry::summary)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().sessions.is_empty()
    }
}
