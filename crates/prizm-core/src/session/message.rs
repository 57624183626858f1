//! Transcript message types.
//!
//! This module contains the closed set of message roles and the message
//! shapes that flow through a transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The role of a message in a debate transcript.
///
/// The set is closed: every role has exactly one entry in the layout table
/// (see [`super::layout::RoleStyle`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageRole {
    /// Message submitted by the user.
    User,
    /// Factor extraction turn.
    Extractor,
    /// Argument in favour of the factor.
    Supportive,
    /// Critique of the supportive argument.
    Opposing,
    /// Synthesis weighing both sides.
    Synthesizer,
    /// Synthetic final message ending a playback.
    CompletionMarker,
}

impl MessageRole {
    /// Roles of the four messages a single debate record expands to, in order.
    pub const DEBATE_CYCLE: [MessageRole; 4] = [
        MessageRole::Extractor,
        MessageRole::Supportive,
        MessageRole::Opposing,
        MessageRole::Synthesizer,
    ];

    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Extractor => "extractor",
            MessageRole::Supportive => "supportive",
            MessageRole::Opposing => "opposing",
            MessageRole::Synthesizer => "synthesizer",
            MessageRole::CompletionMarker => "completion-marker",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message before it has been delivered.
///
/// Payloads carry only role and body; the delivery scheduler assigns the
/// id and timestamp at emission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The message text. May embed markup that the core never interprets.
    pub body: String,
}

impl MessagePayload {
    pub fn new(role: MessageRole, body: impl Into<String>) -> Self {
        Self {
            role,
            body: body.into(),
        }
    }
}

/// A delivered message in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier, unique within its transcript.
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The message text.
    pub body: String,
    /// When the message was appended.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Materializes a payload into a delivered message.
    pub fn from_payload(payload: MessagePayload, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            role: payload.role,
            body: payload.body,
            created_at,
        }
    }

    /// Returns the role and body of this message as a payload.
    pub fn payload(&self) -> MessagePayload {
        MessagePayload::new(self.role, self.body.clone())
    }
}
