//! Session domain model.
//!
//! A session is one user-initiated analysis conversation. It owns exactly
//! one transcript, which only ever grows by appending.

use super::message::Message;
use crate::delivery::DeliveryStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of prompt characters kept in a derived title.
pub const TITLE_MAX_CHARS: usize = 30;

/// Ordered, append-only message history of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the end of the transcript.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Represents an analysis session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session title, fixed at creation
    pub title: String,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
    /// Name of the document attached to the initiating request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_name: Option<String>,
    /// Message history
    pub transcript: Transcript,
}

impl Session {
    pub fn new(
        id: String,
        title: String,
        created_at: DateTime<Utc>,
        attachment_name: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            created_at,
            attachment_name,
            transcript: Transcript::new(),
        }
    }
}

/// Derives a session title from the initiating request.
///
/// The prompt wins when it is not blank: its first [`TITLE_MAX_CHARS`]
/// characters, with `...` appended when truncated. Otherwise the attachment
/// name is used.
pub fn derive_title(prompt: &str, attachment_name: Option<&str>) -> String {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return attachment_name.unwrap_or_default().to_string();
    }

    let mut title: String = prompt.chars().take(TITLE_MAX_CHARS).collect();
    if prompt.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

/// Lightweight listing entry for a session (sidebar "Recent" list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub message_count: usize,
    pub delivery_status: Option<DeliveryStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_short_prompt() {
        assert_eq!(derive_title("  Assess risk ", None), "Assess risk");
    }

    #[test]
    fn test_title_truncates_long_prompt() {
        let prompt = "Evaluate the long-term viability of the new supplier contract";
        let title = derive_title(prompt, Some("contract.pdf"));
        assert_eq!(title, "Evaluate the long-term viabili...");
    }

    #[test]
    fn test_title_falls_back_to_attachment() {
        assert_eq!(derive_title("   ", Some("report.pdf")), "report.pdf");
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        let prompt = "é".repeat(31);
        let title = derive_title(&prompt, None);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
    }
}
