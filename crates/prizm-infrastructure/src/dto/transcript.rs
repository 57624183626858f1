use chrono::{DateTime, Utc};
use prizm_core::session::{Message, MessageRole, RoleStyle, Session};
use serde::{Deserialize, Serialize};

/// Root of an exported transcript file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptExportDto {
    pub exported_at: DateTime<Utc>,
    pub session: ExportedSessionDto,
    pub messages: Vec<ExportedMessageDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedSessionDto {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedMessageDto {
    pub id: String,
    pub role: MessageRole,
    /// Display label of the role at export time
    pub label: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Session> for ExportedSessionDto {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            title: session.title.clone(),
            created_at: session.created_at,
            attachment_name: session.attachment_name.clone(),
        }
    }
}

impl From<&Message> for ExportedMessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            role: message.role,
            label: RoleStyle::of(message.role).label.to_string(),
            body: message.body.clone(),
            created_at: message.created_at,
        }
    }
}

impl TranscriptExportDto {
    pub fn new(session: &Session, exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at,
            session: session.into(),
            messages: session
                .transcript
                .messages()
                .iter()
                .map(ExportedMessageDto::from)
                .collect(),
        }
    }
}
