//! Transcript export.
//!
//! Writes a session as a machine-readable JSON document or as a Markdown
//! decision report.

use crate::dto::TranscriptExportDto;
use chrono::{DateTime, Utc};
use prizm_core::error::{PrizmError, Result};
use prizm_core::session::{MessageRole, RoleStyle, Session};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    /// Picks the format from a file extension (`json`, `md`, `markdown`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("md") | Some("markdown") => Ok(Self::Markdown),
            _ => Err(PrizmError::invalid_request(format!(
                "Unsupported export format for {:?} (expected .json or .md)",
                path
            ))),
        }
    }
}

/// Renders sessions to export documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptExporter;

impl TranscriptExporter {
    pub fn new() -> Self {
        Self
    }

    /// Writes `session` to `path`, choosing the format from its extension.
    pub fn export(&self, session: &Session, path: &Path) -> Result<ExportFormat> {
        let format = ExportFormat::from_path(path)?;
        let content = self.render(session, format, Utc::now())?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content).map_err(|e| {
            PrizmError::io(format!("Failed to write export at {:?}: {}", path, e))
        })?;

        tracing::info!(
            session_id = %session.id,
            path = ?path,
            format = ?format,
            messages = session.transcript.len(),
            "[TranscriptExporter] Exported transcript"
        );
        Ok(format)
    }

    pub fn render(
        &self,
        session: &Session,
        format: ExportFormat,
        exported_at: DateTime<Utc>,
    ) -> Result<String> {
        match format {
            ExportFormat::Json => self.render_json(session, exported_at),
            ExportFormat::Markdown => Ok(self.render_markdown(session, exported_at)),
        }
    }

    pub fn render_json(&self, session: &Session, exported_at: DateTime<Utc>) -> Result<String> {
        Ok(serde_json::to_string_pretty(&TranscriptExportDto::new(
            session,
            exported_at,
        ))?)
    }

    /// Renders the decision report.
    ///
    /// A transcript that does not end with the completion marker is reported
    /// as partial.
    pub fn render_markdown(&self, session: &Session, exported_at: DateTime<Utc>) -> String {
        let messages = session.transcript.messages();
        let factors = messages
            .iter()
            .filter(|m| m.role == MessageRole::Extractor)
            .count();
        let complete = session
            .transcript
            .last()
            .is_some_and(|m| m.role == MessageRole::CompletionMarker);

        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "# Decision report: {}\n", session.title);
        let _ = writeln!(out, "- **Session:** `{}`", session.id);
        let _ = writeln!(out, "- **Created:** {}", session.created_at.to_rfc3339());
        if let Some(name) = &session.attachment_name {
            let _ = writeln!(out, "- **Attachment:** {}", name);
        }
        let _ = writeln!(out, "- **Factors debated:** {}", factors);
        let _ = writeln!(
            out,
            "- **Status:** {}",
            if complete { "complete" } else { "partial" }
        );
        let _ = writeln!(out, "- **Exported:** {}\n", exported_at.to_rfc3339());
        let _ = writeln!(out, "## Transcript");

        for message in messages {
            let style = RoleStyle::of(message.role);
            let _ = writeln!(
                out,
                "\n### {} ({})\n\n{}",
                style.label,
                message.created_at.format("%H:%M:%S"),
                message.body
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use prizm_core::debate::{builtin_dataset, compile};
    use prizm_core::session::Message;
    use tempfile::TempDir;

    fn at(seconds: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, seconds).unwrap()
    }

    fn completed_session() -> Session {
        let mut session = Session::new(
            "s1".to_string(),
            "Assess risk".to_string(),
            at(0),
            Some("q3.pdf".to_string()),
        );
        session.transcript.append(Message {
            id: "m0".to_string(),
            role: MessageRole::User,
            body: "Assess risk".to_string(),
            created_at: at(0),
        });
        for (i, payload) in compile(&builtin_dataset().records).into_iter().enumerate() {
            session.transcript.append(Message::from_payload(
                payload,
                format!("m{}", i + 1),
                at(i as u32 + 1),
            ));
        }
        session
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.JSON")).unwrap(),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.md")).unwrap(),
            ExportFormat::Markdown
        );
        assert!(ExportFormat::from_path(Path::new("out.pdf")).is_err());
        assert!(ExportFormat::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_json_export_shape() {
        let session = completed_session();
        let json = TranscriptExporter::new()
            .render_json(&session, at(30))
            .unwrap();
        let dto: TranscriptExportDto = serde_json::from_str(&json).unwrap();

        assert_eq!(dto.exported_at, at(30));
        assert_eq!(dto.session.id, "s1");
        assert_eq!(dto.session.attachment_name.as_deref(), Some("q3.pdf"));
        assert_eq!(dto.messages.len(), 10);
        assert_eq!(dto.messages[0].label, "You");
        assert_eq!(dto.messages[9].role, MessageRole::CompletionMarker);
    }

    #[test]
    fn test_markdown_report_for_complete_session() {
        let report = TranscriptExporter::new().render_markdown(&completed_session(), at(30));

        assert!(report.starts_with("# Decision report: Assess risk\n"));
        assert!(report.contains("- **Attachment:** q3.pdf"));
        assert!(report.contains("- **Factors debated:** 2"));
        assert!(report.contains("- **Status:** complete"));
        assert_eq!(report.matches("\n### ").count(), 10);
        assert!(report.contains("### Synthesizer (09:00:04)"));
    }

    #[test]
    fn test_markdown_report_for_partial_session() {
        let mut session = Session::new("s2".to_string(), "Partial".to_string(), at(0), None);
        session.transcript.append(Message {
            id: "m0".to_string(),
            role: MessageRole::User,
            body: "Partial".to_string(),
            created_at: at(0),
        });

        let report = TranscriptExporter::new().render_markdown(&session, at(1));
        assert!(report.contains("- **Status:** partial"));
        assert!(!report.contains("Attachment"));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exports").join("session.md");

        let format = TranscriptExporter::new()
            .export(&completed_session(), &path)
            .unwrap();

        assert_eq!(format, ExportFormat::Markdown);
        assert!(fs::read_to_string(&path).unwrap().contains("Decision report"));
    }
}
