//! Attachment reference handed over by the upload boundary.

use std::path::Path;

/// Extensions the upload widget accepts. The core does not enforce these.
pub const SUPPORTED_ATTACHMENT_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

/// A document attached to an analysis request.
///
/// Only `name` is ever read by the core; `bytes` are carried for
/// collaborators that actually parse documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Builds an attachment reference that carries no content.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// Returns true when the file name carries one of the supported extensions.
pub fn is_supported_attachment(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_ATTACHMENT_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_attachment("report.pdf"));
        assert!(is_supported_attachment("Quarterly.DOCX"));
        assert!(is_supported_attachment("notes.txt"));
        assert!(!is_supported_attachment("image.png"));
        assert!(!is_supported_attachment("README"));
    }
}
