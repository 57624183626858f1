//! Session domain module.
//!
//! This module contains all session-related domain models.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`, `Transcript`)
//! - `message`: Transcript message types (`MessageRole`, `Message`, `MessagePayload`)
//! - `layout`: Role-to-layout dispatch table (`RoleStyle`, `Alignment`)
//! - `attachment`: Attachment reference and extension policy
//! - `view`: Active view state (`ActiveView`)
//!
//! # Usage
//!
//! ```ignore
//! use prizm_core::session::{Session, Transcript, SessionSummary};
//! use prizm_core::session::{MessageRole, Message, MessagePayload};
//! ```

mod attachment;
mod layout;
mod message;
mod model;
mod view;

// Re-export public API
pub use attachment::{Attachment, SUPPORTED_ATTACHMENT_EXTENSIONS, is_supported_attachment};
pub use layout::{Alignment, RoleStyle};
pub use message::{Message, MessagePayload, MessageRole};
pub use model::{Session, SessionSummary, TITLE_MAX_CHARS, Transcript, derive_title};
pub use view::ActiveView;
