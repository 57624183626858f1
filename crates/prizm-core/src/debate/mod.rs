//! Debate domain module.
//!
//! # Module Structure
//!
//! - `record`: Dataset schema (`DebateRecord`, `DebateDataset`, ...)
//! - `compiler`: Record-to-script expansion (`compile`)
//! - `builtin`: Demo dataset shipped with the application
//! - `repository`: Dataset source trait (`DatasetRepository`)

mod builtin;
mod compiler;
mod record;
mod repository;

pub use builtin::builtin_dataset;
pub use compiler::{MESSAGES_PER_RECORD, compile, completion_marker, script_len};
pub use record::{
    Critique, DebateDataset, DebateRecord, Factor, OpposingArgument, SupportiveArgument,
};
pub use repository::{DatasetRepository, StaticDatasetRepository};
