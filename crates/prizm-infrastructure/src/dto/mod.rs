//! On-disk representations.
//!
//! DTOs decouple file formats from the domain model so either can change
//! without breaking the other.

mod dataset;
mod transcript;

pub use dataset::DatasetFileDto;
pub use transcript::{ExportedMessageDto, ExportedSessionDto, TranscriptExportDto};
