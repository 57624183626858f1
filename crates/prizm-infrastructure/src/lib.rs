//! Infrastructure layer for Prizm.
//!
//! Filesystem-backed implementations of the core boundaries (config, user,
//! dataset), the tokio timer, and transcript export.

pub mod config_service;
pub mod dto;
pub mod exporter;
pub mod json_dataset_repository;
pub mod paths;
pub mod tokio_timer;
pub mod user_service;

pub use crate::config_service::ConfigService;
pub use crate::exporter::{ExportFormat, TranscriptExporter};
pub use crate::json_dataset_repository::JsonDatasetRepository;
pub use crate::paths::PrizmPaths;
pub use crate::tokio_timer::TokioTimer;
pub use crate::user_service::ConfigBasedUserService;
