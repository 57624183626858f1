use prizm_core::debate::{DebateDataset, DebateRecord};
use serde::{Deserialize, Serialize};

/// A dataset file.
///
/// Accepts both `{"records": [...]}` and a bare array of records. Always
/// written in the wrapped form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetFileDto {
    Wrapped { records: Vec<DebateRecord> },
    Bare(Vec<DebateRecord>),
}

impl From<DatasetFileDto> for DebateDataset {
    fn from(dto: DatasetFileDto) -> Self {
        match dto {
            DatasetFileDto::Wrapped { records } | DatasetFileDto::Bare(records) => {
                DebateDataset::new(records)
            }
        }
    }
}

impl From<&DebateDataset> for DatasetFileDto {
    fn from(dataset: &DebateDataset) -> Self {
        DatasetFileDto::Wrapped {
            records: dataset.records.clone(),
        }
    }
}
