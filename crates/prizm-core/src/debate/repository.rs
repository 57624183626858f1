//! Dataset repository trait.

use super::record::DebateDataset;
use crate::error::Result;

/// An abstract source of debate datasets.
///
/// Decouples the application from where debate artifacts come from (a JSON
/// file today, a live pipeline later). Datasets are assumed pre-validated:
/// implementations only need to parse, not to check record contents.
pub trait DatasetRepository: Send + Sync {
    /// Loads the dataset.
    ///
    /// # Returns
    ///
    /// - `Ok(DebateDataset)`: The dataset (possibly empty)
    /// - `Err(_)`: The source could not be read or parsed
    fn load(&self) -> Result<DebateDataset>;
}

/// Repository serving a fixed, in-memory dataset.
#[derive(Debug, Clone, Default)]
pub struct StaticDatasetRepository {
    dataset: DebateDataset,
}

impl StaticDatasetRepository {
    pub fn new(dataset: DebateDataset) -> Self {
        Self { dataset }
    }
}

impl DatasetRepository for StaticDatasetRepository {
    fn load(&self) -> Result<DebateDataset> {
        Ok(self.dataset.clone())
    }
}
