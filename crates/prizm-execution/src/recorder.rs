//! Collects captured flow entries and saves them.

use crate::flow_layer::{ExecutionFlowLayer, FlowEntry};
use prizm_core::error::{PrizmError, Result};
use std::fs;
use std::path::Path;
use tokio::sync::mpsc;

/// Receiving end of an [`ExecutionFlowLayer`].
///
/// Entries accumulate in the channel until [`FlowRecorder::drain`] moves
/// them into the recorder.
pub struct FlowRecorder {
    receiver: mpsc::UnboundedReceiver<FlowEntry>,
    entries: Vec<FlowEntry>,
}

impl FlowRecorder {
    /// Creates a layer and the recorder receiving its entries.
    pub fn channel() -> (ExecutionFlowLayer, FlowRecorder) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let recorder = FlowRecorder {
            receiver,
            entries: Vec::new(),
        };
        (ExecutionFlowLayer::new(sender), recorder)
    }

    /// Moves every entry currently in the channel into the recorder.
    ///
    /// Returns the number of entries moved.
    pub fn drain(&mut self) -> usize {
        let before = self.entries.len();
        while let Ok(entry) = self.receiver.try_recv() {
            self.entries.push(entry);
        }
        self.entries.len() - before
    }

    pub fn entries(&self) -> &[FlowEntry] {
        &self.entries
    }

    /// Drains pending entries and writes all of them as a JSON array.
    pub fn save(&mut self, path: &Path) -> Result<usize> {
        self.drain();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, content).map_err(|e| {
            PrizmError::io(format!("Failed to write execution flow at {:?}: {}", path, e))
        })?;

        Ok(self.entries.len())
    }
}
