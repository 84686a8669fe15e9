//! In-memory dataset store, for tests and embedding.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::aggregation::DailySummary;
use crate::dataset::{Dataset, DatasetStore};
use crate::error::{Result, SigapError};

#[derive(Debug, Default)]
struct Stored {
    labeled: Option<Dataset>,
    summary: Option<DailySummary>,
}

/// A store holding its table in memory.
///
/// Clones share the same contents.
#[derive(Debug, Clone)]
pub struct MemoryDatasetStore {
    input: Arc<Mutex<Option<Dataset>>>,
    stored: Arc<Mutex<Stored>>,
}

impl MemoryDatasetStore {
    /// Create a store that serves `dataset` on load.
    pub fn new(dataset: Dataset) -> Self {
        MemoryDatasetStore {
            input: Arc::new(Mutex::new(Some(dataset))),
            stored: Arc::new(Mutex::new(Stored::default())),
        }
    }

    /// Create a store whose `load` fails, to exercise error paths.
    pub fn unavailable() -> Self {
        MemoryDatasetStore {
            input: Arc::new(Mutex::new(None)),
            stored: Arc::new(Mutex::new(Stored::default())),
        }
    }

    /// The last labelled table written, if any.
    pub fn labeled(&self) -> Option<Dataset> {
        self.stored.lock().labeled.clone()
    }

    /// The last summary written, if any.
    pub fn summary(&self) -> Option<DailySummary> {
        self.stored.lock().summary.clone()
    }
}

impl DatasetStore for MemoryDatasetStore {
    fn load(&self) -> Result<Dataset> {
        self.input
            .lock()
            .clone()
            .ok_or_else(|| SigapError::data_access("in-memory dataset is unavailable"))
    }

    fn store(&self, labeled: &Dataset, summary: &DailySummary) -> Result<()> {
        let mut stored = self.stored.lock();
        stored.labeled = Some(labeled.clone());
        stored.summary = Some(summary.clone());
        // Subsequent loads see the written table, like a file overwritten in place.
        *self.input.lock() = Some(labeled.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
