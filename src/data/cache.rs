//! Dataset Cache
//! Loads the dataset on first access and hands out the same copy afterwards.

use crate::data::{DataLoader, Dataset, LoadError};
use once_cell::unsync::OnceCell;
use std::cell::Cell;
use tracing::debug;

/// Process-scoped memo of the loaded dataset.
///
/// Constructed once in `main` and shared by handle; never invalidated. A
/// failed load is not stored, since a fatal load error ends the run.
pub struct DatasetCache {
    loader: DataLoader,
    dataset: OnceCell<Dataset>,
    loads: Cell<usize>,
}

impl DatasetCache {
    pub fn new(loader: DataLoader) -> Self {
        Self {
            loader,
            dataset: OnceCell::new(),
            loads: Cell::new(0),
        }
    }

    /// The dataset, loading it on first call.
    pub fn get(&self) -> Result<&Dataset, LoadError> {
        if self.dataset.get().is_some() {
            debug!("using cached dataset");
        }
        self.dataset.get_or_try_init(|| {
            self.loads.set(self.loads.get() + 1);
            self.loader.load()
        })
    }

    /// The dataset if it has already been loaded.
    pub fn cached(&self) -> Option<&Dataset> {
        self.dataset.get()
    }

    /// Number of times the source has been fetched.
    pub fn load_count(&self) -> usize {
        self.loads.get()
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }
}
