//! Data module - Dataset loading, caching and slicing

mod cache;
mod loader;
mod measure;
mod processor;
mod record;

pub use cache::DatasetCache;
pub use loader::{parse_date, DataLoader, FailureKind, LoadError, REQUIRED_COLUMNS};
pub use measure::{format_thousands, Measure, NOT_AVAILABLE};
pub use processor::{CategorySlice, DataProcessor, SlicePoint};
pub use record::{Dataset, Record};
