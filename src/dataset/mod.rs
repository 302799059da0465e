//! Local city dataset: loading, normalization, and the shared read-only store.

pub mod loader;
pub mod store;
pub mod types;

pub use loader::{load_sources, DatasetError, LoadReport, SourceReport};
pub use store::{CityStore, DatasetHandle};
pub use types::{BundledDataset, CityRecord, DatasetSource};
