//! Nearby Cities: autocomplete over a local US city dataset and a
//! 100-mile proximity search, with a geocoding fallback for places the
//! dataset does not know.

pub mod config;
pub mod dataset;
pub mod geo;
pub mod geocode;
pub mod proximity;
pub mod search;
pub mod server;
pub mod suggest;

pub use dataset::{CityRecord, CityStore, DatasetHandle};
pub use geo::GeoPoint;
pub use search::{CitySearch, SearchOutcome};
