//! Reads city collections and merges them into one normalized list.
//!
//! Failure policy: a source that cannot be read contributes nothing and is
//! reported; a bad record inside a readable source is skipped and counted.
//! Loading never aborts the caller.

use super::store::CityStore;
use super::types::{CityRecord, DatasetSource, RawCity};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin} is not a JSON array of city objects: {source}")]
    Shape {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-source outcome of a load.
#[derive(Debug)]
pub struct SourceReport {
    pub source: DatasetSource,
    pub loaded: usize,
    pub skipped: usize,
    pub error: Option<DatasetError>,
}

/// The merged store plus what happened to every source.
#[derive(Debug)]
pub struct LoadReport {
    pub store: CityStore,
    pub sources: Vec<SourceReport>,
}

impl LoadReport {
    /// True if any source failed outright.
    pub fn has_failures(&self) -> bool {
        self.sources.iter().any(|s| s.error.is_some())
    }
}

/// Load every source in order and concatenate their records.
pub fn load_sources(sources: &[DatasetSource]) -> LoadReport {
    let mut cities = Vec::new();
    let mut reports = Vec::with_capacity(sources.len());

    for source in sources {
        let report = match read_source(source) {
            Ok((records, skipped)) => {
                info!(source = %source, cities = records.len(), skipped, "dataset loaded");
                if skipped > 0 {
                    warn!(source = %source, skipped, "skipped malformed city records");
                }
                let loaded = records.len();
                cities.extend(records);
                SourceReport { source: source.clone(), loaded, skipped, error: None }
            }
            Err(e) => {
                error!(source = %source, error = %e, "dataset load failed");
                SourceReport { source: source.clone(), loaded: 0, skipped: 0, error: Some(e) }
            }
        };
        reports.push(report);
    }

    LoadReport {
        store: CityStore::new(cities),
        sources: reports,
    }
}

fn read_source(source: &DatasetSource) -> Result<(Vec<CityRecord>, usize), DatasetError> {
    match source {
        DatasetSource::File(path) => {
            let text = read_file(path)?;
            parse_cities(&text, &source.to_string())
        }
        DatasetSource::Bundled(b) => parse_cities(b.contents(), &source.to_string()),
    }
}

fn read_file(path: &Path) -> Result<String, DatasetError> {
    fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Parse a JSON array of city objects. Returns the normalized records and
/// the number of entries that were skipped.
pub fn parse_cities(text: &str, origin: &str) -> Result<(Vec<CityRecord>, usize), DatasetError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(text).map_err(|e| DatasetError::Shape {
            origin: origin.to_string(),
            source: e,
        })?;

    let total = values.len();
    let records: Vec<CityRecord> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<RawCity>(v).ok())
        .map(CityRecord::from)
        .filter(|c| !c.name.is_empty())
        .collect();

    let skipped = total - records.len();
    Ok((records, skipped))
}
