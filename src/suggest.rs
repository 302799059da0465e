//! Autocomplete over the local dataset.

use crate::dataset::{CityRecord, CityStore};

/// Maximum number of suggestions returned per keystroke.
pub const MAX_SUGGESTIONS: usize = 10;

/// Cities whose name contains `query` (case-insensitive), in dataset order,
/// at most [`MAX_SUGGESTIONS`]. Blank queries yield nothing; otherwise the
/// query is matched as typed, surrounding spaces included.
pub fn suggest<'a>(store: &'a CityStore, query: &str) -> Vec<&'a CityRecord> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    store
        .cities()
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}
