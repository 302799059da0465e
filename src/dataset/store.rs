//! The read-only city store and the handle that publishes it once loaded.

use super::types::CityRecord;
use std::sync::{Arc, OnceLock};

/// The merged, normalized city collection. Immutable once built.
#[derive(Debug, Default)]
pub struct CityStore {
    cities: Vec<CityRecord>,
}

impl CityStore {
    pub fn new(cities: Vec<CityRecord>) -> Self {
        Self { cities }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cities(&self) -> &[CityRecord] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// First record (in dataset order) whose name matches, and whose state
    /// matches too when one is given. Case-insensitive.
    pub fn find_exact(&self, name: &str, state: Option<&str>) -> Option<&CityRecord> {
        self.cities.iter().find(|c| c.matches(name, state))
    }
}

/// Shared slot for a store that is loaded after startup.
///
/// Readers never block: before the load completes they get an empty store.
#[derive(Debug, Default)]
pub struct DatasetHandle {
    slot: OnceLock<Arc<CityStore>>,
    empty: Arc<CityStore>,
}

impl DatasetHandle {
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn ready(store: CityStore) -> Self {
        let handle = Self::default();
        handle.publish(store);
        handle
    }

    /// Install the loaded store. Returns false if one was already installed.
    pub fn publish(&self, store: CityStore) -> bool {
        self.slot.set(Arc::new(store)).is_ok()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn current(&self) -> Arc<CityStore> {
        self.slot.get().cloned().unwrap_or_else(|| Arc::clone(&self.empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CityStore {
        CityStore::new(vec![
            CityRecord::new("Springfield", "IL", 39.78, -89.65),
            CityRecord::new("Springfield", "MO", 37.21, -93.29),
            CityRecord::new("Decatur", "IL", 39.84, -88.95),
        ])
    }

    #[test]
    fn test_find_exact_name_only_first_wins() {
        let store = sample();
        let c = store.find_exact("springfield", None).unwrap();
        assert_eq!(c.state, "IL");
    }

    #[test]
    fn test_find_exact_with_state() {
        let store = sample();
        let c = store.find_exact("Springfield", Some("mo")).unwrap();
        assert_eq!(c.state, "MO");
        assert!(store.find_exact("Springfield", Some("TX")).is_none());
    }

    #[test]
    fn test_pending_handle_is_empty() {
        let handle = DatasetHandle::pending();
        assert!(!handle.is_loaded());
        assert!(handle.current().is_empty());
    }

    #[test]
    fn test_publish_once() {
        let handle = DatasetHandle::pending();
        assert!(handle.publish(sample()));
        assert!(!handle.publish(CityStore::empty()));
        assert!(handle.is_loaded());
        assert_eq!(handle.current().len(), 3);
    }
}
