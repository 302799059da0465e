//! Nearby-city search: distance from a point to every known city, filtered
//! to a fixed radius and sorted nearest first.

use crate::dataset::{CityRecord, CityStore};
use crate::geo::GeoPoint;

/// Search radius in miles. Fixed.
pub const RADIUS_MILES: f64 = 100.0;

/// A city paired with its distance from the search origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    pub city: CityRecord,
    pub distance_miles: f64,
}

impl ResultEntry {
    /// "Decatur, IL (37.4 mi)"
    pub fn label(&self) -> String {
        format!("{} ({:.1} mi)", self.city.label(), self.distance_miles)
    }
}

/// The queried city, kept out of its own results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub name: String,
    pub state: Option<String>,
}

impl Exclusion {
    pub fn new(name: impl Into<String>, state: Option<String>) -> Self {
        Self { name: name.into(), state }
    }

    fn excludes(&self, city: &CityRecord) -> bool {
        city.matches(&self.name, self.state.as_deref())
    }
}

/// Every city within [`RADIUS_MILES`] of `origin`, nearest first.
///
/// Cities missing a coordinate are skipped. Equal distances keep dataset
/// order (the sort is stable).
pub fn find_nearby(
    store: &CityStore,
    origin: GeoPoint,
    exclude: Option<&Exclusion>,
) -> Vec<ResultEntry> {
    let mut results: Vec<ResultEntry> = store
        .cities()
        .iter()
        .filter(|c| !exclude.is_some_and(|ex| ex.excludes(c)))
        .filter_map(|c| {
            let point = c.point()?;
            let distance_miles = origin.distance_miles(&point);
            (distance_miles <= RADIUS_MILES).then(|| ResultEntry {
                city: c.clone(),
                distance_miles,
            })
        })
        .collect();

    results.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{load_sources, BundledDataset, DatasetSource};

    fn illinois() -> CityStore {
        CityStore::new(vec![
            CityRecord::new("Springfield", "IL", 39.78, -89.65),
            CityRecord::new("Decatur", "IL", 39.84, -88.95),
            CityRecord::new("Peoria", "IL", 40.69, -89.59),
            CityRecord::new("Chicago", "IL", 41.88, -87.63),
            CityRecord {
                name: "Nowhere".into(),
                state: "IL".into(),
                latitude: Some(39.78),
                longitude: None,
            },
        ])
    }

    #[test]
    fn test_sorted_and_within_radius() {
        let store = illinois();
        let results = find_nearby(&store, GeoPoint::new(39.78, -89.65), None);
        let names: Vec<&str> = results.iter().map(|r| r.city.name.as_str()).collect();
        // Chicago is ~180 mi away
        assert_eq!(names, vec!["Springfield", "Decatur", "Peoria"]);
        assert_eq!(results[0].distance_miles, 0.0);
        for pair in results.windows(2) {
            assert!(pair[0].distance_miles <= pair[1].distance_miles);
        }
        assert!(results.iter().all(|r| (0.0..=RADIUS_MILES).contains(&r.distance_miles)));
    }

    #[test]
    fn test_excludes_origin_with_state() {
        let store = illinois();
        let ex = Exclusion::new("springfield", Some("il".into()));
        let results = find_nearby(&store, GeoPoint::new(39.78, -89.65), Some(&ex));
        assert!(results.iter().all(|r| r.city.name != "Springfield"));
        assert_eq!(results[0].city.name, "Decatur");
    }

    #[test]
    fn test_exclusion_state_mismatch_keeps_city() {
        let store = illinois();
        let ex = Exclusion::new("Springfield", Some("MO".into()));
        let results = find_nearby(&store, GeoPoint::new(39.78, -89.65), Some(&ex));
        assert_eq!(results[0].city.name, "Springfield");
    }

    #[test]
    fn test_exclusion_name_only() {
        let store = CityStore::new(vec![
            CityRecord::new("Springfield", "IL", 39.78, -89.65),
            CityRecord::new("Springfield", "XX", 39.79, -89.66),
            CityRecord::new("Decatur", "IL", 39.84, -88.95),
        ]);
        let ex = Exclusion::new("SPRINGFIELD", None);
        let results = find_nearby(&store, GeoPoint::new(39.78, -89.65), Some(&ex));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].city.name, "Decatur");
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let store = CityStore::new(vec![
            CityRecord::new("East", "XX", 0.0, 1.0),
            CityRecord::new("West", "XX", 0.0, -1.0),
            CityRecord::new("Near", "XX", 0.0, 0.5),
        ]);
        let results = find_nearby(&store, GeoPoint::new(0.0, 0.0), None);
        let names: Vec<&str> = results.iter().map(|r| r.city.name.as_str()).collect();
        assert_eq!(names, vec!["Near", "East", "West"]);
    }

    #[test]
    fn test_nothing_in_range() {
        let store = illinois();
        assert!(find_nearby(&store, GeoPoint::new(0.0, 0.0), None).is_empty());
        assert!(find_nearby(&CityStore::empty(), GeoPoint::new(39.78, -89.65), None).is_empty());
    }

    #[test]
    fn test_radius_holds_over_bundled_data() {
        let store = load_sources(&BundledDataset::ALL.map(DatasetSource::Bundled)).store;
        for city in store.cities() {
            let Some(origin) = city.point() else { continue };
            let results = find_nearby(&store, origin, Some(&Exclusion::new(&city.name, Some(city.state.clone()))));
            assert!(results.iter().all(|r| r.distance_miles >= 0.0 && r.distance_miles <= RADIUS_MILES));
            assert!(results.windows(2).all(|w| w[0].distance_miles <= w[1].distance_miles));
            assert!(!results.iter().any(|r| r.city.matches(&city.name, Some(&city.state))));
        }
    }

    #[test]
    fn test_label() {
        let entry = ResultEntry {
            city: CityRecord::new("Decatur", "IL", 39.84, -88.95),
            distance_miles: 37.3838,
        };
        assert_eq!(entry.label(), "Decatur, IL (37.4 mi)");
    }
}
