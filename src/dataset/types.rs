//! City records and the raw shapes they are normalized from.

use crate::geo::GeoPoint;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;

/// A city known to the local dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRecord {
    pub name: String,
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CityRecord {
    pub fn new(name: impl Into<String>, state: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            latitude: Some(lat),
            longitude: Some(lon),
        }
    }

    /// The coordinate pair, if both axes are present.
    pub fn point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// Canonical "Name, State" form placed in the search box on selection.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.state)
    }

    /// Case-insensitive equality on name and, when given, state.
    pub fn matches(&self, name: &str, state: Option<&str>) -> bool {
        eq_ignore_case(&self.name, name)
            && state.map_or(true, |s| eq_ignore_case(&self.state, s))
    }
}

impl fmt::Display for CityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.state)
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Where a collection of cities comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Bundled(BundledDataset),
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundled(b) => write!(f, "bundled:{}", b.name()),
        }
    }
}

/// Datasets compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundledDataset {
    /// `name/state/lat/lon` records used for autocomplete.
    UsLocations,
    /// `city/state/lat/lng` records of the most populous cities.
    PopularCities,
}

impl BundledDataset {
    pub const ALL: [BundledDataset; 2] = [Self::UsLocations, Self::PopularCities];

    pub fn name(&self) -> &'static str {
        match self {
            Self::UsLocations => "us-locations",
            Self::PopularCities => "popular-cities",
        }
    }

    pub fn contents(&self) -> &'static str {
        match self {
            Self::UsLocations => include_str!("../../data/us-locations.json"),
            Self::PopularCities => include_str!("../../data/popular-cities.json"),
        }
    }
}

/// One record as found in a source file, before normalization.
///
/// Sources disagree on field names (`name` vs `city`, `lon` vs `lng`), so
/// every spelling seen in the wild is accepted here.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCity {
    #[serde(alias = "city")]
    name: String,
    #[serde(alias = "state_code", alias = "region")]
    state: String,
    #[serde(default, alias = "latitude", deserialize_with = "de_coord")]
    lat: Option<f64>,
    #[serde(default, alias = "lng", alias = "longitude", deserialize_with = "de_coord")]
    lon: Option<f64>,
}

impl From<RawCity> for CityRecord {
    fn from(raw: RawCity) -> Self {
        Self {
            name: raw.name.trim().to_string(),
            state: raw.state.trim().to_string(),
            latitude: raw.lat.filter(|v| v.is_finite()),
            longitude: raw.lon.filter(|v| v.is_finite()),
        }
    }
}

/// Accept a coordinate as a JSON number, a numeric string, an empty string
/// or null.
fn de_coord<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coord {
        Num(f64),
        Text(String),
    }

    match Option::<Coord>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Coord::Num(v)) => Ok(Some(v)),
        Some(Coord::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Coord::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CityRecord {
        serde_json::from_str::<RawCity>(json).unwrap().into()
    }

    #[test]
    fn test_normalize_location_shape() {
        let c = parse(r#"{"name":"Springfield","state":"IL","lat":39.78,"lon":-89.65}"#);
        assert_eq!(c, CityRecord::new("Springfield", "IL", 39.78, -89.65));
    }

    #[test]
    fn test_normalize_popular_shape() {
        let c = parse(r#"{"city":"Decatur","state":"Illinois","lat":39.84,"lng":-88.95,"pop":70000}"#);
        assert_eq!(c.name, "Decatur");
        assert_eq!(c.state, "Illinois");
        assert_eq!(c.point(), Some(GeoPoint::new(39.84, -88.95)));
    }

    #[test]
    fn test_string_coordinates() {
        let c = parse(r#"{"name":"Austin","state":"TX","latitude":"30.2672","longitude":"-97.7431"}"#);
        assert_eq!(c.latitude, Some(30.2672));
        assert_eq!(c.longitude, Some(-97.7431));
    }

    #[test]
    fn test_missing_coordinate_is_none() {
        let c = parse(r#"{"name":"Nowhere","state":"KS","lat":38.5}"#);
        assert_eq!(c.latitude, Some(38.5));
        assert_eq!(c.longitude, None);
        assert!(c.point().is_none());

        let c = parse(r#"{"name":"Blank","state":"KS","lat":"","lon":null}"#);
        assert!(c.point().is_none());
    }

    #[test]
    fn test_missing_name_rejected() {
        assert!(serde_json::from_str::<RawCity>(r#"{"state":"IL","lat":1.0,"lon":2.0}"#).is_err());
    }

    #[test]
    fn test_bad_coordinate_rejected() {
        assert!(serde_json::from_str::<RawCity>(r#"{"name":"X","state":"Y","lat":"north"}"#).is_err());
    }

    #[test]
    fn test_label_and_matches() {
        let c = CityRecord::new("Springfield", "IL", 39.78, -89.65);
        assert_eq!(c.label(), "Springfield, IL");
        assert!(c.matches("springfield", None));
        assert!(c.matches("SPRINGFIELD", Some("il")));
        assert!(!c.matches("springfield", Some("MO")));
        assert!(!c.matches("spring", None));
    }
}
