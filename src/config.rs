//! Runtime configuration shared by the CLI and the server.
//!
//! Values come from command-line flags or environment variables (see
//! `main.rs`). The geocoding token is only ever read from here.

use crate::dataset::{BundledDataset, DatasetSource};
use crate::geocode::{GeocoderConfig, MapboxGeocoder};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DATA: &str = "NEARBY_DATA";
pub const ENV_MAPBOX_TOKEN: &str = "MAPBOX_ACCESS_TOKEN";
pub const ENV_GEOCODER_URL: &str = "NEARBY_GEOCODER_URL";
pub const ENV_GEOCODE_TIMEOUT: &str = "NEARBY_GEOCODE_TIMEOUT";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Dataset files. Empty means the bundled datasets.
    pub data_files: Vec<PathBuf>,
    pub geocoder: GeocoderConfig,
}

impl AppConfig {
    pub fn new(
        data_files: Vec<PathBuf>,
        access_token: Option<String>,
        geocoder_url: String,
        timeout_secs: u64,
    ) -> Self {
        Self {
            data_files,
            geocoder: GeocoderConfig {
                base_url: geocoder_url,
                access_token: access_token.filter(|t| !t.trim().is_empty()),
                timeout: Duration::from_secs(timeout_secs.max(1)),
            },
        }
    }

    pub fn dataset_sources(&self) -> Vec<DatasetSource> {
        if self.data_files.is_empty() {
            BundledDataset::ALL.into_iter().map(DatasetSource::Bundled).collect()
        } else {
            self.data_files.iter().cloned().map(DatasetSource::File).collect()
        }
    }

    pub fn has_geocoder_token(&self) -> bool {
        self.geocoder.access_token.is_some()
    }

    pub fn build_geocoder(&self) -> MapboxGeocoder {
        MapboxGeocoder::new(self.geocoder.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::DEFAULT_GEOCODER_URL;

    #[test]
    fn test_default_sources_are_bundled() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.dataset_sources(),
            vec![
                DatasetSource::Bundled(BundledDataset::UsLocations),
                DatasetSource::Bundled(BundledDataset::PopularCities),
            ]
        );
        assert!(!cfg.has_geocoder_token());
        assert_eq!(cfg.geocoder.base_url, DEFAULT_GEOCODER_URL);
    }

    #[test]
    fn test_files_replace_bundled() {
        let cfg = AppConfig::new(vec![PathBuf::from("a.json")], None, DEFAULT_GEOCODER_URL.into(), 5);
        assert_eq!(cfg.dataset_sources(), vec![DatasetSource::File(PathBuf::from("a.json"))]);
    }

    #[test]
    fn test_blank_token_is_none() {
        let cfg = AppConfig::new(vec![], Some("  ".into()), DEFAULT_GEOCODER_URL.into(), 0);
        assert!(!cfg.has_geocoder_token());
        assert_eq!(cfg.geocoder.timeout, Duration::from_secs(1));
    }
}
