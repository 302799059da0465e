//! Geocoding fallback for places missing from the local dataset.
//!
//! Production lookups go to the Mapbox Places API. Its coordinates come back
//! longitude-first and are flipped to (latitude, longitude) here, at the
//! boundary, so nothing downstream ever sees the provider's order.

use crate::geo::GeoPoint;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_GEOCODER_URL: &str = "https://api.mapbox.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

const USER_AGENT: &str = concat!("NearbyCities/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("no geocoding access token configured")]
    MissingToken,
    #[error("network error: {0}")]
    Network(String),
    #[error("geocoder returned HTTP {0}")]
    Status(u16),
    #[error("invalid geocoder response: {0}")]
    InvalidResponse(String),
    #[error("no geocoding results for '{0}'")]
    NoResults(String),
}

/// Anything that can turn free text into a coordinate pair.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, location: &str) -> Result<GeoPoint, GeocodeError>;
}

/// Connection settings for [`MapboxGeocoder`].
#[derive(Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            access_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Hand-written so the token never ends up in a log line.
impl std::fmt::Debug for GeocoderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocoderConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ─── Mapbox provider ────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct PlacesResponse {
    #[serde(default)]
    features: Vec<PlaceFeature>,
}

#[derive(Deserialize, Debug)]
struct PlaceFeature {
    /// `[longitude, latitude]`
    center: [f64; 2],
}

pub struct MapboxGeocoder {
    agent: ureq::Agent,
    config: GeocoderConfig,
}

impl MapboxGeocoder {
    pub fn new(config: GeocoderConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent, config }
    }

    /// Request path for `location`, without the access token.
    pub fn places_path(&self, location: &str) -> String {
        format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.config.base_url.trim_end_matches('/'),
            urlencode(location),
        )
    }
}

impl Geocoder for MapboxGeocoder {
    fn geocode(&self, location: &str) -> Result<GeoPoint, GeocodeError> {
        let token = self
            .config
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(GeocodeError::MissingToken)?;

        let path = self.places_path(location);
        debug!(url = %path, "geocoding request");

        let response = self
            .agent
            .get(&path)
            .query("access_token", token)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => GeocodeError::Status(code),
                ureq::Error::Transport(t) => GeocodeError::Network(t.to_string()),
            })?;

        let body = response
            .into_string()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        parse_places(&body, location)
    }
}

/// Extract the first candidate from a Places response body.
pub fn parse_places(body: &str, location: &str) -> Result<GeoPoint, GeocodeError> {
    let parsed: PlacesResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    let first = parsed
        .features
        .first()
        .ok_or_else(|| GeocodeError::NoResults(location.to_string()))?;

    let [lon, lat] = first.center;
    GeoPoint::checked(lat, lon).ok_or_else(|| {
        GeocodeError::InvalidResponse(format!("coordinates out of range: [{}, {}]", lon, lat))
    })
}

// ─── URL encoding ───────────────────────────────────────────────

/// Percent-encode a path segment the way browsers' `encodeURIComponent` does.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'!' | b'*'
            | b'\'' | b'(' | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
