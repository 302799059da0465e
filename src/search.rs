//! Search orchestration: parse the query, resolve it to a point, find
//! neighbours, and turn every outcome into something renderable.
//!
//! Resolution order: exact dataset match → geocoder → not found.
//! A local exact match always wins; the geocoder is only asked when the
//! dataset has no complete entry for the query.

use crate::dataset::{CityRecord, CityStore};
use crate::geo::GeoPoint;
use crate::geocode::Geocoder;
use crate::proximity::{find_nearby, Exclusion, ResultEntry, RADIUS_MILES};
use std::fmt;
use tracing::{debug, info, warn};

/// How the search origin was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Dataset,
    Geocoder,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dataset => write!(f, "Dataset"),
            Self::Geocoder => write!(f, "Geocoder"),
        }
    }
}

/// The resolved origin of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    pub name: String,
    pub state: Option<String>,
    pub point: GeoPoint,
    pub source: ResolutionSource,
}

impl Origin {
    pub fn display_name(&self) -> String {
        match &self.state {
            Some(s) => format!("{}, {}", self.name, s),
            None => self.name.clone(),
        }
    }
}

/// Terminal state of one search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Nothing was typed.
    EmptyQuery,
    /// Neither the dataset nor the geocoder knew the place.
    NotFound { query: String },
    /// The place resolved but nothing lies within the radius.
    NoNearby { query: String, origin: Origin },
    Nearby { origin: Origin, results: Vec<ResultEntry> },
}

impl SearchOutcome {
    /// Machine-readable status used by the HTTP API.
    pub fn status(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty_query",
            Self::NotFound { .. } => "not_found",
            Self::NoNearby { .. } => "no_nearby",
            Self::Nearby { .. } => "found",
        }
    }

    /// One-line message shown above (or instead of) the result list.
    pub fn message(&self) -> String {
        match self {
            Self::EmptyQuery => "Please enter a city.".to_string(),
            Self::NotFound { .. } => "City not found.".to_string(),
            Self::NoNearby { query, .. } => format!(
                "No nearby cities found within {} miles of {}.",
                RADIUS_MILES, query
            ),
            Self::Nearby { origin, .. } => format!("Cities near {}:", origin.display_name()),
        }
    }

    pub fn origin(&self) -> Option<&Origin> {
        match self {
            Self::NoNearby { origin, .. } | Self::Nearby { origin, .. } => Some(origin),
            _ => None,
        }
    }

    pub fn results(&self) -> &[ResultEntry] {
        match self {
            Self::Nearby { results, .. } => results,
            _ => &[],
        }
    }

    /// Plain-text rendering: the message, then one "City, ST (x.y mi)" line
    /// per result.
    pub fn render(&self) -> String {
        let mut out = self.message();
        for entry in self.results() {
            out.push('\n');
            out.push_str(&entry.label());
        }
        out
    }
}

/// A query split into city name and optional state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub name: String,
    pub state: Option<String>,
}

/// Parse "Springfield, IL" → ("Springfield", Some("IL")).
/// Parse "Springfield" → ("Springfield", None).
///
/// Only the first two comma-separated parts count; an empty state is none.
pub fn parse_query(input: &str) -> ParsedQuery {
    let mut parts = input.split(',').map(str::trim);
    let name = parts.next().unwrap_or_default().to_string();
    let state = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
    ParsedQuery { name, state }
}

/// The search pipeline over one store and one geocoder.
pub struct CitySearch<'a> {
    store: &'a CityStore,
    geocoder: &'a dyn Geocoder,
}

impl<'a> CitySearch<'a> {
    pub fn new(store: &'a CityStore, geocoder: &'a dyn Geocoder) -> Self {
        Self { store, geocoder }
    }

    /// Run one search. Never fails: every path ends in a [`SearchOutcome`].
    pub fn search(&self, input: &str) -> SearchOutcome {
        let query = input.trim();
        if query.is_empty() {
            return SearchOutcome::EmptyQuery;
        }

        let parsed = parse_query(query);
        let Some(origin) = self.resolve(query, &parsed) else {
            return SearchOutcome::NotFound { query: query.to_string() };
        };

        let exclusion = Exclusion::new(parsed.name.clone(), parsed.state.clone());
        let results = find_nearby(self.store, origin.point, Some(&exclusion));
        info!(
            query,
            source = %origin.source,
            lat = origin.point.latitude,
            lon = origin.point.longitude,
            results = results.len(),
            "search complete"
        );

        if results.is_empty() {
            SearchOutcome::NoNearby { query: query.to_string(), origin }
        } else {
            SearchOutcome::Nearby { origin, results }
        }
    }

    fn resolve(&self, query: &str, parsed: &ParsedQuery) -> Option<Origin> {
        let exact = self.store.find_exact(&parsed.name, parsed.state.as_deref());
        if let Some(point) = exact.and_then(CityRecord::point) {
            debug!(query, "resolved from dataset");
            return Some(Origin {
                name: parsed.name.clone(),
                state: parsed.state.clone(),
                point,
                source: ResolutionSource::Dataset,
            });
        }

        match self.geocoder.geocode(query) {
            Ok(point) => {
                debug!(query, "resolved by geocoder");
                Some(Origin {
                    name: parsed.name.clone(),
                    state: parsed.state.clone(),
                    point,
                    source: ResolutionSource::Geocoder,
                })
            }
            Err(e) => {
                warn!(query, error = %e, "geocoding fallback failed");
                None
            }
        }
    }
}
