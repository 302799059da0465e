use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::geo::format_coords;
use crate::search::{CitySearch, SearchOutcome};
use crate::suggest::suggest as suggest_cities;

use super::state::AppState;
use super::static_files;

// ─── Static file handlers ────────────────────────────────────────

pub async fn index() -> Html<&'static str> {
    Html(static_files::INDEX_HTML)
}

pub async fn style() -> Response {
    (
        [(header::CONTENT_TYPE, "text/css")],
        static_files::STYLE_CSS,
    )
        .into_response()
}

pub async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        static_files::APP_JS,
    )
        .into_response()
}

// ─── GET /api/suggest ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TextQuery {
    pub q: Option<String>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SuggestionBody {
    pub name: String,
    pub state: String,
    /// Value to place in the search box when picked.
    pub label: String,
}

pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TextQuery>,
) -> Json<Vec<SuggestionBody>> {
    let store = state.dataset.current();
    let query = params.q.unwrap_or_default();

    let body = suggest_cities(&store, &query)
        .into_iter()
        .map(|c| SuggestionBody {
            name: c.name.clone(),
            state: c.state.clone(),
            label: c.label(),
        })
        .collect();

    Json(body)
}

// ─── GET /api/nearby ─────────────────────────────────────────────

#[derive(Serialize, Debug)]
pub struct OriginBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub formatted_coords: String,
    pub source: String,
}

#[derive(Serialize, Debug)]
pub struct ResultBody {
    pub name: String,
    pub state: String,
    pub distance_miles: f64,
    pub label: String,
}

#[derive(Serialize, Debug)]
pub struct NearbyResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<OriginBody>,
    pub results: Vec<ResultBody>,
}

impl From<&SearchOutcome> for NearbyResponse {
    fn from(outcome: &SearchOutcome) -> Self {
        Self {
            status: outcome.status(),
            message: outcome.message(),
            origin: outcome.origin().map(|o| OriginBody {
                name: o.name.clone(),
                state: o.state.clone(),
                lat: o.point.latitude,
                lon: o.point.longitude,
                formatted_coords: format_coords(&o.point),
                source: o.source.to_string(),
            }),
            results: outcome
                .results()
                .iter()
                .map(|r| ResultBody {
                    name: r.city.name.clone(),
                    state: r.city.state.clone(),
                    distance_miles: r.distance_miles,
                    label: r.label(),
                })
                .collect(),
        }
    }
}

pub async fn nearby(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TextQuery>,
) -> Json<NearbyResponse> {
    let start = Instant::now();
    let query = params.q.unwrap_or_default();

    let store = state.dataset.current();
    let geocoder = Arc::clone(&state.geocoder);
    let input = query.clone();

    // The geocoder blocks on network I/O.
    let outcome = tokio::task::spawn_blocking(move || {
        CitySearch::new(&store, geocoder.as_ref()).search(&input)
    })
    .await
    .unwrap_or_else(|e| {
        error!(error = %e, "search task failed");
        SearchOutcome::NotFound { query: query.trim().to_string() }
    });

    info!(
        query = %query.trim(),
        status = outcome.status(),
        results = outcome.results().len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/nearby"
    );

    Json(NearbyResponse::from(&outcome))
}

// ─── GET /api/status ─────────────────────────────────────────────

#[derive(Serialize, Debug)]
pub struct StatusResponse {
    pub loaded: bool,
    pub cities: usize,
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        loaded: state.dataset.is_loaded(),
        cities: state.dataset.current().len(),
    })
}
