//! HTTP front end: the search page plus a small JSON API.

mod handlers;
mod state;
mod static_files;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::dataset::{load_sources, DatasetHandle};
use crate::geocode::Geocoder;

pub use handlers::NearbyResponse;
pub use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/style.css", get(handlers::style))
        .route("/app.js", get(handlers::script))
        .route("/api/suggest", get(handlers::suggest))
        .route("/api/nearby", get(handlers::nearby))
        .route("/api/status", get(handlers::status))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind, start loading datasets in the background, and serve until shutdown.
///
/// Requests that arrive before the load finishes see an empty dataset.
pub async fn start(host: &str, port: u16, config: AppConfig) {
    if !config.has_geocoder_token() {
        warn!("no geocoding token configured; cities missing from the dataset will not resolve");
    }

    let geocoder: Arc<dyn Geocoder> = Arc::new(config.build_geocoder());
    let state = Arc::new(AppState {
        dataset: DatasetHandle::pending(),
        geocoder,
    });

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    let loader_state = Arc::clone(&state);
    let sources = config.dataset_sources();
    tokio::task::spawn_blocking(move || {
        let report = load_sources(&sources);
        info!(cities = report.store.len(), "dataset ready");
        if report.has_failures() {
            warn!("some datasets failed to load; searches will only see what loaded");
        }
        loader_state.dataset.publish(report.store);
    });

    eprintln!("  Nearby Cities server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    if let Err(e) = axum::serve(listener, build_router(state)).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}
