pub mod config;
pub mod error;
pub mod state;
pub mod db;
pub mod models;
pub mod platform;
pub mod execution;
pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::ActivityLog;
use crate::platform::{EventTrigger, JourneyCatalog, TokenProvider};
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config, store: Arc<dyn ActivityLog>) -> Result<Router, reqwest::Error> {
    // One outbound client, shared by every platform collaborator.
    let http = platform::http_client(config.http_timeout_secs)?;

    let state: SharedState = Arc::new(AppState {
        tokens: TokenProvider::new(http.clone(), config.platform.clone()),
        events: EventTrigger::new(http.clone(), config.platform.clone()),
        journeys: JourneyCatalog::new(http, config.platform.clone()),
        store,
        config,
    });

    let max_body_size = state.config.max_body_size;

    let app = Router::new()
        .merge(routes::activity_routes())
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn health() -> &'static str {
    "ok"
}
