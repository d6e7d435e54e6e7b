pub mod activity;
pub mod journeys;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

/// Lifecycle endpoints the journey host calls, plus the status lookup.
pub fn activity_routes() -> Router<SharedState> {
    Router::new()
        .route("/activity/edit", post(activity::edit))
        .route("/activity/save", post(activity::save))
        .route("/activity/execute", post(activity::execute))
        .route("/activity/publish", post(activity::publish))
        .route("/activity/validate", post(activity::validate))
        .route("/activity/stop", post(activity::stop))
        .route("/activity/{uuid}", get(activity::get_by_uuid))
        .route("/journeys", get(journeys::list))
}
