//! Axum router construction for the climate API.
//!
//! Assembles every route into a single [`Router`] with permissive CORS and
//! the HTTP trace layer.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::handlers::temperature::{ENDPOINT_RANGE, ENDPOINT_SINCE};
use crate::logging::create_http_trace_layer;
use crate::state::AppState;

/// Build the complete router.
///
/// - `GET /` -- HTML route listing
/// - `GET /heartbeat` -- server and dataset status
/// - `GET /api/v1.0/precipitation` -- trailing-year precipitation by date
/// - `GET /api/v1.0/stations` -- all station ids
/// - `GET /api/v1.0/tobs` -- trailing-year observations of the busiest station
/// - `GET /api/v1.0/:start` -- temperature summary from `start`
/// - `GET /api/v1.0/:start/:end` -- temperature summary for `start..=end`
///
/// The static `/api/v1.0/*` routes take priority over the `:start` capture.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/heartbeat", get(handlers::heartbeat_handler))
        .route("/api/v1.0/precipitation", get(handlers::precipitation_handler))
        .route("/api/v1.0/stations", get(handlers::stations_handler))
        .route("/api/v1.0/tobs", get(handlers::tobs_handler))
        .route(ENDPOINT_SINCE, get(handlers::temperature_since_handler))
        .route(ENDPOINT_RANGE, get(handlers::temperature_range_handler))
        .layer(CorsLayer::permissive())
        .layer(create_http_trace_layer())
        .with_state(state)
}
