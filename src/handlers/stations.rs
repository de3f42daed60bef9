//! Station listing endpoint handler.

use axum::extract::State;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::respond;
use crate::logging::generate_request_id;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/stations";

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing stations request"
    );

    let result = state.store.list_stations().await;
    respond(ENDPOINT, &request_id, start_time, None, result)
}
