//! Temperature summary endpoint handlers.
//!
//! `start` and `end` are taken verbatim from the path and compared as
//! strings against the stored dates. Nothing is parsed, so a malformed
//! bound simply matches no rows and yields an all-null summary.

use axum::extract::{Path, State};
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::respond;
use crate::logging::generate_request_id;
use crate::state::AppState;
use crate::store::MeasurementFilter;

/// Route path, also used as the log label
pub const ENDPOINT_SINCE: &str = "/api/v1.0/:start";
/// Route path, also used as the log label
pub const ENDPOINT_RANGE: &str = "/api/v1.0/:start/:end";

/// Handle GET /api/v1.0/:start requests
pub async fn temperature_since_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT_SINCE,
        request_id = %request_id,
        start = %start,
        "Processing temperature summary request"
    );

    let params = format!("start={}", start);
    let filter = MeasurementFilter::since(start);
    let result = state.store.aggregate_temperature(&filter).await;
    respond(ENDPOINT_SINCE, &request_id, start_time, Some(&params), result)
}

/// Handle GET /api/v1.0/:start/:end requests
pub async fn temperature_range_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT_RANGE,
        request_id = %request_id,
        start = %start,
        end = %end,
        "Processing temperature range request"
    );

    let params = format!("start={}, end={}", start, end);
    let filter = MeasurementFilter::since(start).until(end);
    let result = state.store.aggregate_temperature(&filter).await;
    respond(ENDPOINT_RANGE, &request_id, start_time, Some(&params), result)
}
