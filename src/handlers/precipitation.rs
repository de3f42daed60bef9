//! Trailing-year precipitation endpoint handler.
//!
//! Returns a JSON object keyed by date. When several stations report on the
//! same date only the last row (in `date, id` order) survives; this endpoint
//! is a lookup table, not an aggregate.

use axum::extract::State;
use axum::response::Response;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::respond;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::state::AppState;
use crate::store::{MeasurementFilter, Observation, Reading};

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing precipitation request"
    );

    let result = trailing_year_precipitation(&state).await;
    respond(ENDPOINT, &request_id, start_time, None, result)
}

async fn trailing_year_precipitation(state: &AppState) -> Result<BTreeMap<String, Option<f64>>> {
    let Some(window_start) = state.store.window_start(state.lookback_days()).await? else {
        return Ok(BTreeMap::new());
    };

    let readings = state
        .store
        .query_measurements(&MeasurementFilter::since(window_start), Observation::Precipitation)
        .await?;

    Ok(by_date(readings))
}

/// Collapse readings into a date-keyed map, later rows overwriting earlier ones
fn by_date(readings: Vec<Reading>) -> BTreeMap<String, Option<f64>> {
    readings
        .into_iter()
        .map(|reading| (reading.date, reading.value))
        .collect()
}
