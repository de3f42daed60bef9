//! Temperature observations for the most active station.
//!
//! Unlike the precipitation route the payload is a list of one-entry
//! objects, so repeated dates stay separate entries.

use axum::extract::State;
use axum::response::Response;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::respond;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::state::AppState;
use crate::store::{MeasurementFilter, Observation, Reading};

const ENDPOINT: &str = "/api/v1.0/tobs";

/// One observation, serialized as `{"<date>": <tobs>}`
#[derive(Debug, Clone, PartialEq)]
pub struct DatedObservation(pub Reading);

impl Serialize for DatedObservation {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.0.date, &self.0.value)?;
        map.end()
    }
}

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing temperature observation request"
    );

    let result = most_active_station_observations(&state, &request_id).await;
    respond(ENDPOINT, &request_id, start_time, None, result)
}

async fn most_active_station_observations(
    state: &AppState,
    request_id: &str,
) -> Result<Vec<DatedObservation>> {
    let Some(station_id) = state.store.most_active_station().await? else {
        return Ok(Vec::new());
    };
    let Some(window_start) = state.store.window_start(state.lookback_days()).await? else {
        return Ok(Vec::new());
    };

    debug!(
        request_id = %request_id,
        station_id = %station_id,
        window_start = %window_start,
        "Resolved most active station"
    );

    let filter = MeasurementFilter::since(window_start).station(station_id);
    let readings = state
        .store
        .query_measurements(&filter, Observation::Temperature)
        .await?;

    Ok(readings.into_iter().map(DatedObservation).collect())
}
