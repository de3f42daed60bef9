//! Heartbeat endpoint handler.
//!
//! Returns server status information: identity, uptime and what the opened
//! dataset contains.

use axum::extract::State;
use axum::response::Response;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use uuid::Uuid;

use super::respond;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::state::AppState;
use crate::store::DatasetSummary;

const ENDPOINT: &str = "/heartbeat";

/// Random id for this server process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Dataset information
    pub dataset: DatasetInfo,
    /// Server status
    pub status: String,
}

/// Dataset information structure
#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    /// Database file path
    pub database_path: String,
    #[serde(flatten)]
    pub summary: DatasetSummary,
}

/// Record the process start time; later heartbeats report uptime from here
pub fn mark_started() {
    once_cell::sync::Lazy::force(&START_TIME);
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    let result = heartbeat(&state).await;
    respond(ENDPOINT, &request_id, start_time, None, result)
}

async fn heartbeat(state: &AppState) -> Result<HeartbeatResponse> {
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    let summary = state.store.dataset_summary().await?;

    Ok(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        dataset: DatasetInfo {
            database_path: state.store.path().display().to_string(),
            summary,
        },
        status: "healthy".to_string(),
    })
}
