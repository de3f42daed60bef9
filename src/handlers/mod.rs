//! HTTP request handlers for the climate API.
//!
//! This module contains all the endpoint handlers for the web server.
//! Every JSON handler follows the same shape: tag the request with an id,
//! run its queries, then log and render either the payload or the error.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

use crate::error::Result;
use crate::logging::log_request_error;

pub mod heartbeat;
pub mod index;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use heartbeat::heartbeat_handler;
pub use index::index_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use temperature::{temperature_range_handler, temperature_since_handler};
pub use tobs::tobs_handler;

/// Render a handler result as JSON, logging the outcome under `request_id`
pub(crate) fn respond<T: Serialize>(
    endpoint: &str,
    request_id: &str,
    start_time: Instant,
    params: Option<&str>,
    result: Result<T>,
) -> Response {
    match result {
        Ok(payload) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Request successful"
            );
            Json(payload).into_response()
        }
        Err(error) => {
            log_request_error(&error, endpoint, request_id, params);
            error.into_response()
        }
    }
}
