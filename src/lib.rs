//! # hawaii-climate
//!
//! A small, read-only HTTP API over the Hawaii climate SQLite dataset.
//!
//! The dataset holds two tables, `measurement` (daily precipitation and
//! temperature readings per station) and `station`. The API exposes a
//! handful of filtered and aggregated views over them as JSON.
//!
//! ## Architecture
//!
//! - **Data Layer** ([`store`]): pooled, read-only SQLite access through `sqlx`
//! - **API Layer** ([`handlers`], [`router`]): axum handlers, one query or two per request
//! - **Ambient** ([`config`], [`logging`], [`error`]): layered config, `tracing`, `thiserror`

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{ClimateError, Result};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats, log_error,
    log_request_error,
};
pub use router::build_router;
pub use state::AppState;
pub use store::{
    ClimateStore, DatasetSummary, MeasurementFilter, Observation, Reading, TemperatureSummary,
};
