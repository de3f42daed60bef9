//! Application state management for hawaii-climate.
//!
//! This module defines the shared state that is passed to all handlers:
//! the resolved configuration and the pooled store handle. Nothing in it is
//! mutated after startup.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::store::ClimateStore;

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Read-only climate database
    pub store: ClimateStore,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, store: ClimateStore) -> Self {
        Self { config, store }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, store: ClimateStore) -> Arc<Self> {
        Arc::new(Self::new(config, store))
    }

    /// Open the configured database and build the state around it
    pub async fn open(config: Config) -> Result<Arc<Self>> {
        let store = ClimateStore::open(&config.database.path, &config.database).await?;
        Ok(Self::new_shared(config, store))
    }

    /// Days covered by the trailing-year routes
    pub fn lookback_days(&self) -> i64 {
        self.config.database.lookback_days
    }
}
