//! Read-only access to the climate SQLite dataset.
//!
//! The database is produced elsewhere and is never written by this crate.
//! Its schema is the fixed Hawaii layout:
//!
//! ```text
//! measurement(id, station, date, prcp, tobs)
//! station(id, station, name, latitude, longitude, elevation)
//! ```
//!
//! Dates are stored as ISO `YYYY-MM-DD` text and every date filter here is a
//! plain lexical comparison against that text.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::{ClimateError, Result};

/// Tables that must be present for the store to be usable
const REQUIRED_TABLES: [&str; 2] = ["measurement", "station"];

/// Which observation column a measurement query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// `measurement.prcp`, nullable
    Precipitation,
    /// `measurement.tobs`
    Temperature,
}

impl Observation {
    fn column(self) -> &'static str {
        match self {
            Observation::Precipitation => "prcp",
            Observation::Temperature => "tobs",
        }
    }
}

/// Optional constraints applied to the measurement table.
///
/// Both date bounds are inclusive and compared lexically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementFilter {
    pub station_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl MeasurementFilter {
    /// Measurements on or after `date`
    pub fn since(date: impl Into<String>) -> Self {
        Self {
            date_from: Some(date.into()),
            ..Default::default()
        }
    }

    /// Restrict to a single station
    pub fn station(mut self, station_id: impl Into<String>) -> Self {
        self.station_id = Some(station_id.into());
        self
    }

    /// Add an inclusive upper date bound
    pub fn until(mut self, date: impl Into<String>) -> Self {
        self.date_to = Some(date.into());
        self
    }
}

/// A single dated observation value
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Reading {
    pub date: String,
    pub value: Option<f64>,
}

/// Minimum, average and maximum temperature over a filtered range.
///
/// All three are `None` when no measurement matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, sqlx::FromRow)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

/// Row counts and date span of the loaded dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DatasetSummary {
    pub station_count: i64,
    pub measurement_count: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

/// Pooled, read-only handle to the climate database
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl ClimateStore {
    /// Open the database at `path` read-only and check its schema.
    ///
    /// Any failure here is reported as [`ClimateError::StorageUnavailable`],
    /// since the service cannot do anything useful without the store.
    pub async fn open(path: &Path, config: &DatabaseConfig) -> Result<Self> {
        if !path.exists() {
            return Err(ClimateError::StorageUnavailable {
                message: format!("Database file not found: {}", path.display()),
            });
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| ClimateError::StorageUnavailable {
                message: format!("Failed to open {}: {}", path.display(), e),
            })?;

        info!(
            path = %path.display(),
            max_connections = config.max_connections,
            "Opened climate database"
        );

        let store = Self {
            pool,
            path: path.to_path_buf(),
        };
        store.check_schema().await?;

        Ok(store)
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn check_schema(&self) -> Result<()> {
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('measurement', 'station')",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ClimateError::StorageUnavailable {
            message: format!("Failed to read schema: {}", e),
        })?;

        let missing: Vec<&str> = REQUIRED_TABLES
            .iter()
            .copied()
            .filter(|required| !tables.iter().any(|t| t == required))
            .collect();

        if !missing.is_empty() {
            return Err(ClimateError::StorageUnavailable {
                message: format!("Missing tables: {}", missing.join(", ")),
            });
        }

        Ok(())
    }

    /// Greatest measurement date, or `None` for an empty table
    pub async fn max_date(&self) -> Result<Option<String>> {
        let date: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(date)
    }

    /// Dated values of one observation column, ordered by date then row id
    pub async fn query_measurements(
        &self,
        filter: &MeasurementFilter,
        observation: Observation,
    ) -> Result<Vec<Reading>> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT date, ");
        builder.push(observation.column());
        builder.push(" AS value FROM measurement WHERE 1 = 1");
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY date, id");

        let readings: Vec<Reading> = builder.build_query_as().fetch_all(&self.pool).await?;

        debug!(
            observation = ?observation,
            filter = ?filter,
            rows = readings.len(),
            "Fetched measurements"
        );

        Ok(readings)
    }

    /// Every station identifier in table order
    pub async fn list_stations(&self) -> Result<Vec<String>> {
        let stations: Vec<String> = sqlx::query_scalar("SELECT station FROM station ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(stations)
    }

    /// Station with the most measurement rows.
    ///
    /// Equal counts resolve to the lexically smallest station id.
    pub async fn most_active_station(&self) -> Result<Option<String>> {
        let station: Option<String> = sqlx::query_scalar(
            "SELECT station FROM measurement WHERE station IS NOT NULL \
             GROUP BY station ORDER BY COUNT(*) DESC, station ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(station)
    }

    /// MIN/AVG/MAX of `tobs` over the filtered measurements
    pub async fn aggregate_temperature(
        &self,
        filter: &MeasurementFilter,
    ) -> Result<TemperatureSummary> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax \
             FROM measurement WHERE 1 = 1",
        );
        push_filter(&mut builder, filter);

        let summary: TemperatureSummary = builder.build_query_as().fetch_one(&self.pool).await?;
        Ok(summary)
    }

    /// Row counts and date span of both tables
    pub async fn dataset_summary(&self) -> Result<DatasetSummary> {
        let summary: DatasetSummary = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM station) AS station_count, \
             COUNT(*) AS measurement_count, \
             MIN(date) AS first_date, \
             MAX(date) AS last_date \
             FROM measurement",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    /// Lower bound of the trailing window ending at the latest measurement.
    ///
    /// `None` when the measurement table is empty.
    pub async fn window_start(&self, lookback_days: i64) -> Result<Option<String>> {
        match self.max_date().await? {
            Some(max_date) => Ok(Some(one_year_before(&max_date, lookback_days)?)),
            None => Ok(None),
        }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &MeasurementFilter) {
    if let Some(station_id) = &filter.station_id {
        builder.push(" AND station = ").push_bind(station_id.clone());
    }
    if let Some(date_from) = &filter.date_from {
        builder.push(" AND date >= ").push_bind(date_from.clone());
    }
    if let Some(date_to) = &filter.date_to {
        builder.push(" AND date <= ").push_bind(date_to.clone());
    }
}

/// Subtract `lookback_days` from a stored ISO date, returning `YYYY-MM-DD`.
///
/// A trailing time component (`2017-08-23 00:00:00`) is ignored.
pub fn one_year_before(date: &str, lookback_days: i64) -> Result<String> {
    let invalid = || ClimateError::InvalidStoredDate {
        value: date.to_string(),
    };

    let (parsed, _) = NaiveDate::parse_and_remainder(date, "%Y-%m-%d").map_err(|_| invalid())?;
    let start = parsed
        .checked_sub_signed(chrono::Duration::days(lookback_days))
        .ok_or_else(invalid)?;

    Ok(start.format("%Y-%m-%d").to_string())
}
