//! Test dataset generation.
//!
//! Builds SQLite files with the Hawaii schema in a temporary directory so
//! tests can open them through the real read-only store.

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::path::PathBuf;
use tempfile::TempDir;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Busiest station of the generated dataset (one row per day)
pub const BUSY_STATION: &str = "USC00519281";
/// Reports every other day
pub const SPARSE_STATION: &str = "USC00519397";
/// Only has old rows
pub const RETIRED_STATION: &str = "USC00513117";

/// One measurement row as inserted
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRow {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

impl FixtureRow {
    pub fn new(station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Self {
        Self {
            station: station.to_string(),
            date: date.to_string(),
            prcp,
            tobs,
        }
    }
}

/// A generated database and the rows it was filled with
pub struct TestDataset {
    // Held so the directory outlives the test
    _dir: TempDir,
    pub path: PathBuf,
    pub stations: Vec<String>,
    pub rows: Vec<FixtureRow>,
}

impl TestDataset {
    /// Latest date among the rows
    pub fn max_date(&self) -> Option<&str> {
        self.rows.iter().map(|r| r.date.as_str()).max()
    }

    /// Station with the most rows, smallest id on ties
    pub fn most_active_station(&self) -> Option<String> {
        let mut counts = std::collections::BTreeMap::<&str, usize>::new();
        for row in &self.rows {
            *counts.entry(row.station.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .max_by(|(sa, ca), (sb, cb)| ca.cmp(cb).then_with(|| sb.cmp(sa)))
            .map(|(station, _)| station.to_string())
    }
}

/// Create a database holding exactly `stations` and `rows`
pub async fn create_dataset(stations: &[&str], rows: Vec<FixtureRow>) -> Result<TestDataset> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("hawaii.sqlite");

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    sqlx::query(
        "CREATE TABLE station (id INTEGER NOT NULL PRIMARY KEY, station TEXT, name TEXT, \
         latitude FLOAT, longitude FLOAT, elevation FLOAT)",
    )
    .execute(&pool)
    .await?;
    sqlx::query(
        "CREATE TABLE measurement (id INTEGER NOT NULL PRIMARY KEY, station TEXT, date TEXT, \
         prcp FLOAT, tobs FLOAT)",
    )
    .execute(&pool)
    .await?;

    let mut tx = pool.begin().await?;
    for (i, station) in stations.iter().enumerate() {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(*station)
        .bind(format!("TEST STATION {}, HI US", i))
        .bind(21.2 + i as f64 * 0.1)
        .bind(-157.8 - i as f64 * 0.1)
        .bind(3.0 + i as f64 * 10.0)
        .execute(&mut *tx)
        .await?;
    }
    for row in &rows {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(&row.station)
            .bind(&row.date)
            .bind(row.prcp)
            .bind(row.tobs)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    pool.close().await;

    Ok(TestDataset {
        _dir: dir,
        path,
        stations: stations.iter().map(|s| s.to_string()).collect(),
        rows,
    })
}

/// A Hawaii-shaped dataset ending on 2017-08-23.
///
/// - `BUSY_STATION` reports daily from 2016-01-01
/// - `SPARSE_STATION` reports every other day over the same span
/// - `RETIRED_STATION` has a handful of rows in 2010
///
/// Temperatures cycle through 60..80 and every seventh day has no
/// precipitation value.
pub async fn create_hawaii_dataset() -> Result<TestDataset> {
    let mut rows = Vec::new();

    let first = NaiveDate::from_ymd_opt(2016, 1, 1).ok_or("bad fixture date")?;
    let last = NaiveDate::from_ymd_opt(2017, 8, 23).ok_or("bad fixture date")?;

    for (offset, day) in first.iter_days().take_while(|d| *d <= last).enumerate() {
        let date = day.format("%Y-%m-%d").to_string();
        let tobs = 60.0 + (offset % 21) as f64;
        let prcp = if offset % 7 == 0 {
            None
        } else {
            Some((offset % 5) as f64 * 0.1)
        };

        rows.push(FixtureRow::new(BUSY_STATION, &date, prcp, tobs));
        if offset % 2 == 0 {
            rows.push(FixtureRow::new(SPARSE_STATION, &date, prcp.map(|p| p + 0.05), tobs + 2.0));
        }
    }

    for day in 1..=5 {
        let date = format!("2010-01-0{}", day);
        rows.push(FixtureRow::new(RETIRED_STATION, &date, Some(0.2), 55.0 + day as f64));
    }

    create_dataset(&[BUSY_STATION, SPARSE_STATION, RETIRED_STATION], rows).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_hawaii_dataset() {
        let dataset = create_hawaii_dataset().await.unwrap();
        assert!(dataset.path.exists());
        assert_eq!(dataset.stations.len(), 3);
        assert_eq!(dataset.max_date(), Some("2017-08-23"));
        assert_eq!(dataset.most_active_station().as_deref(), Some(BUSY_STATION));
    }
}
