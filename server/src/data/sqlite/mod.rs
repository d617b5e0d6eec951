//! SQLite readings store
//!
//! Each dataset is a separate SQLite file opened read-only behind its own
//! connection pool. The API never writes, so no migrations run and missing
//! files are a startup error rather than being created.

pub mod error;
mod readings;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::SqliteError;
pub use readings::{Reading, fetch_readings};
pub use sqlx::SqlitePool;

use std::path::Path;
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::log::LevelFilter;

use super::Dataset;
use super::filters::Predicate;
use crate::core::config::DatasetsConfig;
use crate::core::constants::{SQLITE_BUSY_TIMEOUT_SECS, SQLITE_MAX_CONNECTIONS};

/// Read-only connection pools for every dataset
///
/// Created once at startup and shared across request handlers.
pub struct ReadingsStore {
    air_quality: SqlitePool,
    solar: SqlitePool,
    darksky: SqlitePool,
}

impl ReadingsStore {
    /// Open a pool per configured dataset file
    pub async fn init(config: &DatasetsConfig) -> Result<Self, SqliteError> {
        let (air_quality, solar, darksky) = tokio::try_join!(
            open_pool(Dataset::AirQuality, config.path(Dataset::AirQuality)),
            open_pool(Dataset::Solar, config.path(Dataset::Solar)),
            open_pool(Dataset::Darksky, config.path(Dataset::Darksky)),
        )?;

        tracing::debug!("ReadingsStore initialized");
        Ok(Self {
            air_quality,
            solar,
            darksky,
        })
    }

    pub fn pool(&self, dataset: Dataset) -> &SqlitePool {
        match dataset {
            Dataset::AirQuality => &self.air_quality,
            Dataset::Solar => &self.solar,
            Dataset::Darksky => &self.darksky,
        }
    }

    /// Fetch rows of `dataset`, optionally restricted by `predicate`
    pub async fn fetch(
        &self,
        dataset: Dataset,
        predicate: Option<&Predicate>,
    ) -> Result<Vec<Reading>, SqliteError> {
        fetch_readings(self.pool(dataset), dataset, predicate).await
    }

    /// Close every pool gracefully
    pub async fn close(&self) {
        tokio::join!(
            self.air_quality.close(),
            self.solar.close(),
            self.darksky.close()
        );
        tracing::debug!("SQLite pools closed");
    }
}

async fn open_pool(dataset: Dataset, path: &Path) -> Result<SqlitePool, SqliteError> {
    if !path.is_file() {
        return Err(SqliteError::MissingDatabase {
            dataset,
            path: path.to_path_buf(),
        });
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .create_if_missing(false)
        .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
        .log_statements(LevelFilter::Trace);

    let pool = SqlitePoolOptions::new()
        .max_connections(SQLITE_MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    tracing::debug!(dataset = %dataset, path = %path.display(), "Opened dataset");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::seed_datasets;
    use super::*;
    use crate::data::filters::{RequestParameters, build_predicate};

    #[tokio::test]
    async fn test_init_opens_every_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_datasets(dir.path()).await;
        let store = ReadingsStore::init(&config).await.unwrap();

        for dataset in Dataset::ALL {
            let rows = store.fetch(dataset, None).await.unwrap();
            assert!(!rows.is_empty(), "{dataset} should have rows");
        }
        store.close().await;
    }

    #[tokio::test]
    async fn test_init_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = seed_datasets(dir.path()).await;
        config.solar = dir.path().join("nope.db");

        match ReadingsStore::init(&config).await {
            Err(SqliteError::MissingDatabase { dataset, .. }) => {
                assert_eq!(dataset, Dataset::Solar)
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("expected missing database error"),
        }
    }

    #[tokio::test]
    async fn test_pools_are_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_datasets(dir.path()).await;
        let store = ReadingsStore::init(&config).await.unwrap();

        let result = sqlx::query("DELETE FROM p_environ")
            .execute(store.pool(Dataset::AirQuality))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_same_predicate_across_datasets() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_datasets(dir.path()).await;
        let store = ReadingsStore::init(&config).await.unwrap();

        let params = RequestParameters::from_pairs([("sdate", "2023-01-02")]);
        let predicate = build_predicate(&params).unwrap();

        for dataset in Dataset::ALL {
            let rows = store.fetch(dataset, Some(&predicate)).await.unwrap();
            assert!(!rows.is_empty());
            assert!(
                rows.iter()
                    .all(|r| r["tdate"].as_str().unwrap() >= "2023-01-02"),
                "{dataset} returned rows before sdate"
            );
        }
    }
}
