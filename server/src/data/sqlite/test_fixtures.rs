//! Seeded dataset files for tests

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::core::config::DatasetsConfig;

const AIR_QUALITY_SEED: &str = r#"
CREATE TABLE p_environ (
    sensor_id INTEGER NOT NULL,
    tdate TEXT NOT NULL,
    ttime TEXT NOT NULL,
    param TEXT NOT NULL,
    value REAL
);
INSERT INTO p_environ VALUES
    (1, '2023-01-01', '08:00:00', 'temp', 21.5),
    (1, '2023-01-01', '08:00:00', 'humidity', 40.0),
    (1, '2023-01-01', '12:00:00', 'pm25', 8.2),
    (1, '2023-01-02', '08:00:00', 'temp', 19.0),
    (1, '2023-01-02', '12:00:00', 'humidity', 45.5),
    (1, '2023-01-02', '12:00:00', 'pm25', 10.1),
    (1, '2023-01-02', '18:00:00', 'pressure', 1013.2),
    (1, '2023-01-03', '08:00:00', 'pm25', NULL);
"#;

const SOLAR_SEED: &str = r#"
CREATE TABLE sunpower (
    tdate TEXT NOT NULL,
    ttime TEXT NOT NULL,
    param TEXT NOT NULL,
    kwh REAL
);
INSERT INTO sunpower VALUES
    ('2023-01-01', '12:00:00', 'ep', 3.4),
    ('2023-01-01', '12:00:00', 'eu', 1.2),
    ('2023-01-02', '12:00:00', 'ep', 2.9),
    ('2023-01-02', '12:00:00', 'mp', 4.1);
"#;

const DARKSKY_SEED: &str = r#"
CREATE TABLE darksky (
    tdate TEXT NOT NULL,
    ttime TEXT NOT NULL,
    param TEXT NOT NULL,
    forecast REAL,
    summary TEXT
);
INSERT INTO darksky VALUES
    ('2023-01-01', '06:00:00', 'for_temperature', 12.0, 'Clear'),
    ('2023-01-02', '06:00:00', 'for_temperature', 11.5, 'Cloudy'),
    ('2023-01-02', '06:00:00', 'for_uv_index', 2, 'Cloudy');
"#;

/// Open a writable pool on `path`, creating the file
pub(crate) async fn writable_pool(path: &Path) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    SqlitePool::connect_with(options).await.unwrap()
}

async fn seed(path: &Path, sql: &str) {
    let pool = writable_pool(path).await;
    sqlx::raw_sql(sql).execute(&pool).await.unwrap();
    pool.close().await;
}

/// Create the three dataset files under `dir` and return their config
pub(crate) async fn seed_datasets(dir: &Path) -> DatasetsConfig {
    let config = DatasetsConfig {
        air_quality: dir.join("air.db"),
        solar: dir.join("solar.db"),
        darksky: dir.join("darksky.db"),
    };

    if !config.air_quality.exists() {
        seed(&config.air_quality, AIR_QUALITY_SEED).await;
        seed(&config.solar, SOLAR_SEED).await;
        seed(&config.darksky, DARKSKY_SEED).await;
    }

    config
}
