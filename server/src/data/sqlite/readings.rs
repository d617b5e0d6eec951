//! Readings queries
//!
//! Tables are read with `SELECT *` and decoded dynamically, since each
//! dataset has its own value columns. Values keep their SQLite storage
//! class: INTEGER and REAL become JSON numbers, TEXT a string, NULL null.

use serde_json::{Map, Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};

use super::SqliteError;
use crate::data::Dataset;
use crate::data::filters::{Predicate, SqlParams};

/// One table row keyed by column name
pub type Reading = Map<String, Value>;

/// Fetch rows from the dataset's table.
///
/// Every literal in `predicate` is bound as a parameter; only the fixed
/// table name and column names appear in the SQL text.
pub async fn fetch_readings(
    pool: &SqlitePool,
    dataset: Dataset,
    predicate: Option<&Predicate>,
) -> Result<Vec<Reading>, SqliteError> {
    let mut params = SqlParams::default();
    let sql = match predicate.filter(|p| !p.is_unconditional()) {
        Some(predicate) => format!(
            "SELECT * FROM {} WHERE {}",
            dataset.table(),
            predicate.to_sql(&mut params)
        ),
        None => format!("SELECT * FROM {}", dataset.table()),
    };

    tracing::trace!(dataset = %dataset, sql = %sql, binds = ?params.values, "Fetching readings");

    let mut query = sqlx::query(&sql);
    for value in &params.values {
        query = query.bind(value.as_str());
    }

    let rows = query.fetch_all(pool).await?;
    let readings = rows
        .iter()
        .map(row_to_reading)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(dataset = %dataset, rows = readings.len(), "Fetched readings");
    Ok(readings)
}

fn row_to_reading(row: &SqliteRow) -> Result<Reading, sqlx::Error> {
    let mut reading = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let value = column_value(row, column.ordinal())?;
        reading.insert(column.name().to_string(), value);
    }
    Ok(reading)
}

fn column_value(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage_class = raw.type_info().name().to_ascii_uppercase();

    let value = match storage_class.as_str() {
        "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
        "REAL" => Number::from_f64(row.try_get::<f64, _>(index)?)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BLOB" => Value::Null,
        _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}
