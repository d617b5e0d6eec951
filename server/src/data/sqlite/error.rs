//! SQLite error types

use std::path::PathBuf;

use thiserror::Error;

use crate::data::Dataset;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database file for {dataset} not found: {}", .path.display())]
    MissingDatabase { dataset: Dataset, path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_database_display() {
        let err = SqliteError::MissingDatabase {
            dataset: Dataset::Solar,
            path: PathBuf::from("/data/solar.db"),
        };
        assert_eq!(
            err.to_string(),
            "Database file for solar not found: /data/solar.db"
        );
    }

    #[test]
    fn test_sqlx_error_from() {
        let err: SqliteError = sqlx::Error::RowNotFound.into();
        assert!(err.to_string().starts_with("Database error:"));
    }
}
