//! Error types for population data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a population table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is too large ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has a header but no data rows.
    #[error("CSV file has no data rows: {path}")]
    EmptyDataFrame { path: PathBuf },

    /// A header cell is blank.
    #[error("CSV file {path} has an empty column name")]
    EmptyColumnName { path: PathBuf },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/population_trends.csv"),
        };
        assert_eq!(
            err.to_string(),
            "CSV file not found: /path/to/population_trends.csv"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
