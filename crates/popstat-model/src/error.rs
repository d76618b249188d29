//! Error types for population analysis.
//!
//! Only schema and configuration problems are errors. Row-level conditions
//! (unparseable cells, unknown regions, zero denominators, an impossible
//! forecast) are recovered where they happen and never reach this type.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort a whole analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    // === Schema Errors ===
    /// One or more required columns are absent from the input table.
    #[error("required column(s) not found: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A region identifier is blank.
    #[error("invalid region identifier: {0:?}")]
    InvalidRegionId(String),

    // === Configuration Errors ===
    /// Configuration is internally inconsistent.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for AnalysisError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
