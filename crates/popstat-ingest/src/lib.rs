//! Population data ingestion.
//!
//! Loads the raw population table (CSV) into a Polars `DataFrame`. Every cell
//! is read as text: numeric coercion, sentinel repair and schema checks belong
//! to the analytics normalizer, so nothing is guessed here.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use popstat_ingest::read_population_csv;
//!
//! let df = read_population_csv(Path::new("population_trends.csv"))?;
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_population_csv,
    validate_dataframe_shape, validate_encoding,
};
