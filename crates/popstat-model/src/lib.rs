//! Data model for population trend analysis.
//!
//! This crate holds the types shared by the ingest, analytics and CLI crates:
//!
//! - **Records**: [`PopulationRecord`] and the [`Dataset`] it lives in
//! - **Derived results**: change, snapshot, projection and summary rows
//! - **Configuration**: [`AnalysisConfig`] with column names, reserved regions
//!   and the region lookup table
//! - **Errors**: [`AnalysisError`] for the fatal conditions

pub mod config;
pub mod derived;
pub mod error;
pub mod format;
pub mod ids;
pub mod record;

pub use config::{AnalysisConfig, AnalysisOptions, ColumnNames, RegionConfig, RegionEntry};
pub use derived::{
    ChangeRecord, ColumnSummary, Projection, SnapshotComparison, VitalRecord, YearValue,
};
pub use error::{AnalysisError, Result};
pub use format::{format_count, format_signed, format_thousands};
pub use ids::RegionId;
pub use record::{Dataset, NumericColumn, PopulationRecord};
