//! Population trend analytics engine.
//!
//! Turns a raw population table into cleaned records and the derived tables a
//! presentation layer needs.
//!
//! # Overview
//!
//! - **normalization**: sentinel repair and numeric coercion (the only place
//!   raw cells are interpreted)
//! - **catalog**: native region identifier to canonical code lookup
//! - **series**: nationwide annual series and the vital series for forecasting
//! - **wide**: year by region pivot with an explicit fill policy
//! - **changes**: year-over-year deltas ranked with tie keeping
//! - **snapshot**: two-year comparison per region
//! - **projection**: constant-rate extrapolation of the national population
//! - **stats**: describe-style summary, missing counts and duplicates
//! - **report**: [`analyze`] runs all of the above once
//!
//! # Example
//!
//! ```ignore
//! use popstat_analytics::{RegionCatalog, analyze, normalize};
//! use popstat_model::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! let catalog = RegionCatalog::from_config(&config.regions)?;
//! let normalized = normalize(&df, &config)?;
//! let report = analyze(&normalized.dataset, &catalog, &config.analysis);
//! ```
//!
//! # Design Principles
//!
//! - **Pure**: every function borrows its input and allocates its own output
//! - **Graceful**: only schema errors are fatal; bad cells, unknown regions,
//!   zero denominators and impossible forecasts degrade to missing values
//! - **Deterministic**: ties and duplicates resolve by input order

pub mod catalog;
pub mod changes;
pub mod normalization;
pub mod projection;
pub mod report;
pub mod series;
pub mod snapshot;
pub mod stats;
pub mod wide;

pub use catalog::{CatalogEntry, RegionCatalog};
pub use changes::{keep_top_with_ties, ranked_changes, year_over_year_changes};
pub use normalization::{
    CoercionMisses, NormalizationReport, Normalized, RawRecord, normalize, normalize_records,
    records_to_frame,
};
pub use projection::{PROJECTION_WINDOW, Unavailable, project_population};
pub use report::{AnalysisReport, ProjectionOutcome, SnapshotReport, analyze};
pub use series::{national_series, national_vitals};
pub use snapshot::{compare_years, default_reference_years, reference_years_ending};
pub use stats::{MissingCount, describe, duplicate_rows, missing_counts};
pub use wide::{FillPolicy, WideTable, regional_wide_table};
