//! Tables and scalars derived from a [`Dataset`](crate::Dataset).
//!
//! Every value here is recomputed on each analysis run; none of them is cached.

use serde::{Deserialize, Serialize};

use crate::RegionId;
use crate::format::format_signed;

/// One point of an annual series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// Nationwide row with the vital counts used by the projector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalRecord {
    pub year: i32,
    pub population: Option<f64>,
    pub births: Option<f64>,
    pub deaths: Option<f64>,
}

/// Year-over-year population change of one region.
///
/// `delta` is measured against the previous available observation of the same
/// region, which is not necessarily the previous calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub year: i32,
    pub region: RegionId,
    /// Canonical code, `None` when the region is not in the catalog.
    pub code: Option<String>,
    pub population: f64,
    pub delta: f64,
}

impl ChangeRecord {
    /// Delta with an explicit sign and thousands separators, e.g. `+50,000`.
    pub fn formatted_delta(&self) -> String {
        format_signed(self.delta)
    }

    /// Canonical code when known, otherwise the raw region identifier.
    pub fn display_region(&self) -> &str {
        self.code.as_deref().unwrap_or(self.region.as_str())
    }
}

/// Two-year comparison of one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotComparison {
    pub region: RegionId,
    pub code: String,
    pub population_latest: f64,
    pub population_past: f64,
    pub absolute_change: f64,
    /// `None` when the past population is zero.
    pub percent_change: Option<f64>,
}

/// Result of the constant-rate extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub target_year: i32,
    pub projected_population: f64,
    pub last_year: i32,
    pub last_population: f64,
    pub avg_births: f64,
    pub avg_deaths: f64,
    /// Number of trailing rows the averages were taken over.
    pub window_years: usize,
}

impl Projection {
    /// Average natural change per year (births minus deaths).
    pub fn natural_change(&self) -> f64 {
        self.avg_births - self.avg_deaths
    }
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub missing: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}
