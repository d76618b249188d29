//! One-shot analysis of a normalized dataset.

use popstat_model::{
    AnalysisOptions, ChangeRecord, ColumnSummary, Dataset, NumericColumn, Projection,
    SnapshotComparison, YearValue,
};
use serde::Serialize;
use tracing::{info, info_span};

use crate::catalog::RegionCatalog;
use crate::changes::ranked_changes;
use crate::projection::project_population;
use crate::series::{national_series, national_vitals};
use crate::snapshot::{compare_years, default_reference_years, reference_years_ending};
use crate::stats::{MissingCount, describe, duplicate_rows, missing_counts};
use crate::wide::{FillPolicy, WideTable, regional_wide_table};

/// Every derived table for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub records: usize,
    pub summary: Vec<ColumnSummary>,
    pub missing: Vec<MissingCount>,
    pub duplicate_rows: usize,
    pub national_series: Vec<YearValue>,
    /// Zero-filled regional population, suitable for stacked totals.
    pub stacked_population: WideTable,
    pub ranked_changes: Vec<ChangeRecord>,
    /// `None` when the dataset has no years to compare.
    pub snapshot: Option<SnapshotReport>,
    pub projection: ProjectionOutcome,
}

/// Snapshot comparison with the years it was taken for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotReport {
    pub year_a: i32,
    pub year_b: i32,
    pub rows: Vec<SnapshotComparison>,
}

/// Projection result or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProjectionOutcome {
    Projected(Projection),
    Unavailable { target_year: i32, reason: String },
}

impl ProjectionOutcome {
    pub fn projection(&self) -> Option<&Projection> {
        match self {
            ProjectionOutcome::Projected(projection) => Some(projection),
            ProjectionOutcome::Unavailable { .. } => None,
        }
    }
}

/// Runs every analysis over `dataset`.
///
/// The dataset is only borrowed, so several analyses with different options
/// may run concurrently over the same data.
pub fn analyze(
    dataset: &Dataset,
    catalog: &RegionCatalog,
    options: &AnalysisOptions,
) -> AnalysisReport {
    let span = info_span!("analyze", records = dataset.len());
    let _guard = span.enter();

    let snapshot = snapshot_years(dataset, options).map(|(year_a, year_b)| SnapshotReport {
        year_a,
        year_b,
        rows: compare_years(dataset, catalog, year_a, year_b),
    });

    let projection = match project_population(
        &national_vitals(dataset, catalog),
        options.target_year,
    ) {
        Ok(projection) => ProjectionOutcome::Projected(projection),
        Err(reason) => {
            info!(target_year = options.target_year, %reason, "projection unavailable");
            ProjectionOutcome::Unavailable {
                target_year: options.target_year,
                reason: reason.to_string(),
            }
        }
    };

    let report = AnalysisReport {
        records: dataset.len(),
        summary: describe(dataset),
        missing: missing_counts(dataset),
        duplicate_rows: duplicate_rows(dataset),
        national_series: national_series(dataset, catalog),
        stacked_population: regional_wide_table(
            dataset,
            catalog,
            NumericColumn::Population,
            FillPolicy::Zero,
        ),
        ranked_changes: ranked_changes(dataset, catalog, options.top_n),
        snapshot,
        projection,
    };

    info!(
        ranked_changes = report.ranked_changes.len(),
        snapshot_rows = report.snapshot.as_ref().map_or(0, |snapshot| snapshot.rows.len()),
        "analysis complete"
    );
    report
}

/// Explicit years win; otherwise the latest year and `window` years before it.
fn snapshot_years(dataset: &Dataset, options: &AnalysisOptions) -> Option<(i32, i32)> {
    match (options.year_a, options.year_b) {
        (None, None) => default_reference_years(dataset, options.snapshot_window),
        (year_a, year_b) => {
            let year_b = year_b.or_else(|| dataset.max_year())?;
            match year_a {
                Some(year_a) => Some((year_a, year_b)),
                None => reference_years_ending(year_b, options.snapshot_window),
            }
        }
    }
}
