//! Two-year population comparison per region.

use popstat_model::{Dataset, NumericColumn, SnapshotComparison};
use tracing::debug;

use crate::catalog::RegionCatalog;
use crate::wide::{FillPolicy, regional_wide_table};

/// Reference years `(latest - window, latest)` for the dataset.
///
/// The window is a caller convention; [`compare_years`] accepts any pair.
/// `None` for an empty dataset.
pub fn default_reference_years(dataset: &Dataset, window: u16) -> Option<(i32, i32)> {
    reference_years_ending(dataset.max_year()?, window)
}

/// Reference years `(year_b - window, year_b)`, `None` when the earlier year
/// would underflow.
pub fn reference_years_ending(year_b: i32, window: u16) -> Option<(i32, i32)> {
    let year_a = year_b.checked_sub(i32::from(window))?;
    Some((year_a, year_b))
}

/// Compares each region's population in `year_a` and `year_b`.
///
/// Inner join: a region without a population in both years is left out.
/// The percentage is `None` when the `year_a` population is zero. Rows are
/// ordered by absolute change, largest first.
pub fn compare_years(
    dataset: &Dataset,
    catalog: &RegionCatalog,
    year_a: i32,
    year_b: i32,
) -> Vec<SnapshotComparison> {
    let table = regional_wide_table(
        dataset,
        catalog,
        NumericColumn::Population,
        FillPolicy::Missing,
    );

    let mut rows = Vec::with_capacity(table.regions.len());
    for code in &table.regions {
        let (Some(past), Some(latest)) = (table.value(year_a, code), table.value(year_b, code))
        else {
            continue;
        };
        let Some(region) = catalog.native_id(code) else {
            continue;
        };
        let absolute_change = latest - past;
        let percent_change = if past == 0.0 {
            debug!(region = %region, year = year_a, "percent change undefined for zero base");
            None
        } else {
            Some(absolute_change / past * 100.0)
        };
        rows.push(SnapshotComparison {
            region: region.clone(),
            code: code.clone(),
            population_latest: latest,
            population_past: past,
            absolute_change,
            percent_change,
        });
    }

    rows.sort_by(|a, b| b.absolute_change.total_cmp(&a.absolute_change));
    rows
}
