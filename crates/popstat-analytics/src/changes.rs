//! Year-over-year population changes per region.

use std::collections::HashMap;

use popstat_model::{ChangeRecord, Dataset, PopulationRecord};
use tracing::debug;

use crate::catalog::RegionCatalog;

/// Deltas between consecutive observations of each region.
///
/// Regions keep their first-appearance order and each region's rows are
/// ordered by year. A year observed more than once for a region counts once,
/// the last row winning. The first observation of a region produces no record,
/// and neither does a transition where either side has no population. Regions
/// outside the catalog are kept with `code: None`.
pub fn year_over_year_changes(dataset: &Dataset, catalog: &RegionCatalog) -> Vec<ChangeRecord> {
    let mut groups: Vec<Vec<&PopulationRecord>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in dataset {
        let region = record.region.as_str();
        if catalog.is_nationwide(region) {
            continue;
        }
        let slot = *index.entry(region).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(record);
    }

    let mut changes = Vec::new();
    for mut group in groups {
        group.sort_by_key(|record| record.year);
        group.dedup_by(|later, kept| {
            let duplicate = later.year == kept.year;
            if duplicate {
                debug!(
                    region = %later.region,
                    year = later.year,
                    "duplicate year, last row kept"
                );
                std::mem::swap(later, kept);
            }
            duplicate
        });
        for pair in group.windows(2) {
            let (previous, current) = (pair[0], pair[1]);
            let (Some(before), Some(after)) = (previous.population, current.population) else {
                debug!(
                    region = %current.region,
                    year = current.year,
                    "skipped change with missing population"
                );
                continue;
            };
            changes.push(ChangeRecord {
                year: current.year,
                region: current.region.clone(),
                code: catalog
                    .canonical_code(current.region.as_str())
                    .map(str::to_string),
                population: after,
                delta: after - before,
            });
        }
    }
    changes
}

/// Changes ranked by signed delta, largest increase first.
///
/// Keeps the `top_n` largest plus every record tied with the last of them.
pub fn ranked_changes(
    dataset: &Dataset,
    catalog: &RegionCatalog,
    top_n: usize,
) -> Vec<ChangeRecord> {
    let mut changes = year_over_year_changes(dataset, catalog);
    // stable: ties keep input order
    changes.sort_by(|a, b| b.delta.total_cmp(&a.delta));
    keep_top_with_ties(changes, top_n)
}

/// Truncates a descending list to `top_n` entries, extended by ties.
pub fn keep_top_with_ties(mut sorted: Vec<ChangeRecord>, top_n: usize) -> Vec<ChangeRecord> {
    if top_n == 0 {
        sorted.clear();
        return sorted;
    }
    if sorted.len() <= top_n {
        return sorted;
    }
    let threshold = sorted[top_n - 1].delta;
    let cut = sorted[top_n..]
        .iter()
        .position(|change| change.delta < threshold)
        .map_or(sorted.len(), |offset| top_n + offset);
    sorted.truncate(cut);
    sorted
}
