//! Nationwide annual series.

use popstat_model::{Dataset, VitalRecord, YearValue};

use crate::catalog::RegionCatalog;

/// Nationwide population by year, ascending.
///
/// Rows with a missing population are dropped. A dataset without nationwide
/// rows yields an empty series.
pub fn national_series(dataset: &Dataset, catalog: &RegionCatalog) -> Vec<YearValue> {
    let mut series: Vec<YearValue> = dataset
        .iter()
        .filter(|record| catalog.is_nationwide(record.region.as_str()))
        .filter_map(|record| {
            record.population.map(|value| YearValue {
                year: record.year,
                value,
            })
        })
        .collect();
    series.sort_by_key(|point| point.year);
    series
}

/// Nationwide rows with population, births and deaths, ascending by year.
///
/// Missing values are kept as `None`; the projector decides what to do with
/// them.
pub fn national_vitals(dataset: &Dataset, catalog: &RegionCatalog) -> Vec<VitalRecord> {
    let mut vitals: Vec<VitalRecord> = dataset
        .iter()
        .filter(|record| catalog.is_nationwide(record.region.as_str()))
        .map(|record| VitalRecord {
            year: record.year,
            population: record.population,
            births: record.births,
            deaths: record.deaths,
        })
        .collect();
    vitals.sort_by_key(|row| row.year);
    vitals
}
