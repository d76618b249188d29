//! Schema normalization.
//!
//! The single place where raw cells are interpreted. Every derived table is
//! computed from the [`Dataset`] produced here, so the sentinel rule and the
//! coercion rule exist exactly once.
//!
//! Steps, per row:
//! 1. reject rows with a blank region or a non-integer year (malformed)
//! 2. rewrite sentinel cells of the zero-sentinel region to `0`
//! 3. coerce population, births and deaths; failures become missing

mod frame;
pub mod numeric;
pub mod sentinel;

use polars::prelude::DataFrame;
use popstat_model::{AnalysisConfig, Dataset, NumericColumn, PopulationRecord, RegionId, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

pub use frame::{raw_records, records_to_frame};
use numeric::{parse_count, parse_year};
use sentinel::repair_sentinel;

/// One source row before interpretation. `None` is a null cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub region: Option<String>,
    pub year: Option<String>,
    pub population: Option<String>,
    pub births: Option<String>,
    pub deaths: Option<String>,
}

impl RawRecord {
    pub fn new(region: &str, year: &str, population: &str, births: &str, deaths: &str) -> Self {
        Self {
            region: Some(region.to_string()),
            year: Some(year.to_string()),
            population: Some(population.to_string()),
            births: Some(births.to_string()),
            deaths: Some(deaths.to_string()),
        }
    }
}

/// Per-column count of cells that could not be coerced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoercionMisses {
    pub population: usize,
    pub births: usize,
    pub deaths: usize,
}

impl CoercionMisses {
    fn record(&mut self, column: NumericColumn) {
        match column {
            NumericColumn::Population => self.population += 1,
            NumericColumn::Births => self.births += 1,
            NumericColumn::Deaths => self.deaths += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.population + self.births + self.deaths
    }
}

/// What normalization did to the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub rows_read: usize,
    pub malformed_rows: usize,
    pub sentinel_rewrites: usize,
    pub coercion_misses: CoercionMisses,
}

/// Normalized records plus the report describing how they were obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub dataset: Dataset,
    pub report: NormalizationReport,
}

/// Normalizes a raw frame.
///
/// Fails only when a required column is missing.
pub fn normalize(df: &DataFrame, config: &AnalysisConfig) -> Result<Normalized> {
    let raw = raw_records(df, &config.columns)?;
    Ok(normalize_records(raw, config))
}

/// Normalizes raw rows. Never fails; bad cells and rows are counted instead.
pub fn normalize_records(raw: Vec<RawRecord>, config: &AnalysisConfig) -> Normalized {
    let zero_region = &config.regions.sentinel_zero_region;
    let sentinel = &config.regions.sentinel;
    let mut report = NormalizationReport {
        rows_read: raw.len(),
        ..NormalizationReport::default()
    };
    let mut records = Vec::with_capacity(raw.len());

    for (idx, mut row) in raw.into_iter().enumerate() {
        let region = row.region.as_deref().and_then(|r| RegionId::new(r).ok());
        let year = row.year.as_deref().and_then(parse_year);
        let (Some(region), Some(year)) = (region, year) else {
            debug!(row = idx, region = ?row.region, year = ?row.year, "rejected malformed row");
            report.malformed_rows += 1;
            continue;
        };

        for cell in [&mut row.population, &mut row.births, &mut row.deaths] {
            if repair_sentinel(region.as_str(), cell, zero_region, sentinel) {
                report.sentinel_rewrites += 1;
            }
        }

        let mut coerce = |column: NumericColumn, cell: Option<&str>| {
            let value = cell.and_then(parse_count);
            if value.is_none() {
                report.coercion_misses.record(column);
            }
            value
        };
        let population = coerce(NumericColumn::Population, row.population.as_deref());
        let births = coerce(NumericColumn::Births, row.births.as_deref());
        let deaths = coerce(NumericColumn::Deaths, row.deaths.as_deref());

        records.push(
            PopulationRecord::new(region, year)
                .with_population(population)
                .with_births(births)
                .with_deaths(deaths),
        );
    }

    if report.malformed_rows > 0 {
        warn!(
            malformed_rows = report.malformed_rows,
            "dropped rows with unparseable region or year"
        );
    }
    info!(
        rows_read = report.rows_read,
        records = records.len(),
        sentinel_rewrites = report.sentinel_rewrites,
        missing_population = report.coercion_misses.population,
        missing_births = report.coercion_misses.births,
        missing_deaths = report.coercion_misses.deaths,
        "normalization complete"
    );

    Normalized {
        dataset: Dataset::new(records),
        report,
    }
}
