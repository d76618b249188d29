//! Year by region pivot of one numeric column.
//!
//! Two fill policies exist and must not be mixed up:
//! - [`FillPolicy::Zero`] for stacked aggregates, where an absent region adds
//!   nothing to the year's total
//! - [`FillPolicy::Missing`] for comparisons, where an absent region must not
//!   look like a region of zero people

use std::collections::{BTreeMap, BTreeSet, HashMap};

use polars::prelude::*;
use popstat_model::{Dataset, NumericColumn};
use serde::Serialize;
use tracing::warn;

use crate::catalog::RegionCatalog;

/// How absent or missing cells are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    Zero,
    Missing,
}

/// Rectangular year by region table.
///
/// Every year row holds an entry for every region column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideTable {
    pub value_column: NumericColumn,
    pub fill: FillPolicy,
    /// Canonical codes in catalog order, only regions present in the data.
    pub regions: Vec<String>,
    pub rows: BTreeMap<i32, BTreeMap<String, Option<f64>>>,
    /// Rows dropped because their region is not in the catalog.
    pub unmapped_rows: usize,
    /// Rows that overwrote an earlier row for the same year and region.
    pub collisions: usize,
}

impl WideTable {
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.keys().copied()
    }

    /// Cell value; `None` for absent cells under the missing policy.
    pub fn value(&self, year: i32, code: &str) -> Option<f64> {
        self.rows.get(&year)?.get(code).copied().flatten()
    }

    /// One region's annual series.
    pub fn region_series(&self, code: &str) -> Vec<(i32, Option<f64>)> {
        self.rows
            .iter()
            .filter_map(|(year, cells)| cells.get(code).map(|value| (*year, *value)))
            .collect()
    }

    /// Sum of all present region values for a year.
    pub fn year_total(&self, year: i32) -> Option<f64> {
        let cells = self.rows.get(&year)?;
        Some(cells.values().flatten().sum())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table as a frame: a `year` column then one Float64 column
    /// per region code.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let years: Vec<i32> = self.years().collect();
        let mut columns = Vec::with_capacity(self.regions.len() + 1);
        columns.push(Series::new("year".into(), years).into_column());
        for code in &self.regions {
            let values: Vec<Option<f64>> = self
                .rows
                .values()
                .map(|cells| cells.get(code).copied().flatten())
                .collect();
            columns.push(Series::new(code.as_str().into(), values).into_column());
        }
        DataFrame::new(columns)
    }
}

/// Pivots `column` to year rows and region columns.
///
/// The nationwide pseudo-region is excluded and regions outside the catalog
/// are dropped (counted and logged). When several rows share a year and a
/// region, the later row in input order wins.
pub fn regional_wide_table(
    dataset: &Dataset,
    catalog: &RegionCatalog,
    column: NumericColumn,
    fill: FillPolicy,
) -> WideTable {
    let mut cells: HashMap<(i32, &str), Option<f64>> = HashMap::new();
    let mut years = BTreeSet::new();
    let mut codes = BTreeSet::new();
    let mut unmapped: BTreeSet<&str> = BTreeSet::new();
    let mut unmapped_rows = 0usize;
    let mut collisions = 0usize;

    for record in dataset {
        let region = record.region.as_str();
        if catalog.is_nationwide(region) {
            continue;
        }
        let Some(code) = catalog.canonical_code(region) else {
            unmapped_rows += 1;
            unmapped.insert(region);
            continue;
        };
        if cells
            .insert((record.year, code), record.value(column))
            .is_some()
        {
            collisions += 1;
        }
        years.insert(record.year);
        codes.insert(code);
    }

    if unmapped_rows > 0 {
        warn!(
            unmapped_rows,
            regions = ?unmapped,
            "dropped rows with regions outside the catalog"
        );
    }
    if collisions > 0 {
        warn!(
            collisions,
            column = column.as_str(),
            "duplicate year/region rows; later rows win"
        );
    }

    let mut regions: Vec<&str> = codes.into_iter().collect();
    regions.sort_by_key(|code| catalog.position(code));

    let rows = years
        .into_iter()
        .map(|year| {
            let row = regions
                .iter()
                .map(|code| {
                    let value = cells.get(&(year, *code)).copied().flatten();
                    let value = match fill {
                        FillPolicy::Zero => Some(value.unwrap_or(0.0)),
                        FillPolicy::Missing => value,
                    };
                    ((*code).to_string(), value)
                })
                .collect();
            (year, row)
        })
        .collect();

    WideTable {
        value_column: column,
        fill,
        regions: regions.into_iter().map(str::to_string).collect(),
        rows,
        unmapped_rows,
        collisions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popstat_model::{PopulationRecord, RegionId};

    fn record(region: &str, year: i32, population: Option<f64>) -> PopulationRecord {
        PopulationRecord::new(RegionId::new(region).unwrap(), year).with_population(population)
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record("서울", 2020, Some(100.0)),
            record("부산", 2020, Some(50.0)),
            record("서울", 2021, Some(110.0)),
            record("전국", 2021, Some(1000.0)),
            record("Atlantis", 2021, Some(7.0)),
        ])
    }

    #[test]
    fn zero_fill_is_rectangular() {
        let table = regional_wide_table(
            &dataset(),
            &RegionCatalog::default(),
            NumericColumn::Population,
            FillPolicy::Zero,
        );
        assert_eq!(table.regions, vec!["Seoul", "Busan"]);
        assert_eq!(table.value(2021, "Busan"), Some(0.0));
        assert_eq!(table.year_total(2020), Some(150.0));
        assert_eq!(table.year_total(2021), Some(110.0));
        assert_eq!(table.unmapped_rows, 1);
        assert!(table.rows.values().all(|row| row.len() == 2));
    }

    #[test]
    fn missing_fill_keeps_gaps() {
        let table = regional_wide_table(
            &dataset(),
            &RegionCatalog::default(),
            NumericColumn::Population,
            FillPolicy::Missing,
        );
        assert_eq!(table.value(2021, "Busan"), None);
        assert_eq!(table.rows[&2021].get("Busan"), Some(&None));
        assert_eq!(
            table.region_series("Busan"),
            vec![(2020, Some(50.0)), (2021, None)]
        );
    }

    #[test]
    fn later_duplicate_wins() {
        let dataset = Dataset::new(vec![
            record("서울", 2020, Some(100.0)),
            record("서울", 2020, Some(120.0)),
        ]);
        let table = regional_wide_table(
            &dataset,
            &RegionCatalog::default(),
            NumericColumn::Population,
            FillPolicy::Missing,
        );
        assert_eq!(table.value(2020, "Seoul"), Some(120.0));
        assert_eq!(table.collisions, 1);
    }

    #[test]
    fn to_frame_has_year_and_region_columns() {
        let table = regional_wide_table(
            &dataset(),
            &RegionCatalog::default(),
            NumericColumn::Population,
            FillPolicy::Zero,
        );
        let df = table.to_frame().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let busan = df.column("Busan").unwrap().f64().unwrap();
        assert_eq!(busan.get(1), Some(0.0));
    }
}
