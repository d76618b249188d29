//! Normalized population records.

use serde::{Deserialize, Serialize};

use crate::RegionId;

/// One normalized row of the source table.
///
/// Numeric fields are either a finite, non-negative number or `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub region: RegionId,
    pub year: i32,
    pub population: Option<f64>,
    pub births: Option<f64>,
    pub deaths: Option<f64>,
}

impl PopulationRecord {
    pub fn new(region: RegionId, year: i32) -> Self {
        Self {
            region,
            year,
            population: None,
            births: None,
            deaths: None,
        }
    }

    #[must_use]
    pub fn with_population(mut self, value: Option<f64>) -> Self {
        self.population = value;
        self
    }

    #[must_use]
    pub fn with_births(mut self, value: Option<f64>) -> Self {
        self.births = value;
        self
    }

    #[must_use]
    pub fn with_deaths(mut self, value: Option<f64>) -> Self {
        self.deaths = value;
        self
    }

    /// Value of one numeric column.
    pub fn value(&self, column: NumericColumn) -> Option<f64> {
        match column {
            NumericColumn::Population => self.population,
            NumericColumn::Births => self.births,
            NumericColumn::Deaths => self.deaths,
        }
    }
}

/// The three coerced columns of a population record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Population,
    Births,
    Deaths,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 3] = [
        NumericColumn::Population,
        NumericColumn::Births,
        NumericColumn::Deaths,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NumericColumn::Population => "population",
            NumericColumn::Births => "births",
            NumericColumn::Deaths => "deaths",
        }
    }
}

/// An ordered, possibly unsorted collection of records.
///
/// Engine functions only ever borrow a dataset, so one instance can be shared
/// read-only across threads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<PopulationRecord>,
}

impl Dataset {
    pub fn new(records: Vec<PopulationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PopulationRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PopulationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Latest year present in any record.
    pub fn max_year(&self) -> Option<i32> {
        self.records.iter().map(|record| record.year).max()
    }

    pub fn into_records(self) -> Vec<PopulationRecord> {
        self.records
    }
}

impl FromIterator<PopulationRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = PopulationRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a PopulationRecord;
    type IntoIter = std::slice::Iter<'a, PopulationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
