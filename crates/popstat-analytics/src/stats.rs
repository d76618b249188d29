//! Descriptive statistics over a dataset.

use std::collections::HashSet;

use popstat_model::{ColumnSummary, Dataset, NumericColumn};
use serde::Serialize;

/// Missing-value count of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// Count, mean, sample standard deviation, min, quartiles and max for the
/// year column and each numeric column.
///
/// Quartiles interpolate linearly between order statistics. Statistics that
/// are undefined for the number of present values are `None`.
pub fn describe(dataset: &Dataset) -> Vec<ColumnSummary> {
    let years: Vec<f64> = dataset.iter().map(|record| f64::from(record.year)).collect();
    let mut summaries = vec![summarize("year", years, 0)];

    for column in NumericColumn::ALL {
        let mut missing = 0usize;
        let values: Vec<f64> = dataset
            .iter()
            .filter_map(|record| {
                let value = record.value(column);
                if value.is_none() {
                    missing += 1;
                }
                value
            })
            .collect();
        summaries.push(summarize(column.as_str(), values, missing));
    }
    summaries
}

/// Missing-value count per column, region and year first.
///
/// Region and year are never missing after normalization; they are listed so
/// the table covers every column.
pub fn missing_counts(dataset: &Dataset) -> Vec<MissingCount> {
    let mut counts = vec![
        MissingCount {
            column: "region".to_string(),
            missing: 0,
        },
        MissingCount {
            column: "year".to_string(),
            missing: 0,
        },
    ];
    counts.extend(NumericColumn::ALL.into_iter().map(|column| MissingCount {
        column: column.as_str().to_string(),
        missing: dataset
            .iter()
            .filter(|record| record.value(column).is_none())
            .count(),
    }));
    counts
}

/// Number of records identical to an earlier record in every field.
pub fn duplicate_rows(dataset: &Dataset) -> usize {
    let mut seen = HashSet::with_capacity(dataset.len());
    dataset
        .iter()
        .filter(|record| {
            let key = (
                record.region.as_str(),
                record.year,
                record.population.map(f64::to_bits),
                record.births.map(f64::to_bits),
                record.deaths.map(f64::to_bits),
            );
            !seen.insert(key)
        })
        .count()
}

fn summarize(column: &str, mut values: Vec<f64>, missing: usize) -> ColumnSummary {
    values.sort_by(f64::total_cmp);
    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std = mean.filter(|_| count > 1).map(|mean| {
        let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        (squares / (count - 1) as f64).sqrt()
    });

    ColumnSummary {
        column: column.to_string(),
        count,
        missing,
        mean,
        std,
        min: values.first().copied(),
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied(),
    }
}

/// Linear-interpolation quantile of sorted values.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
