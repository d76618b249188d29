//! National population projection.
//!
//! The model is a constant-rate linear extrapolation: the average births and
//! deaths of the trailing window are assumed to persist unchanged until the
//! target year, and migration is ignored.
//!
//! ```text
//! projected = last_pop + (avg_births - avg_deaths) * (target_year - last_year)
//! ```

use popstat_model::{Projection, VitalRecord};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Number of trailing years averaged for births and deaths.
pub const PROJECTION_WINDOW: usize = 3;

/// Why no projection could be made. A normal outcome, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unavailable {
    #[error("no nationwide population has been observed")]
    NoPopulation,

    #[error("target year {target_year} is not after the last observed year {last_year}")]
    TargetNotAfterLastYear { target_year: i32, last_year: i32 },

    #[error("no birth or death counts in the trailing {window}-year window")]
    NoVitals { window: usize },
}

/// Projects the national population to `target_year`.
///
/// `series` is the nationwide vital series; it is sorted by year on a private
/// copy, and a year observed more than once keeps its last row. The window is
/// the last [`PROJECTION_WINDOW`] distinct years (fewer if the series is
/// shorter), and missing counts are ignored in the averages.
pub fn project_population(
    series: &[VitalRecord],
    target_year: i32,
) -> Result<Projection, Unavailable> {
    let mut rows = series.to_vec();
    rows.sort_by_key(|row| row.year);
    rows.dedup_by(|later, kept| {
        let duplicate = later.year == kept.year;
        if duplicate {
            *kept = *later;
        }
        duplicate
    });

    let (last_year, last_population) = rows
        .iter()
        .rev()
        .find_map(|row| row.population.map(|population| (row.year, population)))
        .ok_or(Unavailable::NoPopulation)?;

    if target_year <= last_year {
        return Err(Unavailable::TargetNotAfterLastYear {
            target_year,
            last_year,
        });
    }

    let window = &rows[rows.len().saturating_sub(PROJECTION_WINDOW)..];
    let no_vitals = Unavailable::NoVitals {
        window: window.len(),
    };
    let avg_births = mean(window.iter().map(|row| row.births)).ok_or(no_vitals)?;
    let avg_deaths = mean(window.iter().map(|row| row.deaths)).ok_or(no_vitals)?;

    let years_ahead = f64::from(target_year) - f64::from(last_year);
    let projected_population = last_population + (avg_births - avg_deaths) * years_ahead;

    debug!(
        target_year,
        last_year,
        avg_births,
        avg_deaths,
        projected_population,
        "projected national population"
    );

    Ok(Projection {
        target_year,
        projected_population,
        last_year,
        last_population,
        avg_births,
        avg_deaths,
        window_years: window.len(),
    })
}

/// Mean of the present values, `None` when none are present.
fn mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}
