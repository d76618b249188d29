//! Conversion between Polars frames and population records.

use polars::prelude::*;
use popstat_model::{AnalysisError, ColumnNames, Dataset, Result};

use super::RawRecord;

/// Reads the five recognized columns of `df` as raw text rows.
///
/// Fails with [`AnalysisError::MissingColumns`] when any of them is absent;
/// other columns are ignored.
pub fn raw_records(df: &DataFrame, columns: &ColumnNames) -> Result<Vec<RawRecord>> {
    let missing: Vec<String> = columns
        .required()
        .iter()
        .filter(|name| df.column(name).is_err())
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::MissingColumns { missing });
    }

    let regions = text_column(df, &columns.region)?;
    let years = text_column(df, &columns.year)?;
    let population = text_column(df, &columns.population)?;
    let births = text_column(df, &columns.births)?;
    let deaths = text_column(df, &columns.deaths)?;

    let records = regions
        .into_iter()
        .zip(years)
        .zip(population)
        .zip(births)
        .zip(deaths)
        .map(
            |((((region, year), population), births), deaths)| RawRecord {
                region,
                year,
                population,
                births,
                deaths,
            },
        )
        .collect();
    Ok(records)
}

/// Converts normalized records back into a typed frame.
///
/// Columns use the configured names: the region as text, the year as Int32
/// and the counts as Float64 with nulls for missing values.
pub fn records_to_frame(dataset: &Dataset, columns: &ColumnNames) -> Result<DataFrame> {
    let regions: Vec<&str> = dataset.iter().map(|r| r.region.as_str()).collect();
    let years: Vec<i32> = dataset.iter().map(|r| r.year).collect();
    let population: Vec<Option<f64>> = dataset.iter().map(|r| r.population).collect();
    let births: Vec<Option<f64>> = dataset.iter().map(|r| r.births).collect();
    let deaths: Vec<Option<f64>> = dataset.iter().map(|r| r.deaths).collect();

    let df = DataFrame::new(vec![
        Series::new(columns.region.as_str().into(), regions).into_column(),
        Series::new(columns.year.as_str().into(), years).into_column(),
        Series::new(columns.population.as_str().into(), population).into_column(),
        Series::new(columns.births.as_str().into(), births).into_column(),
        Series::new(columns.deaths.as_str().into(), deaths).into_column(),
    ])?;
    Ok(df)
}

fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?;
    let text = column.cast(&DataType::String)?;
    let values = text
        .str()?
        .iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_are_listed() {
        let df = df! {
            "지역" => &["서울"],
            "연도" => &["2020"],
            "인구" => &["9668465"],
        }
        .unwrap();

        let err = raw_records(&df, &ColumnNames::default()).unwrap_err();
        match err {
            AnalysisError::MissingColumns { missing } => {
                assert_eq!(missing, vec!["출생아수(명)", "사망자수(명)"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn numeric_columns_are_read_as_text() {
        let df = df! {
            "지역" => &["서울"],
            "연도" => &[2020i32],
            "인구" => &[Some(9_668_465i64)],
            "출생아수(명)" => &[None::<i64>],
            "사망자수(명)" => &["-"],
            "비고" => &["ignored"],
        }
        .unwrap();

        let raw = raw_records(&df, &ColumnNames::default()).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].year.as_deref(), Some("2020"));
        assert_eq!(raw[0].population.as_deref(), Some("9668465"));
        assert_eq!(raw[0].births, None);
        assert_eq!(raw[0].deaths.as_deref(), Some("-"));
    }
}
