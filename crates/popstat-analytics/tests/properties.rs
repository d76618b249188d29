//! Property tests for normalization, ranking and the wide-table fill policies.

use popstat_analytics::{
    FillPolicy, RawRecord, RegionCatalog, keep_top_with_ties, normalize, normalize_records,
    records_to_frame, regional_wide_table,
};
use popstat_model::{AnalysisConfig, ChangeRecord, NumericColumn, RegionId, format_thousands};
use proptest::prelude::*;

const REGIONS: [&str; 5] = ["전국", "서울", "세종", "경기", "독도"];

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..5_000_000).prop_map(|value| value.to_string()),
        (0u32..5_000_000).prop_map(|value| format_thousands(f64::from(value))),
        Just("-".to_string()),
        Just(String::new()),
        Just("n/a".to_string()),
    ]
}

fn raw_row() -> impl Strategy<Value = RawRecord> {
    (0..REGIONS.len(), 1990i32..2030, cell(), cell(), cell()).prop_map(
        |(region, year, population, births, deaths)| {
            RawRecord::new(REGIONS[region], &year.to_string(), &population, &births, &deaths)
        },
    )
}

fn change(delta: i32) -> ChangeRecord {
    ChangeRecord {
        year: 2020,
        region: RegionId::new("서울").unwrap(),
        code: Some("Seoul".to_string()),
        population: 0.0,
        delta: f64::from(delta),
    }
}

proptest! {
    #[test]
    fn normalizing_twice_changes_nothing(rows in prop::collection::vec(raw_row(), 0..40)) {
        let config = AnalysisConfig::default();
        let first = normalize_records(rows, &config);
        let frame = records_to_frame(&first.dataset, &config.columns).unwrap();
        let second = normalize(&frame, &config).unwrap();
        prop_assert_eq!(second.dataset, first.dataset);
    }

    #[test]
    fn normalized_counts_are_finite_and_non_negative(rows in prop::collection::vec(raw_row(), 0..40)) {
        let normalized = normalize_records(rows, &AnalysisConfig::default());
        for record in &normalized.dataset {
            for column in NumericColumn::ALL {
                if let Some(value) = record.value(column) {
                    prop_assert!(value.is_finite() && value >= 0.0);
                }
            }
        }
    }

    #[test]
    fn top_n_keeps_every_tie(mut deltas in prop::collection::vec(-50i32..50, 0..60), top_n in 0usize..20) {
        deltas.sort_unstable_by(|a, b| b.cmp(a));
        let sorted: Vec<ChangeRecord> = deltas.iter().copied().map(change).collect();
        let kept = keep_top_with_ties(sorted, top_n);

        if top_n == 0 {
            prop_assert!(kept.is_empty());
        } else {
            prop_assert!(kept.len() >= top_n.min(deltas.len()));
            if let Some(last) = kept.last() {
                let dropped = &deltas[kept.len()..];
                prop_assert!(dropped.iter().all(|delta| f64::from(*delta) < last.delta));
                if kept.len() > top_n {
                    prop_assert_eq!(last.delta, kept[top_n - 1].delta);
                }
            }
        }
    }

    #[test]
    fn zero_fill_agrees_with_missing_fill(rows in prop::collection::vec(raw_row(), 0..40)) {
        let dataset = normalize_records(rows, &AnalysisConfig::default()).dataset;
        let catalog = RegionCatalog::default();
        let population = NumericColumn::Population;
        let zero = regional_wide_table(&dataset, &catalog, population, FillPolicy::Zero);
        let missing = regional_wide_table(&dataset, &catalog, population, FillPolicy::Missing);

        prop_assert_eq!(&zero.regions, &missing.regions);
        prop_assert_eq!(zero.years().collect::<Vec<_>>(), missing.years().collect::<Vec<_>>());
        for year in zero.years() {
            for code in &zero.regions {
                prop_assert_eq!(
                    zero.value(year, code),
                    Some(missing.value(year, code).unwrap_or(0.0))
                );
            }
        }
    }
}
