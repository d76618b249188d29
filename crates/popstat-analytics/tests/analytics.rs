//! End-to-end tests over frames shaped like the published census table.

use polars::prelude::*;
use popstat_analytics::{
    FillPolicy, ProjectionOutcome, RegionCatalog, analyze, compare_years, national_series,
    normalize, ranked_changes, records_to_frame, regional_wide_table,
};
use popstat_model::{AnalysisConfig, AnalysisError, AnalysisOptions, NumericColumn};

fn census_frame() -> DataFrame {
    df!(
        "지역" => ["전국", "전국", "전국", "서울", "서울", "세종", "세종", "경기", "경기", "독도"],
        "연도" => ["2019", "2022", "2023", "2019", "2023", "2011", "2023", "2019", "2023", "2023"],
        "인구" => ["51,849,861", "51,692,272", "51,325,329", "9,729,107", "9,386,034", "-", "386,525", "13,239,666", "13,630,821", "40"],
        "출생아수(명)" => ["302,676", "249,186", "230,028", "", "", "-", "", "", "", ""],
        "사망자수(명)" => ["295,110", "372,939", "352,511", "", "", "-", "", "", "", ""],
        "비고" => ["", "", "", "", "", "", "", "", "", ""]
    )
    .unwrap()
}

#[test]
fn normalize_census_frame() {
    let config = AnalysisConfig::default();
    let normalized = normalize(&census_frame(), &config).unwrap();

    assert_eq!(normalized.report.rows_read, 10);
    assert_eq!(normalized.report.malformed_rows, 0);
    assert_eq!(normalized.report.sentinel_rewrites, 3);
    assert_eq!(normalized.dataset.len(), 10);

    let sejong = &normalized.dataset.records()[5];
    assert_eq!(sejong.year, 2011);
    assert_eq!(sejong.population, Some(0.0));
    assert_eq!(sejong.births, Some(0.0));

    let seoul = &normalized.dataset.records()[3];
    assert_eq!(seoul.population, Some(9_729_107.0));
    assert_eq!(seoul.births, None);
}

#[test]
fn missing_columns_are_listed() {
    let df = df!(
        "지역" => ["서울"],
        "연도" => ["2023"],
        "인구" => ["1"]
    )
    .unwrap();
    let err = normalize(&df, &AnalysisConfig::default()).unwrap_err();
    match &err {
        AnalysisError::MissingColumns { missing } => {
            assert_eq!(missing, &vec!["출생아수(명)".to_string(), "사망자수(명)".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        "required column(s) not found: 출생아수(명), 사망자수(명)"
    );
}

#[test]
fn normalization_is_idempotent() {
    let config = AnalysisConfig::default();
    let first = normalize(&census_frame(), &config).unwrap();
    let frame = records_to_frame(&first.dataset, &config.columns).unwrap();
    let second = normalize(&frame, &config).unwrap();

    assert_eq!(second.dataset, first.dataset);
    assert_eq!(second.report.sentinel_rewrites, 0);
}

#[test]
fn census_derived_tables() {
    let config = AnalysisConfig::default();
    let dataset = normalize(&census_frame(), &config).unwrap().dataset;
    let catalog = RegionCatalog::from_config(&config.regions).unwrap();

    let series = national_series(&dataset, &catalog);
    let years: Vec<i32> = series.iter().map(|point| point.year).collect();
    assert_eq!(years, vec![2019, 2022, 2023]);

    let table = regional_wide_table(
        &dataset,
        &catalog,
        NumericColumn::Population,
        FillPolicy::Zero,
    );
    assert_eq!(table.regions, vec!["Seoul", "Sejong", "Gyeonggi"]);
    assert_eq!(table.value(2019, "Sejong"), Some(0.0));
    assert_eq!(table.unmapped_rows, 1);

    let ranked = ranked_changes(&dataset, &catalog, 2);
    let regions: Vec<&str> = ranked.iter().map(|change| change.display_region()).collect();
    assert_eq!(regions, vec!["Gyeonggi", "Sejong"]);
    assert_eq!(ranked[0].formatted_delta(), "+391,155");

    let snapshot = compare_years(&dataset, &catalog, 2019, 2023);
    let codes: Vec<&str> = snapshot.iter().map(|row| row.code.as_str()).collect();
    assert_eq!(codes, vec!["Gyeonggi", "Seoul"]);
    assert_eq!(snapshot[1].absolute_change, -343_073.0);
}

#[test]
fn census_projection() {
    let config = AnalysisConfig::default();
    let dataset = normalize(&census_frame(), &config).unwrap().dataset;
    let catalog = RegionCatalog::default();

    let report = analyze(&dataset, &catalog, &config.analysis);
    let ProjectionOutcome::Projected(projection) = report.projection else {
        panic!("expected a projection");
    };
    assert_eq!(projection.last_year, 2023);
    assert_eq!(projection.window_years, 3);
    assert_eq!(projection.avg_births, 260_630.0);
    assert_eq!(projection.avg_deaths, 340_186.666_666_666_7);
    let expected = 51_325_329.0 + (260_630.0 - 340_186.666_666_666_7) * 12.0;
    assert!((projection.projected_population - expected).abs() < 1e-3);
}

#[test]
fn projection_unavailable_for_past_target() {
    let config = AnalysisConfig::default();
    let dataset = normalize(&census_frame(), &config).unwrap().dataset;
    let options = AnalysisOptions::default().with_target_year(2020);

    let report = analyze(&dataset, &RegionCatalog::default(), &options);
    assert_eq!(
        report.projection,
        ProjectionOutcome::Unavailable {
            target_year: 2020,
            reason: "target year 2020 is not after the last observed year 2023".to_string(),
        }
    );
}

#[test]
fn concurrent_analyses_share_one_dataset() {
    let config = AnalysisConfig::default();
    let dataset = normalize(&census_frame(), &config).unwrap().dataset;
    let catalog = RegionCatalog::default();
    let baseline = analyze(&dataset, &catalog, &config.analysis);

    let reports: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| analyze(&dataset, &catalog, &config.analysis)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for report in reports {
        assert_eq!(report, baseline);
    }
}

#[test]
fn report_serializes_to_json() {
    let config = AnalysisConfig::default();
    let dataset = normalize(&census_frame(), &config).unwrap().dataset;
    let report = analyze(&dataset, &RegionCatalog::default(), &config.analysis);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["records"], 10);
    assert_eq!(json["projection"]["status"], "projected");
    assert_eq!(json["snapshot"]["year_a"], 2019);
    assert_eq!(json["stacked_population"]["fill"], "zero");
}
