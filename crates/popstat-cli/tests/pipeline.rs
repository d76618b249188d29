//! Integration tests for the pipeline module.

use std::fs;
use std::path::{Path, PathBuf};

use popstat_analytics::ProjectionOutcome;
use popstat_cli::pipeline::{build_catalog, load_config, run_pipeline};
use popstat_model::AnalysisOptions;
use tempfile::TempDir;

const CENSUS_CSV: &str = "\
지역,연도,인구,출생아수(명),사망자수(명)
전국,2021,\"51,738,071\",\"260,562\",\"317,680\"
전국,2022,\"51,692,272\",\"249,186\",\"372,939\"
전국,2023,\"51,325,329\",\"230,028\",\"352,511\"
서울,2019,\"9,729,107\",,
서울,2023,\"9,386,034\",,
세종,2019,-,-,-
세종,2023,\"386,525\",,
경기,2019,\"13,239,666\",,
경기,2023,\"13,630,821\",,
";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run(path: &Path, options: &AnalysisOptions) -> popstat_cli::pipeline::AnalysisRun {
    let config = load_config(None).unwrap();
    run_pipeline(path, &config, options).unwrap()
}

#[test]
fn test_pipeline_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "population.csv", CENSUS_CSV);

    let run = run(&path, &AnalysisOptions::default());

    assert_eq!(run.normalization.rows_read, 9);
    assert_eq!(run.normalization.sentinel_rewrites, 3);
    assert_eq!(run.report.records, 9);
    assert_eq!(run.report.national_series.len(), 3);

    let snapshot = run.report.snapshot.as_ref().unwrap();
    assert_eq!((snapshot.year_a, snapshot.year_b), (2019, 2023));
    let codes: Vec<&str> = snapshot.rows.iter().map(|row| row.code.as_str()).collect();
    assert_eq!(codes, vec!["Gyeonggi", "Sejong", "Seoul"]);
    let sejong = &snapshot.rows[1];
    assert_eq!(sejong.absolute_change, 386_525.0);
    assert_eq!(sejong.percent_change, None);

    assert!(matches!(
        run.report.projection,
        ProjectionOutcome::Projected(_)
    ));
}

#[test]
fn test_pipeline_options_override() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "population.csv", CENSUS_CSV);

    let options = AnalysisOptions::default()
        .with_top_n(1)
        .with_target_year(2023);
    let run = run(&path, &options);

    assert_eq!(run.report.ranked_changes.len(), 1);
    assert_eq!(run.report.ranked_changes[0].display_region(), "Gyeonggi");
    assert!(matches!(
        run.report.projection,
        ProjectionOutcome::Unavailable {
            target_year: 2023,
            ..
        }
    ));
}

#[test]
fn test_pipeline_reports_missing_columns() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "population.csv", "지역,연도,인구\n서울,2023,1\n");
    let config = load_config(None).unwrap();

    let error = run_pipeline(&path, &config, &AnalysisOptions::default()).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("normalize"));
    assert!(message.contains("required column(s) not found: 출생아수(명), 사망자수(명)"));
}

#[test]
fn test_pipeline_missing_file() {
    let dir = TempDir::new().unwrap();
    let config = load_config(None).unwrap();
    let missing = dir.path().join("absent.csv");

    assert!(run_pipeline(&missing, &config, &AnalysisOptions::default()).is_err());
}

#[test]
fn test_config_file_renames_columns() {
    let dir = TempDir::new().unwrap();
    let config_path = write_file(
        &dir,
        "popstat.toml",
        r#"
[columns]
region = "region"
year = "year"
population = "population"
births = "births"
deaths = "deaths"

[analysis]
top_n = 5
"#,
    );
    let csv = write_file(
        &dir,
        "population.csv",
        "region,year,population,births,deaths\n전국,2023,100,10,5\n서울,2022,40,,\n서울,2023,45,,\n",
    );

    let config = load_config(Some(&config_path)).unwrap();
    assert_eq!(config.analysis.top_n, 5);
    let run = run_pipeline(&csv, &config, &config.analysis).unwrap();

    assert_eq!(run.report.ranked_changes.len(), 1);
    assert_eq!(run.report.ranked_changes[0].delta, 5.0);
    let ProjectionOutcome::Projected(projection) = run.report.projection else {
        panic!("expected a projection");
    };
    assert_eq!(projection.projected_population, 100.0 + (10.0 - 5.0) * 12.0);
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config_path = write_file(&dir, "popstat.toml", "[analysis]\ntop_n = \"many\"\n");

    let error = load_config(Some(&config_path)).unwrap_err();
    assert!(format!("{error:#}").contains("load configuration"));
}

#[test]
fn test_catalog_from_default_config() {
    let config = load_config(None).unwrap();
    let catalog = build_catalog(&config).unwrap();
    assert_eq!(catalog.len(), 17);
    assert_eq!(catalog.canonical_code("제주"), Some("Jeju"));
}
