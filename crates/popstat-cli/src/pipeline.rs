//! Pipeline stages: configuration, ingestion, normalization and analysis.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use popstat_analytics::{
    AnalysisReport, NormalizationReport, Normalized, RegionCatalog, analyze, normalize,
};
use popstat_ingest::read_population_csv;
use popstat_model::{AnalysisConfig, AnalysisOptions};
use serde::Serialize;
use tracing::{info, info_span};

/// Everything one `analyze` run produced.
#[derive(Debug, Serialize)]
pub struct AnalysisRun {
    pub source: PathBuf,
    pub normalization: NormalizationReport,
    pub report: AnalysisReport,
}

/// Loads the configuration file, or the built-in defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("load configuration {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Builds the region catalog from the configuration.
pub fn build_catalog(config: &AnalysisConfig) -> Result<RegionCatalog> {
    RegionCatalog::from_config(&config.regions).context("build region catalog")
}

/// Reads the CSV and normalizes it.
pub fn ingest(path: &Path, config: &AnalysisConfig) -> Result<Normalized> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let df = read_population_csv(path).with_context(|| format!("read {}", path.display()))?;
    let normalized =
        normalize(&df, config).with_context(|| format!("normalize {}", path.display()))?;

    info!(
        records = normalized.dataset.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(normalized)
}

/// Runs every stage for one input file.
pub fn run_pipeline(
    path: &Path,
    config: &AnalysisConfig,
    options: &AnalysisOptions,
) -> Result<AnalysisRun> {
    let catalog = build_catalog(config)?;
    let Normalized { dataset, report } = ingest(path, config)?;
    let analysis = analyze(&dataset, &catalog, options);
    Ok(AnalysisRun {
        source: path.to_path_buf(),
        normalization: report,
        report: analysis,
    })
}
