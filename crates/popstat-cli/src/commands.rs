use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use popstat_cli::pipeline::{AnalysisRun, build_catalog, load_config, run_pipeline};
use popstat_model::AnalysisOptions;

use crate::cli::{AnalyzeArgs, OutputFormatArg, RegionsArgs};
use crate::summary::{apply_table_style, header_cell, print_report};

pub fn run_regions(args: &RegionsArgs) -> Result<()> {
    let config = load_config(args.config.path.as_deref())?;
    let catalog = build_catalog(&config)?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Region"), header_cell("Code")]);
    apply_table_style(&mut table);
    table.add_row(vec![catalog.nationwide(), "(nationwide)"]);
    for entry in catalog.entries() {
        table.add_row(vec![entry.native_id.as_str(), entry.code.as_str()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let span = info_span!("analyze_command", input = %args.input.display());
    let _guard = span.enter();

    let config = load_config(args.config.path.as_deref())?;
    let options = options_from_args(args, config.analysis);
    let run = run_pipeline(&args.input, &config, &options)?;
    match args.format {
        OutputFormatArg::Table => print_report(&run),
        OutputFormatArg::Json => print_json(&run)?,
    }
    Ok(())
}

/// Command-line flags take precedence over the configuration file.
fn options_from_args(args: &AnalyzeArgs, defaults: AnalysisOptions) -> AnalysisOptions {
    let mut options = defaults;
    if let Some(top_n) = args.top_n {
        options.top_n = top_n;
    }
    if let Some(window) = args.window {
        options.snapshot_window = window;
    }
    if let (Some(year_a), Some(year_b)) = (args.year_a, args.year_b) {
        options = options.with_snapshot_years(year_a, year_b);
    }
    if let Some(target_year) = args.target_year {
        options = options.with_target_year(target_year);
    }
    options
}

fn print_json(run: &AnalysisRun) -> Result<()> {
    let json = serde_json::to_string_pretty(run).context("serialize report")?;
    println!("{json}");
    Ok(())
}
