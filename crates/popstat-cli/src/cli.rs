//! CLI argument definitions for the population trend analyzer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "popstat",
    version,
    about = "Population trend analytics - series, changes, snapshots and projections",
    long_about = "Analyze a regional population table (region, year, population, births, deaths).\n\n\
                  Produces the national series, year-over-year changes per region, a two-year\n\
                  snapshot comparison and a constant-rate projection of the national population."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a population CSV and print every analysis.
    Analyze(AnalyzeArgs),

    /// List the configured region catalog.
    Regions(RegionsArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the population CSV.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub config: ConfigArg,

    /// Number of ranked changes to show (ties with the last one are kept).
    #[arg(long = "top-n", value_name = "N")]
    pub top_n: Option<usize>,

    /// Years between the two snapshot reference years.
    #[arg(long = "window", value_name = "YEARS")]
    pub window: Option<u16>,

    /// Earlier snapshot year (requires --year-b).
    #[arg(long = "year-a", value_name = "YEAR", requires = "year_b")]
    pub year_a: Option<i32>,

    /// Later snapshot year (requires --year-a).
    #[arg(long = "year-b", value_name = "YEAR", requires = "year_a")]
    pub year_b: Option<i32>,

    /// Year to project the national population to.
    #[arg(long = "target-year", value_name = "YEAR")]
    pub target_year: Option<i32>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct RegionsArgs {
    #[command(flatten)]
    pub config: ConfigArg,
}

#[derive(Args)]
pub struct ConfigArg {
    /// TOML file overriding column names, regions and analysis defaults.
    #[arg(long = "config", value_name = "FILE")]
    pub path: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
