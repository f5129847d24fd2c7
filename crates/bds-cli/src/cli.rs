//! CLI argument definitions for the `bds` tool.

use std::path::PathBuf;

use bds_cli::config::OutputFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bds",
    version,
    about = "Blood bank screening interpretation and summary reports",
    long_about = "Interpret infectious-marker screening readings and build the \
                  summary reports used by blood bank staff.\n\n\
                  Records are read from a file-backed row store; CSV exports \
                  can be imported into it with `bds import`."
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

    /// Include donor and patient identifiers in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file to use instead of the default location.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Row store directory (overrides the settings file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interpret screening readings against the assay cutoff.
    Interpret(InterpretArgs),

    /// Build a summary report for a date range.
    Report(ReportArgs),

    /// List the interpreted screening results of every bleeding record.
    Screen(RangeArgs),

    /// Import a CSV export of a table into the row store.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct InterpretArgs {
    /// Readings as typed by lab staff, e.g. 0.42 or 1.00.
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,

    /// Assay the readings belong to.
    #[arg(long = "assay", value_enum, default_value = "hbsag")]
    pub assay: AssayArg,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Report to build.
    #[arg(value_enum)]
    pub kind: ReportKindArg,

    #[command(flatten)]
    pub range: RangeArgs,
}

#[derive(Parser)]
pub struct RangeArgs {
    /// First day of the period (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE")]
    pub from: NaiveDate,

    /// Last day of the period, inclusive (defaults to --from).
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Output format (overrides the settings file).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Destination table, e.g. bleeding or crossmatch.
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// CSV file with a header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportKindArg {
    BagType,
    DonorCategory,
    BloodGroup,
    PositiveTests,
    Crossmatch,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AssayArg {
    #[value(name = "hbsag")]
    HBsAg,
    Hcv,
    Hiv,
    Vdrl,
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_report_args() {
        let cli = Cli::try_parse_from([
            "bds",
            "report",
            "blood-group",
            "--from",
            "2024-03-01",
            "--to",
            "2024-03-31",
            "--format",
            "csv",
            "--data-dir",
            "/tmp/bds",
        ])
        .unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert!(matches!(args.kind, ReportKindArg::BloodGroup));
        assert_eq!(args.range.format, Some(OutputFormat::Csv));
        assert_eq!(args.range.to, NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/bds")));
    }

    #[test]
    fn test_rejects_non_iso_dates() {
        let result = Cli::try_parse_from(["bds", "screen", "--from", "03/01/2024"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_interpret_requires_values() {
        assert!(Cli::try_parse_from(["bds", "interpret"]).is_err());
        let cli = Cli::try_parse_from(["bds", "interpret", "0.42", "1.00", "--assay", "hiv"])
            .unwrap();
        let Command::Interpret(args) = cli.command else {
            panic!("expected interpret command");
        };
        assert_eq!(args.values, vec!["0.42", "1.00"]);
        assert!(matches!(args.assay, AssayArg::Hiv));
    }
}
