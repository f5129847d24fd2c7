//! `bds` command-line tool.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use bds_cli::config::{LoadedSettings, load_settings};
use bds_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{open_store, run_import, run_interpret, run_report, run_screen};
use crate::summary::{print_interpretations, print_report, print_screening};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let loaded = load_settings(cli.config.as_deref());
    let log_config = log_config_from_cli(&cli, &loaded);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    loaded.log_outcome();

    let exit_code = match run(&cli, &loaded) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli, loaded: &LoadedSettings) -> anyhow::Result<()> {
    let settings = &loaded.settings;
    let data_dir = || settings.data_dir(cli.data_dir.as_deref());
    match &cli.command {
        Command::Interpret(args) => {
            print_interpretations(&run_interpret(args));
        }
        Command::Report(args) => {
            let store = open_store(&data_dir())?;
            let output = run_report(&store, args)?;
            print_report(&output, settings.output_format(args.range.format))?;
        }
        Command::Screen(args) => {
            let store = open_store(&data_dir())?;
            let screenings = run_screen(&store, args)?;
            print_screening(&screenings, settings.output_format(args.format))?;
        }
        Command::Import(args) => {
            let store = open_store(&data_dir())?;
            let imported = run_import(&store, args)?;
            println!("Imported {imported} rows into {}", args.table);
        }
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli, loaded: &LoadedSettings) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data || loaded.settings.logging.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
