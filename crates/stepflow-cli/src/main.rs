//! Stepflow CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use stepflow_cli::{Args, CliError};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match stepflow_cli::run(&args) {
        Ok(output) => info!(output = output.display().to_string(); "Diagram written"),
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    }
}

/// Installs `env_logger`, falling back to `warn` for an unknown `--log-level`.
fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
}

/// Logs `err` as a miette report, with source snippets where it has them.
fn report(err: &CliError) {
    let mut rendered = String::new();
    match miette::GraphicalReportHandler::new().render_report(&mut rendered, err) {
        Ok(()) => error!("{rendered}"),
        Err(_) => error!("{err}"),
    }
}
