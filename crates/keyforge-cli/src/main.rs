//! Keyforge CLI - derive and inspect HD wallet keys from the command line.

pub mod commands;
pub mod config;
pub mod output;
pub mod telemetry;

use clap::Parser;
use config::CliConfig;
use output::{print_error, print_warning};

fn main() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    let config = CliConfig::load().unwrap_or_else(|e| {
        print_warning(&format!("Using default configuration: {:#}", e));
        CliConfig::default()
    });

    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    telemetry::init_telemetry(&log_level, cli.json_logs || config.json_logs)?;

    if let Err(e) = commands::execute(cli, &config) {
        print_error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
