use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use bazaar_cli::cli::{run, Cli};
use bazaar_cli::config::BazaarConfig;
use bazaar_cli::logging::init_tracing;
use bazaar_cli::output::OutputDestination;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> Result<()> {
    let mut config = BazaarConfig::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging);

    let rendered = run(cli, &config)?;
    let destination = cli
        .out_file
        .clone()
        .map(OutputDestination::File)
        .unwrap_or_default();
    destination
        .write_text(&rendered)
        .context("failed to write output")?;
    Ok(())
}
