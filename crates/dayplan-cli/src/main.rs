use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use dayplan_core::{Clock, SystemClock};
use tracing_subscriber::EnvFilter;

use dayplan_cli::commands::{parse, resolve};
use dayplan_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Parse {
            input,
            date,
            format,
            name,
        } => {
            let text = parse::read_input(input.as_deref())?;
            let format = format.unwrap_or(config.format);
            let calendar_name = name.as_deref().unwrap_or(&config.calendar_name);
            parse::run(&mut out, &text, date, format, calendar_name)?;
        }
        Commands::Resolve { expr, date } => {
            let date = date.unwrap_or_else(|| SystemClock.today());
            resolve::run(&mut out, &expr, date)?;
        }
    }

    out.flush().context("failed to flush output")?;
    Ok(())
}
