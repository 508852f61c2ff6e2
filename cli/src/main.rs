//! growth-calc
//!
//! Childhood height and weight percentiles from the command line.

use anyhow::Result;
use clap::Parser;
use growth_calc_cli::{app, args::CliArgs, config::CliConfig};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();

    // Load configuration, then let flags override it
    let mut config = CliConfig::load(args.global_options.config.as_deref())?;
    if let Some(format) = args.global_options.format {
        config.output.format = format;
    }
    if args.global_options.lenient {
        config.parsing.lenient = true;
    }

    init_tracing(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        format = ?config.output.format,
        lenient = config.parsing.lenient,
        "Starting growth-calc"
    );

    let failures = app::run(args.command, &config, io::stdout().lock())?;

    if failures > 0 {
        error!(failures, "Some inputs could not be evaluated");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Initialize tracing/logging on stderr
fn init_tracing(config: &CliConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.env_filter());

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config.logging.json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}
