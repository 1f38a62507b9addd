//! Builder CLI Binary
//!
//! Command-line interface for linting, listing and scaffolding extensions.

use clap::Parser;
use fluid_builder::cli::{command_name, map_error, Cli, ExitStatus, RunContext};
use fluid_builder::config::ConfigLoader;
use fluid_builder::logging::{init_logging, LoggingConfig};
use std::io;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(command = command_name(&cli.command), "Builder starting");

    let context = match RunContext::new(cli.root.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            println!("{}", map_error(&e));
            process::exit(ExitStatus::for_error(&e).code());
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let status = context.run(&cli.command, &mut out);
    info!(exit_code = status.code(), "Command finished");
    process::exit(status.code());
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.root)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.enabled = false;
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
