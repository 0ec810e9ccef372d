// Obfuscation Markers - declarative obfuscation for named fields
// Copyright (c) 2025 Obfuscation Markers Contributors
// Licensed under the Apache License, Version 2.0

use clap::Parser;
use obfuscation_markers::cli::{Cli, Commands};
use obfuscation_markers::logging::{init_logging, LoggingConfig};
use obfuscation_markers::registry::ProviderRegistry;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("warn");
    let logging_config = LoggingConfig {
        json: cli.json_logs,
    };
    if let Err(e) = init_logging(log_level, &logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Obfuscation Markers");

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let registry = ProviderRegistry::with_builtins();
    match &cli.command {
        Commands::Validate(args) => args.execute(&cli.manifest, &registry),
        Commands::Mask(args) => args.execute(&cli.manifest, &registry),
    }
}
