// Cohort - Clinical Quality Measure Calculation
// Copyright (c) 2026 Cohort Contributors
// Licensed under the MIT License

use clap::Parser;
use cohort::cli::{Cli, Commands};
use cohort::config::LoggingConfig;
use cohort::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging with console-only config (file logging is driven by
    // the loaded configuration only for long-running use; the CLI stays on
    // the console)
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig::default();
    let _guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Cohort - Clinical Quality Measure Calculation"
    );

    // Dispatch to the selected command
    let result = match cli.command {
        Commands::Calculate(args) => args.execute(&cli.config).await,
        Commands::Populations(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
