//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Cohort using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Cohort - Clinical Quality Measure Calculation
#[derive(Parser, Debug)]
#[command(name = "cohort")]
#[command(version, about, long_about = None)]
#[command(author = "Cohort Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cohort.toml", env = "COHORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COHORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate a measure against a patient batch
    Calculate(commands::calculate::CalculateArgs),

    /// List the population set keys a measure exposes
    Populations(commands::populations::PopulationsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
