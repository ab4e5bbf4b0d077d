//! Configuration management for Cohort.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Cohort uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`COHORT_*` prefix)
//! - Default values for optional settings
//! - Comprehensive validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cohort::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from file
//! let config = load_config("cohort.toml")?;
//!
//! // Access configuration sections
//! println!("Calculation service: {}", config.calculation.url);
//! println!("Timeout: {}s", config.calculation.timeout_seconds);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! The configuration is organized into sections:
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`CalculationConfig`] - Calculation service endpoint and timeout
//! - [`LoggingConfig`] - Local file logging

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CalculationConfig, CohortConfig, LoggingConfig, DEFAULT_CALCULATION_URL,
    DEFAULT_TIMEOUT_SECONDS,
};
