//! Configuration schema types
//!
//! This module defines the configuration structure for Cohort.

use serde::{Deserialize, Serialize};

/// Default calculation service endpoint
pub const DEFAULT_CALCULATION_URL: &str = "http://localhost:8081/calculate";

/// Default calculation request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Main Cohort configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Calculation service configuration
    #[serde(default)]
    pub calculation: CalculationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CohortConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.calculation.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            application: ApplicationConfig::default(),
            calculation: CalculationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Calculation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationConfig {
    /// Endpoint of the calculation service
    #[serde(default = "default_calculation_url")]
    pub url: String,

    /// Request timeout in seconds; the single network call is bounded by
    /// this and fails rather than hanging
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl CalculationConfig {
    fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.url)
            .map_err(|e| format!("Invalid calculation service URL '{}': {}", self.url, e))?;
        if self.timeout_seconds == 0 {
            return Err("timeout_seconds must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            url: default_calculation_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable rolling file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly)
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_calculation_url() -> String {
    DEFAULT_CALCULATION_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("trace")]
    #[test_case("debug")]
    #[test_case("info")]
    #[test_case("warn")]
    #[test_case("error")]
    fn test_valid_log_levels_accepted(level: &str) {
        let mut config = CohortConfig::default();
        config.application.log_level = level.to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = CohortConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.calculation.url, DEFAULT_CALCULATION_URL);
        assert_eq!(config.calculation.timeout_seconds, 120);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = CohortConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_calculation_url() {
        let mut config = CohortConfig::default();
        config.calculation.url = "not a url".to_string();
        assert!(config.validate().unwrap_err().contains("Invalid calculation service URL"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = CohortConfig::default();
        config.calculation.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = CohortConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_sections_use_defaults() {
        let config: CohortConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.calculation.url, DEFAULT_CALCULATION_URL);
        assert!(!config.logging.local_enabled);
    }
}
