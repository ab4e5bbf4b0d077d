//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use cohort::config::{load_config, DEFAULT_CALCULATION_URL, DEFAULT_TIMEOUT_SECONDS};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("COHORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("COHORT_CALCULATION_URL");
    std::env::remove_var("COHORT_CALCULATION_TIMEOUT_SECONDS");
    std::env::remove_var("COHORT_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("COHORT_LOGGING_LOCAL_PATH");
    std::env::remove_var("COHORT_LOGGING_LOCAL_ROTATION");
    std::env::remove_var("TEST_CALC_URL");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[calculation]
url = "http://calc.example.com:8081/calculate"
timeout_seconds = 60

[logging]
local_enabled = true
local_path = "/tmp/cohort"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.calculation.url, "http://calc.example.com:8081/calculate");
    assert_eq!(config.calculation.timeout_seconds, 60);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/cohort");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]

[calculation]

[logging]
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.calculation.url, DEFAULT_CALCULATION_URL);
    assert_eq!(config.calculation.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_CALC_URL", "http://calc.internal:9000/calculate");

    let temp_file = write_config(
        r#"
[application]

[calculation]
url = "${TEST_CALC_URL}"

[logging]
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.calculation.url, "http://calc.internal:9000/calculate");

    std::env::remove_var("TEST_CALC_URL");
}

#[test]
fn test_env_var_substitution_missing_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]

[calculation]
url = "${COHORT_MISSING_TEST_VAR}"

[logging]
"#,
    );

    let result = load_config(temp_file.path());
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("COHORT_MISSING_TEST_VAR"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("COHORT_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("COHORT_CALCULATION_URL", "http://override:8082/calculate");
    std::env::set_var("COHORT_CALCULATION_TIMEOUT_SECONDS", "30");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[calculation]
url = "http://file.example.com/calculate"
timeout_seconds = 120

[logging]
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.calculation.url, "http://override:8082/calculate");
    assert_eq!(config.calculation.timeout_seconds, 30);

    cleanup_env_vars();
}

#[test]
fn test_invalid_log_level_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "loud"

[calculation]

[logging]
"#,
    );

    assert!(load_config(temp_file.path()).is_err());
}

#[test]
fn test_invalid_url_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]

[calculation]
url = "not a url"

[logging]
"#,
    );

    assert!(load_config(temp_file.path()).is_err());
}

#[test]
fn test_zero_timeout_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]

[calculation]
timeout_seconds = 0

[logging]
"#,
    );

    assert!(load_config(temp_file.path()).is_err());
}

#[test]
fn test_missing_file_is_a_configuration_error() {
    let result = load_config("definitely/not/a/real/cohort.toml");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
}
