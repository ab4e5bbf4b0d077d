//! Structured logging and observability for Cohort.
//!
//! Console logging is always on; JSON file logging with rotation is enabled
//! through [`crate::config::LoggingConfig`].

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
