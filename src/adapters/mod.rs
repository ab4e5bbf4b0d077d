//! External system integrations for Cohort.
//!
//! This module provides adapters for integrating with external systems:
//!
//! - [`calculation`] - The calculation service (HTTP, fixed JSON contract)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies from the domain and core layers.
//! Third-party types (HTTP client errors, wire formats) never cross the
//! adapter boundary; everything surfaces as domain types and
//! [`crate::domain::CohortError`] variants.

pub mod calculation;
