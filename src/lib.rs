// Cohort - Clinical Quality Measure Calculation
// Copyright (c) 2026 Cohort Contributors
// Licensed under the MIT License

//! # Cohort - Clinical Quality Measure Calculation
//!
//! Cohort evaluates clinical quality measures against patient records by
//! delegating the numeric calculation to an external calculation service and
//! reconciling the results against the measure's declared population
//! structure.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Converting** legacy patient/measure records to the canonical model,
//!   tracking per-patient conversion failures
//! - **Building** the calculation request (patients, measure, value sets,
//!   options) in the shape the service expects
//! - **Calling** the calculation service with a bounded timeout and typed
//!   failure classification
//! - **Reconciling** results so no patient is silently dropped
//! - **Indexing** a measure's population structure (population set keys and
//!   ordered result criteria names)
//!
//! ## Architecture
//!
//! Cohort follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (orchestration, conversion, population indexing)
//! - [`adapters`] - External integrations (the calculation service)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cohort::config::load_config;
//! use cohort::core::calculate::CalculationCoordinator;
//! use cohort::domain::MeasureSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("cohort.toml")?;
//!
//!     // Create the coordinator
//!     let coordinator = CalculationCoordinator::new(&config)?;
//!
//!     // Calculate a measure against a patient batch
//!     # let measure: MeasureSource = todo!();
//!     # let patients = vec![];
//!     let outcome = coordinator
//!         .calculate(&measure, &patients, Default::default())
//!         .await?;
//!
//!     println!(
//!         "Calculated {} patients, {} failed",
//!         outcome.calculated_patient_count(),
//!         outcome.failed_patients.len()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Population Set Keys
//!
//! The calculation service tags results by population set key: a
//! `population_set_id` for an unstratified entry or a `stratification_id`
//! for a stratified one. Keys are derived on demand and ordered
//! deterministically:
//!
//! ```rust,no_run
//! use cohort::core::populations::{population_sets_and_stratifications, population_set_for_key};
//! # fn example(measure: &cohort::domain::Measure) -> cohort::domain::Result<()> {
//! for descriptor in population_sets_and_stratifications(measure) {
//!     let (set, stratification) = population_set_for_key(measure, descriptor.key())?;
//!     println!("{} -> {}", descriptor.key(), set.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Cohort uses the [`domain::CohortError`] type for all errors. Failures
//! reaching the calculation service surface as
//! [`domain::CalculationError`] variants with messages pre-formatted for
//! display; a patient failing model conversion is not an error, it is
//! reported in the outcome's failed-patient list.
//!
//! ## Logging
//!
//! Cohort uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting calculation");
//! warn!(patient_id = "p2", "Patient failed conversion");
//! error!(error = "timeout", "Calculation failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
