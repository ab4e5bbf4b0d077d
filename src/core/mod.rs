//! Core business logic for Cohort.
//!
//! This module contains the core business logic and orchestration for
//! measure calculation.
//!
//! # Modules
//!
//! - [`calculate`] - Calculation orchestration and result reconciliation
//! - [`convert`] - Legacy-to-canonical model conversion seam
//! - [`populations`] - Population structure indexing and criteria ordering
//!
//! # Calculation Workflow
//!
//! The typical calculation workflow:
//!
//! 1. **Convert**: Legacy patients and measure become canonical models;
//!    per-patient conversion failures are collected, not fatal
//! 2. **Build**: Assemble `{patients, measure, valueSets, options}`
//! 3. **Call**: Single timeout-bounded POST to the calculation service
//! 4. **Reconcile**: Parse the response and merge conversion failures into
//!    the failed-patient list
//!
//! # Example
//!
//! ```rust,no_run
//! use cohort::config::load_config;
//! use cohort::core::calculate::CalculationCoordinator;
//! use cohort::domain::MeasureSource;
//!
//! # async fn example(measure: MeasureSource) -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cohort.toml")?;
//! let coordinator = CalculationCoordinator::new(&config)?;
//! let outcome = coordinator.calculate(&measure, &[], Default::default()).await?;
//! println!("Calculated {} patients", outcome.calculated_patient_count());
//! # Ok(())
//! # }
//! ```

pub mod calculate;
pub mod convert;
pub mod populations;
