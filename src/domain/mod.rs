//! Domain models and types for Cohort.
//!
//! This module contains the core domain models, types, and business rules
//! for clinical quality measure calculation.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`MeasureId`])
//! - **Measure models** ([`Measure`], [`PopulationSet`], [`Stratification`], [`ValueSet`])
//! - **Patient models** ([`LegacyPatient`], [`CqmPatient`], [`QdmPatient`])
//! - **Error types** ([`CohortError`], [`CalculationError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Cohort uses the newtype pattern for identifiers to prevent mixing
//! different ID types:
//!
//! ```rust
//! use cohort::domain::{PatientId, MeasureId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let patient_id = PatientId::new("patient-123")?;
//! let measure_id = MeasureId::new("measure-456")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: PatientId = measure_id;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Builder Pattern
//!
//! The measure model uses the builder pattern for construction:
//!
//! ```rust
//! use cohort::domain::{Measure, PopulationSet, StatementReference};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let measure = Measure::builder()
//!     .id("measure-1")?
//!     .title("Diabetes: Medical Attention for Nephropathy")
//!     .population_set(
//!         PopulationSet::new("PopulationSet_1", "Population Criteria Section")
//!             .with_population("IPP", StatementReference::new("Lib", "Initial Population")),
//!     )
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod measure;
pub mod patient;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{CalculationError, CohortError};
pub use ids::{MeasureId, PatientId};
pub use measure::{
    Concept, LegacyMeasure, Measure, MeasureBuilder, MeasurePackage, MeasureSource, Observation,
    PopulationSet, StatementReference, Stratification, ValueSet,
};
pub use patient::{CqmPatient, LegacyPatient, QdmPatient};
pub use result::Result;
