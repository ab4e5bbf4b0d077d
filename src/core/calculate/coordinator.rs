//! Calculation coordinator - main orchestrator for a measure calculation
//!
//! This module coordinates the whole calculation workflow: convert patients
//! and the measure to the canonical model, build the request, make the
//! single bounded call to the calculation service, and reconcile the results
//! with any conversion failures.

use crate::adapters::calculation::{build_request, CalculationClient, CalculationOutcome};
use crate::config::CohortConfig;
use crate::core::calculate::reconcile::reconcile;
use crate::core::convert::{ModelConverter, StandardConverter};
use crate::domain::{LegacyPatient, MeasureSource, Result};
use std::sync::Arc;
use std::time::Instant;

/// Calculation coordinator
///
/// One coordinator can serve many invocations; invocations share no mutable
/// state, so concurrent calculations for different measures or patient sets
/// are independent.
pub struct CalculationCoordinator {
    client: CalculationClient,
    converter: Arc<dyn ModelConverter>,
}

impl CalculationCoordinator {
    /// Creates a coordinator with the standard model converter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the
    /// configuration.
    pub fn new(config: &CohortConfig) -> Result<Self> {
        Self::with_converter(config, Arc::new(StandardConverter::new()))
    }

    /// Creates a coordinator with a caller-supplied model converter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the
    /// configuration.
    pub fn with_converter(
        config: &CohortConfig,
        converter: Arc<dyn ModelConverter>,
    ) -> Result<Self> {
        let client = CalculationClient::new(&config.calculation)?;
        Ok(Self { client, converter })
    }

    /// Calculates a measure against a patient batch
    ///
    /// The sequence is synchronous per invocation: convert, build, call,
    /// reconcile. The network call is the only blocking point and is bounded
    /// by the configured timeout. The failed-conversion list merged at the
    /// end comes from the exact converter call whose output was sent.
    ///
    /// # Errors
    ///
    /// Propagates conversion errors unchanged, and surfaces
    /// [`crate::domain::CalculationError`] variants for transport failures
    /// and malformed responses. A patient failing conversion is not an
    /// error: it is reported in the outcome's failed list.
    pub async fn calculate(
        &self,
        measure: &MeasureSource,
        patients: &[LegacyPatient],
        options: serde_json::Map<String, serde_json::Value>,
    ) -> Result<CalculationOutcome> {
        let start_time = Instant::now();

        tracing::info!(
            measure_id = %measure.id(),
            patients = patients.len(),
            "Starting measure calculation"
        );

        let built = build_request(self.converter.as_ref(), measure, patients, options)?;

        let raw_response = self.client.calculate(&built.request).await?;

        let outcome = reconcile(&raw_response, &built.failed_patients)?;

        tracing::info!(
            measure_id = %measure.id(),
            calculated = outcome.calculated_patient_count(),
            failed = outcome.failed_patients.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Measure calculation finished"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CohortConfig;

    #[test]
    fn test_coordinator_creation() {
        let config = CohortConfig::default();
        assert!(CalculationCoordinator::new(&config).is_ok());
    }

    #[test]
    fn test_coordinator_with_custom_converter() {
        let config = CohortConfig::default();
        let converter = Arc::new(StandardConverter::new());
        assert!(CalculationCoordinator::with_converter(&config, converter).is_ok());
    }
}
