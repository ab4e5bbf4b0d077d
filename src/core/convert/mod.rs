//! Legacy-to-canonical model conversion
//!
//! Conversion of legacy patient and measure records into the canonical
//! quality-measure model is a collaborator capability behind the
//! [`ModelConverter`] trait. The [`StandardConverter`] covers the common
//! record shapes; callers with exotic legacy data can supply their own
//! implementation.
//!
//! A patient that fails conversion does not abort the batch: its identifier
//! is returned alongside the successful conversions so the reconciler can
//! report it as failed rather than silently dropping it.

pub mod standard;

pub use standard::StandardConverter;

use crate::domain::{CqmPatient, LegacyMeasure, LegacyPatient, Measure, PatientId, Result, ValueSet};

/// Converts legacy records into the canonical quality-measure model
///
/// Implementations must be cheap to share across invocations; conversion is
/// pure CPU work with no I/O.
pub trait ModelConverter: Send + Sync {
    /// Converts a batch of legacy patients for calculation against `measure`
    ///
    /// Returns the successfully converted patients and the identifiers of
    /// patients that failed conversion, in input order. Never errors as a
    /// whole: per-patient failures are partial, not fatal.
    fn convert_patients(
        &self,
        measure: &Measure,
        patients: &[LegacyPatient],
    ) -> (Vec<CqmPatient>, Vec<PatientId>);

    /// Converts a legacy measure plus its value sets into a canonical measure
    ///
    /// # Errors
    ///
    /// Returns an error if the legacy record cannot represent a usable
    /// canonical measure (e.g., it has no population sets).
    fn measure_and_value_sets_to_cqm(
        &self,
        measure: &LegacyMeasure,
        value_sets: &[ValueSet],
    ) -> Result<Measure>;
}
