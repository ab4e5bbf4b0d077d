//! Result reconciliation
//!
//! Parses the raw calculation service response and merges in the patients
//! that failed model conversion before the call, so every patient from the
//! original input appears either in the computed results or in the failed
//! list.

use crate::adapters::calculation::CalculationOutcome;
use crate::domain::{CalculationError, PatientId, Result};

/// Parses the raw response body and merges failed-conversion patients
///
/// Failed-conversion identifiers are always appended to the response's own
/// failed list, deduplicated. The merge is unconditional: a conversion
/// failure must surface even when the engine reported failures of its own.
///
/// # Errors
///
/// Returns [`CalculationError::ResponseFormat`] with the fixed "JSON parse
/// error" message when the body is not parseable.
pub fn reconcile(
    raw_body: &str,
    failed_conversion: &[PatientId],
) -> Result<CalculationOutcome> {
    let mut outcome: CalculationOutcome =
        serde_json::from_str(raw_body).map_err(|e| {
            tracing::error!(error = %e, "Calculation service response failed to parse");
            CalculationError::json_parse()
        })?;

    for patient_id in failed_conversion {
        if !outcome
            .failed_patients
            .iter()
            .any(|failed| failed == patient_id.as_str())
        {
            outcome.failed_patients.push(patient_id.to_string());
        }
    }

    if !outcome.failed_patients.is_empty() {
        tracing::warn!(
            failed = outcome.failed_patients.len(),
            calculated = outcome.calculated_patient_count(),
            "Calculation completed with failed patients"
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CohortError;
    use std::str::FromStr;

    fn patient_ids(ids: &[&str]) -> Vec<PatientId> {
        ids.iter().map(|id| PatientId::from_str(id).unwrap()).collect()
    }

    #[test]
    fn test_reconcile_parses_results() {
        let body = r#"{"p1": {"PS1": {"IPP": 1}}, "failed_patients": []}"#;
        let outcome = reconcile(body, &[]).unwrap();
        assert_eq!(outcome.calculated_patient_count(), 1);
        assert!(outcome.failed_patients.is_empty());
    }

    #[test]
    fn test_reconcile_appends_conversion_failures() {
        let body = r#"{"p1": {"PS1": {"IPP": 1}}, "failed_patients": []}"#;
        let outcome = reconcile(body, &patient_ids(&["p2"])).unwrap();
        assert_eq!(outcome.failed_patients, vec!["p2"]);
    }

    #[test]
    fn test_reconcile_appends_even_when_engine_reported_failures() {
        // The engine already failed p3; conversion failures must still land.
        let body = r#"{"p1": {"PS1": {"IPP": 1}}, "failed_patients": ["p3"]}"#;
        let outcome = reconcile(body, &patient_ids(&["p2"])).unwrap();
        assert_eq!(outcome.failed_patients, vec!["p3", "p2"]);
    }

    #[test]
    fn test_reconcile_deduplicates_failed_patients() {
        let body = r#"{"failed_patients": ["p2"]}"#;
        let outcome = reconcile(body, &patient_ids(&["p2"])).unwrap();
        assert_eq!(outcome.failed_patients, vec!["p2"]);
    }

    #[test]
    fn test_reconcile_handles_absent_failed_list() {
        let body = r#"{"p1": {"PS1": {"IPP": 1}}}"#;
        let outcome = reconcile(body, &patient_ids(&["p2"])).unwrap();
        assert_eq!(outcome.failed_patients, vec!["p2"]);
    }

    #[test]
    fn test_reconcile_malformed_body_is_response_format_error() {
        let err = reconcile("{not json", &[]).unwrap_err();
        match err {
            CohortError::Calculation(calc_err) => {
                assert_eq!(
                    calc_err.to_string(),
                    "Problem with the response from the calculation service: JSON parse error"
                );
            }
            other => panic!("Expected Calculation error, got {other:?}"),
        }
    }
}
