//! Calculation request assembly
//!
//! Builds the outbound payload in the shape the calculation service expects:
//! four top-level fields: `patients`, `measure`, `valueSets`, `options`.
//! Patients and the measure are resolved to canonical form first; value sets
//! are serialized without their internal `_id`; options are an opaque map
//! passed through untouched.

use crate::core::convert::ModelConverter;
use crate::domain::{
    CohortError, LegacyPatient, Measure, MeasureSource, PatientId, QdmPatient, Result,
};
use serde::Serialize;

/// Outbound payload for the calculation service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// QDM clinical fragments, one per successfully converted patient
    pub patients: Vec<QdmPatient>,

    /// Canonical measure with `_type` discriminators preserved; value sets
    /// travel in their own top-level field, not embedded here
    pub measure: serde_json::Value,

    /// Value sets serialized without the internal `_id` field
    pub value_sets: Vec<serde_json::Value>,

    /// Free-form configuration map, opaque to this layer
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// A built request plus the patients that failed conversion
///
/// The failed list is carried alongside the request so the reconciler merges
/// the failures from the exact converter call whose output was sent.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    /// The payload to send
    pub request: CalculationRequest,

    /// Identifiers of patients that failed model conversion
    pub failed_patients: Vec<PatientId>,
}

/// Assembles a calculation request
///
/// Resolves the measure to canonical form (a legacy measure goes through the
/// converter with its value sets; a canonical one passes through unchanged),
/// converts the patient batch, and serializes the pieces for transport.
/// Converter errors propagate unchanged.
///
/// # Errors
///
/// Returns an error if measure conversion fails or serialization fails.
pub fn build_request(
    converter: &dyn ModelConverter,
    measure_source: &MeasureSource,
    patients: &[LegacyPatient],
    options: serde_json::Map<String, serde_json::Value>,
) -> Result<BuiltRequest> {
    let measure: Measure = match measure_source {
        MeasureSource::Legacy(legacy) => {
            converter.measure_and_value_sets_to_cqm(legacy, &legacy.value_sets)?
        }
        MeasureSource::Canonical(measure) => measure.clone(),
    };

    let (converted_patients, failed_patients) = converter.convert_patients(&measure, patients);

    // The calculation service expects the bare QDM fragment, not the full
    // canonical patient wrapper.
    let qdm_patients: Vec<QdmPatient> = converted_patients
        .into_iter()
        .map(|patient| patient.qdm_patient)
        .collect();

    let value_sets = measure
        .value_sets
        .iter()
        .map(|value_set| {
            let mut json = serde_json::to_value(value_set)?;
            if let Some(object) = json.as_object_mut() {
                object.remove("_id");
            }
            Ok(json)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut measure_json = serde_json::to_value(&measure)?;
    if let Some(object) = measure_json.as_object_mut() {
        object.remove("value_sets");
        object.remove("package");
    }

    tracing::debug!(
        measure_id = %measure.id,
        patients = qdm_patients.len(),
        failed = failed_patients.len(),
        value_sets = value_sets.len(),
        "Built calculation request"
    );

    Ok(BuiltRequest {
        request: CalculationRequest {
            patients: qdm_patients,
            measure: measure_json,
            value_sets,
            options,
        },
        failed_patients,
    })
}

impl CalculationRequest {
    /// Serializes the request to the JSON body sent over the wire
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_body(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CohortError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::convert::StandardConverter;
    use crate::domain::{PopulationSet, StatementReference, ValueSet};
    use std::str::FromStr;

    fn canonical_measure() -> Measure {
        Measure::builder()
            .id("measure-1")
            .unwrap()
            .title("Test")
            .population_set(
                PopulationSet::new("PS1", "First")
                    .with_population("IPP", StatementReference::new("Lib", "Initial Population")),
            )
            .value_set(ValueSet {
                id: Some("internal-id".to_string()),
                oid: "2.16.840.1.113883.3.464.1003.103.12.1001".to_string(),
                display_name: "Diabetes".to_string(),
                version: None,
                concepts: vec![],
            })
            .build()
            .unwrap()
    }

    fn patient(id: &str) -> LegacyPatient {
        let mut patient = LegacyPatient::new(PatientId::from_str(id).unwrap());
        patient.data_elements = serde_json::json!([]);
        patient
    }

    fn failing_patient(id: &str) -> LegacyPatient {
        let mut patient = LegacyPatient::new(PatientId::from_str(id).unwrap());
        patient.data_elements = serde_json::json!("not-an-array");
        patient
    }

    #[test]
    fn test_build_request_shape() {
        let converter = StandardConverter::new();
        let source = MeasureSource::Canonical(canonical_measure());
        let built = build_request(
            &converter,
            &source,
            &[patient("p1")],
            serde_json::Map::new(),
        )
        .unwrap();

        let body: serde_json::Value =
            serde_json::from_str(&built.request.to_body().unwrap()).unwrap();
        assert!(body.get("patients").is_some());
        assert!(body.get("measure").is_some());
        assert!(body.get("valueSets").is_some());
        assert!(body.get("options").is_some());
        assert_eq!(body["measure"]["_type"], "CQM::Measure");
    }

    #[test]
    fn test_value_sets_exclude_internal_id() {
        let converter = StandardConverter::new();
        let source = MeasureSource::Canonical(canonical_measure());
        let built =
            build_request(&converter, &source, &[], serde_json::Map::new()).unwrap();

        assert_eq!(built.request.value_sets.len(), 1);
        assert!(built.request.value_sets[0].get("_id").is_none());
        assert_eq!(
            built.request.value_sets[0]["oid"],
            "2.16.840.1.113883.3.464.1003.103.12.1001"
        );
    }

    #[test]
    fn test_measure_json_does_not_embed_value_sets() {
        let converter = StandardConverter::new();
        let source = MeasureSource::Canonical(canonical_measure());
        let built =
            build_request(&converter, &source, &[], serde_json::Map::new()).unwrap();
        assert!(built.request.measure.get("value_sets").is_none());
    }

    #[test]
    fn test_failed_conversion_patient_excluded_from_payload() {
        let converter = StandardConverter::new();
        let source = MeasureSource::Canonical(canonical_measure());
        let built = build_request(
            &converter,
            &source,
            &[patient("p1"), failing_patient("p2")],
            serde_json::Map::new(),
        )
        .unwrap();

        assert_eq!(built.request.patients.len(), 1);
        assert_eq!(built.request.patients[0].id.as_str(), "p1");
        assert_eq!(built.failed_patients, vec![PatientId::from_str("p2").unwrap()]);
    }

    #[test]
    fn test_legacy_measure_goes_through_converter() {
        let converter = StandardConverter::new();
        let canonical = canonical_measure();
        let legacy = crate::domain::LegacyMeasure {
            id: canonical.id.clone(),
            title: canonical.title.clone(),
            cms_id: None,
            hqmf_set_id: None,
            population_sets: canonical.population_sets.clone(),
            value_sets: canonical.value_sets.clone(),
        };
        let built = build_request(
            &converter,
            &MeasureSource::Legacy(legacy),
            &[],
            serde_json::Map::new(),
        )
        .unwrap();
        assert_eq!(built.request.measure["id"], "measure-1");
        assert_eq!(built.request.value_sets.len(), 1);
    }

    #[test]
    fn test_options_pass_through_opaque() {
        let converter = StandardConverter::new();
        let source = MeasureSource::Canonical(canonical_measure());
        let mut options = serde_json::Map::new();
        options.insert("doPretty".to_string(), serde_json::json!(true));
        options.insert(
            "effectiveDate".to_string(),
            serde_json::json!("201801010000"),
        );

        let built = build_request(&converter, &source, &[], options).unwrap();
        assert_eq!(built.request.options["doPretty"], true);
        assert_eq!(built.request.options["effectiveDate"], "201801010000");
    }
}
