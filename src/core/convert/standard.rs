//! Standard model converter
//!
//! Converts the common legacy record shapes into the canonical model. A
//! legacy patient converts when its clinical payload is a JSON array of
//! objects; anything else marks that patient as failed without aborting the
//! batch.

use super::ModelConverter;
use crate::domain::{
    CohortError, CqmPatient, LegacyMeasure, LegacyPatient, Measure, PatientId, QdmPatient, Result,
    ValueSet,
};

/// Default [`ModelConverter`] implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardConverter;

impl StandardConverter {
    /// Creates a new standard converter
    pub fn new() -> Self {
        Self
    }

    fn convert_patient(&self, patient: &LegacyPatient) -> Option<CqmPatient> {
        let data_elements = match &patient.data_elements {
            serde_json::Value::Array(elements) => {
                if elements.iter().all(serde_json::Value::is_object) {
                    elements.clone()
                } else {
                    return None;
                }
            }
            serde_json::Value::Null => Vec::new(),
            _ => return None,
        };

        Some(CqmPatient {
            id: patient.id.clone(),
            given_names: patient.given_names.clone(),
            family_name: patient.family_name.clone(),
            qdm_patient: QdmPatient {
                id: patient.id.clone(),
                birth_datetime: patient.birth_datetime,
                qdm_version: "5.6".to_string(),
                data_elements,
            },
        })
    }
}

impl ModelConverter for StandardConverter {
    fn convert_patients(
        &self,
        measure: &Measure,
        patients: &[LegacyPatient],
    ) -> (Vec<CqmPatient>, Vec<PatientId>) {
        let mut converted = Vec::with_capacity(patients.len());
        let mut failed = Vec::new();

        for patient in patients {
            match self.convert_patient(patient) {
                Some(cqm_patient) => converted.push(cqm_patient),
                None => {
                    tracing::warn!(
                        patient_id = %patient.id,
                        measure_id = %measure.id,
                        "Patient failed conversion to the canonical model"
                    );
                    failed.push(patient.id.clone());
                }
            }
        }

        tracing::debug!(
            measure_id = %measure.id,
            converted = converted.len(),
            failed = failed.len(),
            "Converted patient batch"
        );

        (converted, failed)
    }

    fn measure_and_value_sets_to_cqm(
        &self,
        measure: &LegacyMeasure,
        value_sets: &[ValueSet],
    ) -> Result<Measure> {
        let mut builder = Measure::builder()
            .id(measure.id.as_str())
            .map_err(CohortError::Conversion)?
            .title(measure.title.clone());

        if let Some(ref cms_id) = measure.cms_id {
            builder = builder.cms_id(cms_id.clone());
        }
        if let Some(ref hqmf_set_id) = measure.hqmf_set_id {
            builder = builder.hqmf_set_id(hqmf_set_id.clone());
        }
        for population_set in &measure.population_sets {
            builder = builder.population_set(population_set.clone());
        }
        for value_set in value_sets {
            builder = builder.value_set(value_set.clone());
        }

        builder.build().map_err(CohortError::Conversion)
    }
}
