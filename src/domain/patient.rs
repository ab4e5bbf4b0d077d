//! Patient domain models
//!
//! A legacy patient record is the pre-canonical shape; the canonical
//! [`CqmPatient`] wraps the QDM clinical fragment that the calculation
//! service actually consumes. A legacy record may fail conversion, in which
//! case it is tracked by identifier and never discarded.

use crate::domain::ids::PatientId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_qdm_version() -> String {
    "5.6".to_string()
}

/// Legacy patient record, pre-conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyPatient {
    /// Patient identifier
    pub id: PatientId,

    /// Given names in order
    #[serde(default)]
    pub given_names: Vec<String>,

    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// Birth date and time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_datetime: Option<DateTime<Utc>>,

    /// HQMF set ids of the measures this patient was authored against
    #[serde(default)]
    pub measure_ids: Vec<String>,

    /// Free-form clinical payload; a JSON array of QDM data elements
    #[serde(default)]
    pub data_elements: serde_json::Value,
}

impl LegacyPatient {
    /// Creates a legacy patient with an empty clinical payload
    pub fn new(id: PatientId) -> Self {
        Self {
            id,
            given_names: Vec::new(),
            family_name: None,
            birth_datetime: None,
            measure_ids: Vec::new(),
            data_elements: serde_json::Value::Array(Vec::new()),
        }
    }

    /// Full display name, given names followed by the family name
    pub fn full_name(&self) -> String {
        let mut parts = self.given_names.clone();
        if let Some(ref family_name) = self.family_name {
            parts.push(family_name.clone());
        }
        parts.join(" ")
    }
}

/// QDM clinical fragment extracted for transport to the calculation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QdmPatient {
    /// Patient identifier, echoed back in the engine's result keys
    #[serde(rename = "_id")]
    pub id: PatientId,

    /// Birth date and time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_datetime: Option<DateTime<Utc>>,

    /// QDM model version the data elements conform to
    #[serde(default = "default_qdm_version")]
    pub qdm_version: String,

    /// QDM data elements as a JSON array
    #[serde(default)]
    pub data_elements: Vec<serde_json::Value>,
}

/// Canonical patient wrapper
///
/// Owns the [`QdmPatient`] fragment plus the demographic fields that stay
/// on this side of the network boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CqmPatient {
    /// Patient identifier
    pub id: PatientId,

    /// Given names in order
    #[serde(default)]
    pub given_names: Vec<String>,

    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// The clinical fragment sent to the calculation service
    pub qdm_patient: QdmPatient,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_legacy_patient_full_name() {
        let mut patient = LegacyPatient::new(PatientId::from_str("p1").unwrap());
        patient.given_names = vec!["Ada".to_string(), "Marie".to_string()];
        patient.family_name = Some("Lovelace".to_string());
        assert_eq!(patient.full_name(), "Ada Marie Lovelace");
    }

    #[test]
    fn test_legacy_patient_defaults_to_empty_payload() {
        let patient = LegacyPatient::new(PatientId::from_str("p1").unwrap());
        assert_eq!(patient.data_elements, serde_json::json!([]));
    }

    #[test]
    fn test_qdm_patient_serializes_camel_case() {
        let qdm = QdmPatient {
            id: PatientId::from_str("p1").unwrap(),
            birth_datetime: None,
            qdm_version: "5.6".to_string(),
            data_elements: vec![serde_json::json!({"qdmCategory": "encounter"})],
        };
        let json = serde_json::to_value(&qdm).unwrap();
        assert_eq!(json["_id"], "p1");
        assert_eq!(json["qdmVersion"], "5.6");
        assert!(json["dataElements"].is_array());
    }

    #[test]
    fn test_qdm_patient_default_version_on_deserialize() {
        let qdm: QdmPatient = serde_json::from_value(serde_json::json!({"_id": "p1"})).unwrap();
        assert_eq!(qdm.qdm_version, "5.6");
        assert!(qdm.data_elements.is_empty());
    }
}
