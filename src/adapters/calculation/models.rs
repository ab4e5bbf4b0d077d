//! Calculation service response models
//!
//! The service responds with a JSON object whose top-level keys are patient
//! identifiers (each mapping population set keys to per-population results)
//! plus a `failed_patients` list. [`CalculationOutcome`] is that response
//! after reconciliation: conversion failures are merged into the failed list
//! so no patient from the original input is silently dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calculation results for one invocation, keyed by population set key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationOutcome {
    /// Patients that could not be computed: engine-reported failures plus
    /// patients that failed model conversion before the call
    #[serde(default)]
    pub failed_patients: Vec<String>,

    /// Per-patient results; each value maps a population set key to that
    /// patient's population membership and observation values
    #[serde(flatten)]
    pub patient_results: BTreeMap<String, serde_json::Value>,
}

impl CalculationOutcome {
    /// All results for one patient, keyed by population set key
    pub fn patient_result(&self, patient_id: &str) -> Option<&serde_json::Value> {
        self.patient_results.get(patient_id)
    }

    /// The result for one patient under one population set key
    pub fn result_for_key(
        &self,
        patient_id: &str,
        population_set_key: &str,
    ) -> Option<&serde_json::Value> {
        self.patient_results.get(patient_id)?.get(population_set_key)
    }

    /// Number of patients the engine computed results for
    pub fn calculated_patient_count(&self) -> usize {
        self.patient_results.len()
    }
}
