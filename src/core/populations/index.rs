//! Population set key derivation and lookup
//!
//! A measure may have one or more population sets, each with zero or more
//! stratifications. The calculation service tags its results with a
//! "population set key": the bare `population_set_id` for an unstratified
//! entry, or the `stratification_id` for a stratified one. This module
//! enumerates those keys in the fixed order downstream reporting depends on
//! and resolves a key back to its defining population set.

use crate::domain::{CohortError, Measure, PopulationSet, Result, Stratification};

/// Descriptor for one population set / stratification combination
///
/// Exactly one descriptor exists per population set, plus one per
/// stratification. Derived on demand from the measure; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationSetDescriptor {
    /// Id of the population set this descriptor belongs to
    pub population_set_id: String,

    /// Id of the stratification, when the descriptor refines the set
    pub stratification_id: Option<String>,
}

impl PopulationSetDescriptor {
    /// The key the calculation service uses to tag results for this entry:
    /// the stratification id if present, else the population set id.
    pub fn key(&self) -> &str {
        self.stratification_id
            .as_deref()
            .unwrap_or(&self.population_set_id)
    }
}

/// Enumerates every population set / stratification combination of a measure
///
/// Order is fixed: first one descriptor per distinct `population_set_id` in
/// first-seen order (a set appearing twice yields only its first descriptor),
/// then one descriptor per stratification, walking population sets in their
/// original order and each set's stratifications in declared order.
pub fn population_sets_and_stratifications(measure: &Measure) -> Vec<PopulationSetDescriptor> {
    let mut descriptors: Vec<PopulationSetDescriptor> = Vec::new();

    for population_set in &measure.population_sets {
        let already_seen = descriptors
            .iter()
            .any(|d| d.population_set_id == population_set.population_set_id);
        if already_seen {
            continue;
        }
        descriptors.push(PopulationSetDescriptor {
            population_set_id: population_set.population_set_id.clone(),
            stratification_id: None,
        });
    }

    for population_set in &measure.population_sets {
        for stratification in &population_set.stratifications {
            descriptors.push(PopulationSetDescriptor {
                population_set_id: population_set.population_set_id.clone(),
                stratification_id: Some(stratification.stratification_id.clone()),
            });
        }
    }

    descriptors
}

/// Resolves a population set key back to its defining entities
///
/// Scans the enumerated descriptors for the first whose population set id or
/// stratification id equals `key`, and returns the matching population set
/// along with the stratification when the key names one.
///
/// # Errors
///
/// Returns [`CohortError::NotFound`] when no descriptor matches; callers
/// must treat this as "unknown key", not a crash.
pub fn population_set_for_key<'a>(
    measure: &'a Measure,
    key: &str,
) -> Result<(&'a PopulationSet, Option<&'a Stratification>)> {
    let descriptor = population_sets_and_stratifications(measure)
        .into_iter()
        .find(|d| d.population_set_id == key || d.stratification_id.as_deref() == Some(key))
        .ok_or_else(|| {
            CohortError::NotFound(format!(
                "No population set matches key '{}' in measure {}",
                key, measure.id
            ))
        })?;

    let population_set = measure
        .population_sets
        .iter()
        .find(|ps| ps.population_set_id == descriptor.population_set_id)
        .ok_or_else(|| {
            CohortError::NotFound(format!(
                "Population set '{}' missing from measure {}",
                descriptor.population_set_id, measure.id
            ))
        })?;

    let stratification = match descriptor.stratification_id {
        Some(ref stratification_id) => population_set
            .stratifications
            .iter()
            .find(|s| &s.stratification_id == stratification_id),
        None => None,
    };

    Ok((population_set, stratification))
}

/// Returns the descriptor (not just the key) matching a population set key
///
/// # Errors
///
/// Returns [`CohortError::NotFound`] when no descriptor matches.
pub fn descriptor_for_key(measure: &Measure, key: &str) -> Result<PopulationSetDescriptor> {
    population_sets_and_stratifications(measure)
        .into_iter()
        .find(|d| d.population_set_id == key || d.stratification_id.as_deref() == Some(key))
        .ok_or_else(|| {
            CohortError::NotFound(format!(
                "No population set matches key '{}' in measure {}",
                key, measure.id
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PopulationSet, StatementReference, Stratification};

    fn measure_with_sets(sets: Vec<PopulationSet>) -> Measure {
        let mut builder = Measure::builder().id("measure-1").unwrap().title("Test");
        for set in sets {
            builder = builder.population_set(set);
        }
        builder.build().unwrap()
    }

    fn plain_set(id: &str) -> PopulationSet {
        PopulationSet::new(id, id)
            .with_population("IPP", StatementReference::new("Lib", "Initial Population"))
    }

    #[test]
    fn test_enumerate_deduplicates_first_seen() {
        // Duplicate ids can only enter through deserialized input; validate()
        // rejects them, but enumeration still deduplicates defensively.
        let mut measure = measure_with_sets(vec![plain_set("A"), plain_set("B")]);
        measure.population_sets.push(plain_set("B"));
        measure.population_sets.push(plain_set("C"));

        let descriptors = population_sets_and_stratifications(&measure);
        let keys: Vec<&str> = descriptors.iter().map(|d| d.key()).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_enumerate_bare_set_then_stratifications() {
        let set = plain_set("A")
            .with_stratification(Stratification::new("S1", "First"))
            .with_stratification(Stratification::new("S2", "Second"));
        let measure = measure_with_sets(vec![set]);

        let descriptors = population_sets_and_stratifications(&measure);
        let keys: Vec<&str> = descriptors.iter().map(|d| d.key()).collect();
        assert_eq!(keys, vec!["A", "S1", "S2"]);

        assert_eq!(descriptors[1].population_set_id, "A");
        assert_eq!(descriptors[1].stratification_id.as_deref(), Some("S1"));
    }

    #[test]
    fn test_enumerate_all_sets_before_any_stratification() {
        let set_a = plain_set("A").with_stratification(Stratification::new("A-S1", "First"));
        let set_b = plain_set("B").with_stratification(Stratification::new("B-S1", "First"));
        let measure = measure_with_sets(vec![set_a, set_b]);

        let keys: Vec<String> = population_sets_and_stratifications(&measure)
            .iter()
            .map(|d| d.key().to_string())
            .collect();
        assert_eq!(keys, vec!["A", "B", "A-S1", "B-S1"]);
    }

    #[test]
    fn test_resolve_round_trips_every_descriptor() {
        let set_a = plain_set("A")
            .with_stratification(Stratification::new("S1", "First"))
            .with_stratification(Stratification::new("S2", "Second"));
        let measure = measure_with_sets(vec![set_a, plain_set("B")]);

        for descriptor in population_sets_and_stratifications(&measure) {
            let resolved = descriptor_for_key(&measure, descriptor.key()).unwrap();
            assert_eq!(resolved, descriptor);
        }
    }

    #[test]
    fn test_resolve_returns_set_and_stratification() {
        let set = plain_set("A").with_stratification(Stratification::new("S1", "First"));
        let measure = measure_with_sets(vec![set]);

        let (population_set, stratification) = population_set_for_key(&measure, "S1").unwrap();
        assert_eq!(population_set.population_set_id, "A");
        assert_eq!(stratification.unwrap().stratification_id, "S1");

        let (population_set, stratification) = population_set_for_key(&measure, "A").unwrap();
        assert_eq!(population_set.population_set_id, "A");
        assert!(stratification.is_none());
    }

    #[test]
    fn test_resolve_unknown_key_is_not_found() {
        let measure = measure_with_sets(vec![plain_set("A")]);
        let err = population_set_for_key(&measure, "nonexistent").unwrap_err();
        assert!(matches!(err, CohortError::NotFound(_)));
    }

    #[test]
    fn test_resolve_empty_key_is_not_found() {
        let measure = measure_with_sets(vec![plain_set("A")]);
        let err = population_set_for_key(&measure, "").unwrap_err();
        assert!(matches!(err, CohortError::NotFound(_)));
    }

    #[test]
    fn test_key_is_inverse_of_resolve() {
        let descriptor = PopulationSetDescriptor {
            population_set_id: "A".to_string(),
            stratification_id: Some("S1".to_string()),
        };
        assert_eq!(descriptor.key(), "S1");

        let descriptor = PopulationSetDescriptor {
            population_set_id: "A".to_string(),
            stratification_id: None,
        };
        assert_eq!(descriptor.key(), "A");
    }
}
