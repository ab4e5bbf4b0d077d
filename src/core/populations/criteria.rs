//! Result criteria name derivation
//!
//! The calculation service reports per-population results; reporting layers
//! need those population codes in a fixed global order regardless of how a
//! measure happens to store them. This module derives the ordered criteria
//! names for a population set or stratification.

use crate::domain::{PopulationSet, Stratification};

/// Every population code the calculation service can report, in the order
/// results are presented. Intersection against this list governs reporting
/// order, never the entity's own field order.
pub const ALL_POPULATION_CODES: [&str; 10] = [
    "STRAT", "IPP", "DENOM", "NUMER", "NUMEX", "DENEX", "DENEXCEP", "MSRPOPL", "MSRPOPLEX",
    "OBSERV",
];

/// Population codes that identify actual population criteria (everything
/// except the synthetic STRAT and OBSERV entries).
pub const POPULATION_CRITERIA_CODES: [&str; 8] = [
    "IPP", "DENOM", "NUMER", "NUMEX", "DENEX", "DENEXCEP", "MSRPOPL", "MSRPOPLEX",
];

/// Ordered result criteria names for a population set
///
/// The codes present on the set, plus a synthetic `OBSERV` when the set owns
/// observations, intersected with [`ALL_POPULATION_CODES`] to fix the order.
pub fn population_set_criteria_names(population_set: &PopulationSet) -> Vec<&'static str> {
    let mut present: Vec<&str> = population_set
        .populations
        .keys()
        .map(String::as_str)
        .collect();
    if !population_set.observations.is_empty() {
        present.push("OBSERV");
    }
    ordered_intersection(&present)
}

/// Ordered result criteria names for a stratification
///
/// A stratification reports its parent population set's codes plus the
/// synthetic `STRAT` code, again in the fixed global order.
pub fn stratification_criteria_names(
    population_set: &PopulationSet,
    _stratification: &Stratification,
) -> Vec<&'static str> {
    let mut present: Vec<&str> = population_set_criteria_names(population_set);
    present.push("STRAT");
    ordered_intersection(&present)
}

/// Population codes a measure actually uses: the subset of
/// [`POPULATION_CRITERIA_CODES`] defined (with an HQMF id) on the first
/// population set.
pub fn population_keys(measure: &crate::domain::Measure) -> Vec<&'static str> {
    let Some(first_set) = measure.population_sets.first() else {
        return Vec::new();
    };
    POPULATION_CRITERIA_CODES
        .iter()
        .filter(|code| {
            first_set
                .populations
                .get(**code)
                .is_some_and(|statement| statement.hqmf_id.is_some())
        })
        .copied()
        .collect()
}

// Intersect the fixed list with the codes present, preserving the fixed
// list's order and dropping anything unrecognized.
fn ordered_intersection(present: &[&str]) -> Vec<&'static str> {
    ALL_POPULATION_CODES
        .iter()
        .filter(|code| present.contains(*code))
        .copied()
        .collect()
}
