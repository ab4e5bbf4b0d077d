//! Population structure indexing
//!
//! This module derives and indexes the population set keys a measure
//! exposes. The calculation service tags results by key (a population set id
//! or a stratification id); reporting layers use these functions to
//! enumerate keys in a deterministic order, resolve a key back to its
//! defining population set, and label per-population results.
//!
//! # Example
//!
//! ```rust
//! use cohort::core::populations::{population_sets_and_stratifications, population_set_for_key};
//! use cohort::domain::{Measure, PopulationSet, StatementReference, Stratification};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let measure = Measure::builder()
//!     .id("measure-1")?
//!     .title("Example")
//!     .population_set(
//!         PopulationSet::new("PopulationSet_1", "Criteria")
//!             .with_population("IPP", StatementReference::new("Lib", "Initial Population"))
//!             .with_stratification(Stratification::new("Strat_1", "By age")),
//!     )
//!     .build()?;
//!
//! let keys: Vec<String> = population_sets_and_stratifications(&measure)
//!     .iter()
//!     .map(|d| d.key().to_string())
//!     .collect();
//! assert_eq!(keys, vec!["PopulationSet_1", "Strat_1"]);
//!
//! let (set, stratification) = population_set_for_key(&measure, "Strat_1")?;
//! assert_eq!(set.population_set_id, "PopulationSet_1");
//! assert!(stratification.is_some());
//! # Ok(())
//! # }
//! ```

pub mod criteria;
pub mod index;

pub use criteria::{
    population_keys, population_set_criteria_names, stratification_criteria_names,
    ALL_POPULATION_CODES, POPULATION_CRITERIA_CODES,
};
pub use index::{
    descriptor_for_key, population_set_for_key, population_sets_and_stratifications,
    PopulationSetDescriptor,
};
