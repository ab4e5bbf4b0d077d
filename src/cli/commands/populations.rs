//! Populations command implementation
//!
//! This module implements the `populations` command: print the population
//! set keys a measure exposes, in calculation-result order, with the
//! criteria names reported under each key.

use crate::core::populations::{
    population_keys, population_set_criteria_names, population_set_for_key,
    population_sets_and_stratifications, stratification_criteria_names,
};
use crate::domain::Measure;
use clap::Args;
use std::fs;

/// Arguments for the populations command
#[derive(Args, Debug)]
pub struct PopulationsArgs {
    /// Path to the canonical measure JSON file
    #[arg(short, long)]
    pub measure: String,
}

impl PopulationsArgs {
    /// Execute the populations command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(measure = %self.measure, "Listing population set keys");

        let contents = match fs::read_to_string(&self.measure) {
            Ok(contents) => contents,
            Err(e) => {
                println!("❌ Failed to read measure file: {e}");
                return Ok(2);
            }
        };
        let measure: Measure = match serde_json::from_str(&contents) {
            Ok(measure) => measure,
            Err(e) => {
                println!("❌ Failed to parse measure file: {e}");
                return Ok(2);
            }
        };
        if let Err(e) = measure.validate() {
            println!("❌ Invalid measure: {e}");
            return Ok(2);
        }

        println!("Measure: {} ({})", measure.title, measure.id);
        if let Some(ref cms_id) = measure.cms_id {
            println!("CMS id: {cms_id}");
        }
        println!("Population codes in use: {}", population_keys(&measure).join(", "));
        println!();

        let descriptors = population_sets_and_stratifications(&measure);
        println!("Population set keys ({}):", descriptors.len());
        for descriptor in &descriptors {
            // The measure was just enumerated, so every key resolves.
            let (population_set, stratification) =
                population_set_for_key(&measure, descriptor.key())?;
            let criteria = match stratification {
                Some(stratification) => {
                    stratification_criteria_names(population_set, stratification)
                }
                None => population_set_criteria_names(population_set),
            };
            let kind = if stratification.is_some() {
                format!("stratification of {}", population_set.population_set_id)
            } else {
                "population set".to_string()
            };
            println!("  {} ({kind})", descriptor.key());
            println!("    criteria: {}", criteria.join(", "));
        }

        Ok(0)
    }
}
