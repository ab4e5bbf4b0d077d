//! Calculate command implementation
//!
//! This module implements the `calculate` command: load a measure and a
//! patient batch from JSON files, run the calculation through the
//! coordinator, and print a summary.

use crate::config::load_config;
use crate::core::calculate::CalculationCoordinator;
use crate::domain::{LegacyMeasure, LegacyPatient, Measure, MeasureSource};
use clap::Args;
use std::fs;

/// Arguments for the calculate command
#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Path to the measure JSON file
    #[arg(short, long)]
    pub measure: String,

    /// Path to the patients JSON file (array of patient records)
    #[arg(short, long)]
    pub patients: String,

    /// Path to an options JSON file (object passed through to the engine)
    #[arg(short, long)]
    pub options: Option<String>,

    /// Treat the measure file as a legacy record requiring conversion
    #[arg(long)]
    pub legacy: bool,

    /// Write the full calculation outcome JSON to this path
    #[arg(long)]
    pub output: Option<String>,
}

impl CalculateArgs {
    /// Execute the calculate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            config_path = %config_path,
            measure = %self.measure,
            patients = %self.patients,
            "Running calculation"
        );

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let measure_source = match self.read_measure() {
            Ok(source) => source,
            Err(e) => {
                println!("❌ Failed to read measure file: {e}");
                return Ok(2);
            }
        };

        let patients: Vec<LegacyPatient> = match read_json(&self.patients) {
            Ok(patients) => patients,
            Err(e) => {
                println!("❌ Failed to read patients file: {e}");
                return Ok(2);
            }
        };

        let options = match self.read_options() {
            Ok(options) => options,
            Err(e) => {
                println!("❌ Failed to read options file: {e}");
                return Ok(2);
            }
        };

        let coordinator = CalculationCoordinator::new(&config)?;

        println!(
            "🧮 Calculating measure {} against {} patient(s)",
            measure_source.id(),
            patients.len()
        );
        println!("   Service: {}", config.calculation.url);
        println!();

        match coordinator.calculate(&measure_source, &patients, options).await {
            Ok(outcome) => {
                println!("✅ Calculation complete");
                println!("   Calculated: {}", outcome.calculated_patient_count());
                println!("   Failed: {}", outcome.failed_patients.len());
                for failed in &outcome.failed_patients {
                    println!("     - {failed}");
                }

                if let Some(ref output_path) = self.output {
                    fs::write(output_path, serde_json::to_string_pretty(&outcome)?)?;
                    println!();
                    println!("Results written to {output_path}");
                }
                Ok(0)
            }
            Err(e) => {
                println!("❌ Calculation failed");
                println!("   {e}");
                Ok(1)
            }
        }
    }

    fn read_measure(&self) -> anyhow::Result<MeasureSource> {
        if self.legacy {
            let measure: LegacyMeasure = read_json(&self.measure)?;
            Ok(MeasureSource::Legacy(measure))
        } else {
            let measure: Measure = read_json(&self.measure)?;
            measure
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid measure: {e}"))?;
            Ok(MeasureSource::Canonical(measure))
        }
    }

    fn read_options(&self) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
        match self.options {
            Some(ref path) => Ok(read_json(path)?),
            None => Ok(serde_json::Map::new()),
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {path}: {e}"))?;
    serde_json::from_str(&contents).map_err(|e| anyhow::anyhow!("Failed to parse {path}: {e}"))
}
