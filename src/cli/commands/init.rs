//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cohort.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Cohort configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point [calculation].url at your calculation service");
                println!("  3. Validate configuration: cohort validate-config");
                println!("  4. Run a calculation: cohort calculate --measure m.json --patients p.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the starter configuration
    fn generate_config() -> String {
        r#"# Cohort Configuration File
# Clinical quality measure calculation orchestration

[application]
log_level = "info"  # trace | debug | info | warn | error

[calculation]
# Endpoint of the calculation service
url = "http://localhost:8081/calculate"
# Single-attempt request timeout; the call fails rather than hangs
timeout_seconds = 120

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly
"#
        .to_string()
    }
}
