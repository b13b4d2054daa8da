//! Check command implementation
//!
//! Validates the resolved settings and prints them as TOML.

use tracing::info;

use crate::config::SimulationSettings;
use crate::Result;

/// Run the check command
pub fn run(settings: &SimulationSettings) -> Result<String> {
    info!("Checking configuration...");
    settings.validate()?;
    let rendered = settings.to_toml()?;
    println!("{}", rendered);
    info!("Configuration OK");
    Ok(rendered)
}
