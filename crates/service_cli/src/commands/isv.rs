//! ISV command implementation
//!
//! Draws an AR(1) log-volatility path and the matching stochastic-volatility
//! observations.

use ssm_models::simulate_isv;
use tracing::info;

use super::OutputArgs;
use crate::config::{Model, SimulationSettings};
use crate::output::Table;
use crate::Result;

/// Run the isv command
pub fn run(settings: &SimulationSettings, out: &OutputArgs) -> Result<Table> {
    settings.validate_for(Model::Isv)?;
    let config = settings.run_config()?;
    let params = settings.ar1.params()?;
    info!("Simulating independent stochastic volatility...");
    info!("  n: {}, seed: {}", config.n_steps(), config.seed());

    let mut rng = config.rng();
    let path = simulate_isv(config.n_steps(), &params, &mut rng)?;

    let table = Table::from(&path);
    out.emit(&table)?;
    info!("ISV simulation complete");
    Ok(table)
}
