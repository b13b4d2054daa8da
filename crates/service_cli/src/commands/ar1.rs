//! AR(1) command implementation
//!
//! Generates one mean-reverting AR(1) path.

use ssm_models::generate_ar1;
use tracing::info;

use super::OutputArgs;
use crate::config::{Model, SimulationSettings};
use crate::output::Table;
use crate::Result;

/// Run the ar1 command
pub fn run(settings: &SimulationSettings, out: &OutputArgs) -> Result<Table> {
    settings.validate_for(Model::Ar1)?;
    let config = settings.run_config()?;
    let params = settings.ar1.params()?;
    info!("Simulating AR(1) path...");
    info!("  n: {}, seed: {}", config.n_steps(), config.seed());
    info!(
        "  phi: {}, sigma: {}, mu: {}",
        params.phi, params.sigma, params.mu
    );

    let mut rng = config.rng();
    let path = generate_ar1(config.n_steps(), &params, &mut rng)?;

    let table = Table::from_path("x", &path);
    out.emit(&table)?;
    info!("AR(1) simulation complete");
    Ok(table)
}
