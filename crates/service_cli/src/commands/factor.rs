//! Factor command implementation
//!
//! Simulates the static factor-analysis model. Output columns are the p
//! observed series followed by the k latent factors.

use ssm_models::generate_factor_model;
use tracing::info;

use super::OutputArgs;
use crate::config::{Model, SimulationSettings};
use crate::output::Table;
use crate::Result;

/// Run the factor command
pub fn run(settings: &SimulationSettings, out: &OutputArgs) -> Result<Table> {
    settings.validate_for(Model::Factor)?;
    let config = settings.run_config()?;
    let factor = &settings.factor;
    info!("Simulating factor model...");
    info!(
        "  n: {}, p: {}, k: {}, seed: {}",
        config.n_steps(),
        factor.p,
        factor.k,
        config.seed()
    );

    let mut rng = config.rng();
    let beta = factor.loadings(&mut rng)?;
    let sigma = factor.variance()?;
    let sample =
        generate_factor_model(config.n_steps(), factor.p, factor.k, &beta, &sigma, &mut rng)?;

    let table = Table::from(&sample);
    out.emit(&table)?;
    info!("Factor simulation complete");
    Ok(table)
}
