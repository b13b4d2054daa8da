//! FSV command implementation
//!
//! Builds k stochastic-volatility factor paths, then mixes them into p
//! observed series.

use ssm_models::{generate_factor_sv, simulate_factor_paths};
use tracing::{debug, info};

use super::OutputArgs;
use crate::config::{Model, SimulationSettings};
use crate::output::Table;
use crate::Result;

/// Run the fsv command
pub fn run(settings: &SimulationSettings, out: &OutputArgs) -> Result<Table> {
    settings.validate_for(Model::Fsv)?;
    let config = settings.run_config()?;
    let params = settings.ar1.params()?;
    let factor = &settings.factor;
    let fsv = &settings.fsv;
    info!("Simulating factor stochastic volatility...");
    info!(
        "  n: {}, p: {}, k: {}, seed: {}",
        config.n_steps(),
        factor.p,
        factor.k,
        config.seed()
    );
    info!(
        "  observation variance: {}, noise: {}",
        fsv.observation_variance, fsv.noise
    );

    let mut rng = config.rng();
    let ft = simulate_factor_paths(config.n_steps(), factor.k, &params, &mut rng)?;
    debug!("Latent factor paths: {}x{}", ft.nrows(), ft.ncols());
    let beta = factor.loadings(&mut rng)?;
    let sample = generate_factor_sv(
        config.n_steps(),
        fsv.observation_variance,
        &beta,
        &ft,
        fsv.noise,
        &mut rng,
    )?;

    let table = Table::from(&sample);
    out.emit(&table)?;
    info!("FSV simulation complete");
    Ok(table)
}
