//! Simulation run configuration.
//!
//! Holds the two knobs every simulator shares: the series length and the
//! seed of the generator the caller will thread through the run.

use ssm_core::rng::SimRng;
use ssm_core::{SimulationError, SimulationResult};

/// Maximum number of time steps allowed per run.
pub const MAX_STEPS: usize = 1_000_000;

/// Validated run configuration.
///
/// Use [`SimulationConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use ssm_models::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_steps(500)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_steps(), 500);
/// assert_eq!(config.rng().seed(), 42);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    n_steps: usize,
    seed: u64,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of time steps per series.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Seed for the run's generator.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fresh generator seeded from this configuration.
    pub fn rng(&self) -> SimRng {
        SimRng::from_seed(self.seed)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `n_steps` is 0 or greater than [`MAX_STEPS`].
    pub fn validate(&self) -> SimulationResult<()> {
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(SimulationError::invalid(
                "n_steps",
                format!("must be in range [1, {}], got {}", MAX_STEPS, self.n_steps),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_steps: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of time steps.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the generator seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `n_steps` or `seed` is missing, or `n_steps`
    /// is out of range. The seed has no default: reproducibility is the
    /// caller's decision.
    pub fn build(self) -> SimulationResult<SimulationConfig> {
        let n_steps = self
            .n_steps
            .ok_or_else(|| SimulationError::invalid("n_steps", "must be specified"))?;
        let seed = self
            .seed
            .ok_or_else(|| SimulationError::invalid("seed", "must be specified"))?;

        let config = SimulationConfig { n_steps, seed };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssm_core::rng::NormalSource;

    #[test]
    fn test_config_builder_valid() {
        let config = SimulationConfig::builder()
            .n_steps(252)
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(config.n_steps(), 252);
        assert_eq!(config.seed(), 7);
    }

    #[test]
    fn test_config_rng_is_reproducible() {
        let config = SimulationConfig::builder()
            .n_steps(10)
            .seed(11)
            .build()
            .unwrap();
        assert_eq!(config.rng().next_normal(), config.rng().next_normal());
    }

    #[test]
    fn test_config_invalid_zero_steps() {
        let result = SimulationConfig::builder().n_steps(0).seed(1).build();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidArgument {
                name: "n_steps",
                ..
            })
        ));
    }

    #[test]
    fn test_config_invalid_too_many_steps() {
        let result = SimulationConfig::builder()
            .n_steps(MAX_STEPS + 1)
            .seed(1)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_missing_seed() {
        let result = SimulationConfig::builder().n_steps(10).build();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidArgument { name: "seed", .. })
        ));
    }
}
