//! Simulation settings.
//!
//! Loaded from a TOML file (default `ssm.toml`); a missing file means all
//! defaults. Command-line flags are applied on top afterwards.
//!
//! ```toml
//! seed = 42
//! n = 500
//!
//! [ar1]
//! phi = 0.1
//! sigma = 0.2
//! mu = 0.0
//!
//! [factor]
//! p = 6
//! k = 2
//! idiosyncratic_variance = 0.1          # or one entry per series
//! loadings = [[1.0, 0.0], [0.5, 0.5]]   # optional, p rows of k entries
//!
//! [fsv]
//! observation_variance = 0.01
//! noise = "shared"                      # or "independent"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use ssm_core::linalg::{IdiosyncraticVariance, LoadingMatrix};
use ssm_core::rng::SimRng;
use ssm_models::{Ar1Params, FsvNoise, SimulationConfig};
use tracing::{debug, info};

use crate::{CliError, Result};

/// AR(1) section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ar1Settings {
    /// Mean-reversion weight.
    pub phi: f64,
    /// Innovation scale.
    pub sigma: f64,
    /// Mean-reversion level.
    pub mu: f64,
}

impl Default for Ar1Settings {
    fn default() -> Self {
        Self {
            phi: 0.1,
            sigma: 0.2,
            mu: 0.0,
        }
    }
}

impl Ar1Settings {
    /// Validated simulator parameters.
    pub fn params(&self) -> Result<Ar1Params> {
        Ok(Ar1Params::new(self.phi, self.sigma, self.mu)?)
    }
}

/// Idiosyncratic variance: one value for every series, or one per series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarianceSpec {
    /// Same variance for every series.
    Uniform(f64),
    /// One variance per series.
    PerSeries(Vec<f64>),
}

impl Default for VarianceSpec {
    fn default() -> Self {
        VarianceSpec::Uniform(0.1)
    }
}

/// Factor-analysis section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorSettings {
    /// Number of observed series.
    pub p: usize,
    /// Number of latent factors.
    pub k: usize,
    /// Idiosyncratic variances.
    pub idiosyncratic_variance: VarianceSpec,
    /// Loading rows; drawn at random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loadings: Option<Vec<Vec<f64>>>,
}

impl Default for FactorSettings {
    fn default() -> Self {
        Self {
            p: 6,
            k: 2,
            idiosyncratic_variance: VarianceSpec::default(),
            loadings: None,
        }
    }
}

impl FactorSettings {
    /// Idiosyncratic variances expanded to length `p`.
    pub fn variance(&self) -> Result<IdiosyncraticVariance> {
        Ok(match &self.idiosyncratic_variance {
            VarianceSpec::Uniform(v) => IdiosyncraticVariance::uniform(self.p, *v)?,
            VarianceSpec::PerSeries(vs) => IdiosyncraticVariance::new(vs.clone())?,
        })
    }

    /// Configured loadings, or p×k standard normal draws from `rng`.
    pub fn loadings(&self, rng: &mut SimRng) -> Result<LoadingMatrix> {
        match &self.loadings {
            Some(rows) => {
                let beta = LoadingMatrix::from_rows(rows)?;
                beta.check_shape(self.p, self.k)?;
                Ok(beta)
            }
            None => {
                debug!("Drawing random {}x{} loading matrix", self.p, self.k);
                Ok(LoadingMatrix::random(self.p, self.k, rng)?)
            }
        }
    }
}

/// FSV section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsvSettings {
    /// Observation noise variance `v`.
    pub observation_variance: f64,
    /// Shared scalar or independent per-series noise.
    pub noise: FsvNoise,
}

impl Default for FsvSettings {
    fn default() -> Self {
        Self {
            observation_variance: 0.01,
            noise: FsvNoise::Shared,
        }
    }
}

/// Simulator a command runs; selects which sections must be valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    /// Plain AR(1) path.
    Ar1,
    /// Independent stochastic volatility.
    Isv,
    /// Static factor model.
    Factor,
    /// Factor stochastic volatility.
    Fsv,
}

impl Model {
    fn uses_ar1(self) -> bool {
        matches!(self, Model::Ar1 | Model::Isv | Model::Fsv)
    }

    fn uses_factor(self) -> bool {
        matches!(self, Model::Factor | Model::Fsv)
    }
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Generator seed.
    pub seed: Option<u64>,
    /// Series length.
    pub n: Option<usize>,
    /// AR(1) mean-reversion weight.
    pub phi: Option<f64>,
    /// AR(1) innovation scale.
    pub sigma: Option<f64>,
    /// AR(1) mean-reversion level.
    pub mu: Option<f64>,
    /// Number of observed series.
    pub p: Option<usize>,
    /// Number of latent factors.
    pub k: Option<usize>,
    /// FSV observation noise variance.
    pub observation_variance: Option<f64>,
    /// FSV noise shape, parsed as [`FsvNoise`].
    pub noise: Option<String>,
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Generator seed.
    pub seed: u64,
    /// Series length.
    pub n: usize,
    /// AR(1) / log-volatility parameters.
    pub ar1: Ar1Settings,
    /// Factor model dimensions and noise.
    pub factor: FactorSettings,
    /// FSV observation noise.
    pub fsv: FsvSettings,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            n: 500,
            ar1: Ar1Settings::default(),
            factor: FactorSettings::default(),
            fsv: FsvSettings::default(),
        }
    }
}

impl SimulationSettings {
    /// Loads settings from `path`, or defaults if the file does not exist.
    ///
    /// The result is not validated: command-line overrides are applied
    /// first, then the command validates what it uses.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        info!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Applies command-line overrides on top of the loaded values.
    ///
    /// # Errors
    ///
    /// `Simulation` if the noise name is not a known [`FsvNoise`] variant.
    pub fn apply_overrides(&mut self, overrides: &Overrides) -> Result<()> {
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(n) = overrides.n {
            self.n = n;
        }
        if let Some(phi) = overrides.phi {
            self.ar1.phi = phi;
        }
        if let Some(sigma) = overrides.sigma {
            self.ar1.sigma = sigma;
        }
        if let Some(mu) = overrides.mu {
            self.ar1.mu = mu;
        }
        if let Some(p) = overrides.p {
            self.factor.p = p;
        }
        if let Some(k) = overrides.k {
            self.factor.k = k;
        }
        if let Some(v) = overrides.observation_variance {
            self.fsv.observation_variance = v;
        }
        if let Some(noise) = &overrides.noise {
            self.fsv.noise = noise.parse()?;
        }
        debug!("Resolved settings: {:?}", self);
        Ok(())
    }

    /// Renders the settings as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Run configuration for the simulators.
    pub fn run_config(&self) -> Result<SimulationConfig> {
        Ok(SimulationConfig::builder()
            .n_steps(self.n)
            .seed(self.seed)
            .build()?)
    }

    /// Checks every section without drawing anything.
    pub fn validate(&self) -> Result<()> {
        self.validate_for(Model::Fsv)?;
        self.validate_for(Model::Factor)
    }

    /// Checks only the sections `model` reads.
    pub fn validate_for(&self, model: Model) -> Result<()> {
        self.run_config()?;
        if model.uses_ar1() {
            self.ar1.params()?;
        }
        if model.uses_factor() {
            self.validate_factor()?;
        }
        if model == Model::Fsv {
            ssm_core::error::require_non_negative(
                "observation_variance",
                self.fsv.observation_variance,
            )?;
        }
        Ok(())
    }

    fn validate_factor(&self) -> Result<()> {
        let factor = &self.factor;
        if factor.p == 0 || factor.k == 0 {
            return Err(CliError::Config(format!(
                "factor dimensions must be positive, got p={} k={}",
                factor.p, factor.k
            )));
        }
        let variance = factor.variance()?;
        if variance.len() != factor.p {
            return Err(CliError::Config(format!(
                "idiosyncratic_variance has {} entries, expected p={}",
                variance.len(),
                factor.p
            )));
        }
        if let Some(rows) = &factor.loadings {
            LoadingMatrix::from_rows(rows)?.check_shape(factor.p, factor.k)?;
        }
        Ok(())
    }
}
