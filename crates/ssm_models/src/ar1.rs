//! Mean-reverting AR(1) path generator.
//!
//! The recursion is
//! ```text
//! x[1] ~ N(0, 1)
//! x[i] = x[i-1] + phi * (mu - x[i-1]) + sigma * z_i,   z_i ~ N(0, 1)
//! ```
//! The mean-reversion increment is added to the previous value, so this is a
//! discrete mean-reverting random walk rather than a draw from the stationary
//! AR(1) law. With `phi = 0` the drift vanishes and `mu` has no effect.
//!
//! The same recursion drives the log-volatility of the stochastic-volatility
//! simulators in [`crate::isv`] and [`crate::fsv`].

use ssm_core::error::{require_finite, require_non_negative, require_positive_len};
use ssm_core::rng::NormalSource;
use ssm_core::SimulationResult;

/// AR(1) parameters.
///
/// # Fields
///
/// * `phi` - Persistence / mean-reversion weight (any finite value)
/// * `sigma` - Innovation scale (non-negative)
/// * `mu` - Mean-reversion level (any finite value)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ar1Params {
    /// Mean-reversion weight.
    pub phi: f64,
    /// Innovation scale.
    pub sigma: f64,
    /// Mean-reversion level.
    pub mu: f64,
}

impl Ar1Params {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any value is non-finite or `sigma` is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use ssm_models::ar1::Ar1Params;
    ///
    /// assert!(Ar1Params::new(0.1, 0.2, -1.0).is_ok());
    /// assert!(Ar1Params::new(0.1, -0.2, -1.0).is_err());
    /// ```
    pub fn new(phi: f64, sigma: f64, mu: f64) -> SimulationResult<Self> {
        let params = Self { phi, sigma, mu };
        params.validate()?;
        Ok(params)
    }

    /// Re-checks the invariants; fields are public, so simulators call this
    /// on entry.
    pub fn validate(&self) -> SimulationResult<()> {
        require_finite("phi", self.phi)?;
        require_non_negative("sigma", self.sigma)?;
        require_finite("mu", self.mu)?;
        Ok(())
    }

    /// One step of the recursion given the previous value and a normal draw.
    #[inline]
    pub fn step(&self, prev: f64, z: f64) -> f64 {
        prev + self.phi * (self.mu - prev) + self.sigma * z
    }
}

/// Generates an AR(1) path of length `n`.
///
/// Consumes exactly `n` draws from `rng`: one for `x[1]` and one innovation
/// per subsequent step.
///
/// # Errors
///
/// `InvalidArgument` if `n == 0` or the parameters are invalid.
///
/// # Example
///
/// ```
/// use ssm_core::rng::SimRng;
/// use ssm_models::ar1::{generate_ar1, Ar1Params};
///
/// let mut rng = SimRng::from_seed(3);
/// let path = generate_ar1(100, &Ar1Params::new(0.2, 0.1, 5.0).unwrap(), &mut rng).unwrap();
/// assert_eq!(path.len(), 100);
/// ```
pub fn generate_ar1<R: NormalSource>(
    n: usize,
    params: &Ar1Params,
    rng: &mut R,
) -> SimulationResult<Vec<f64>> {
    require_positive_len("n", n)?;
    params.validate()?;

    let mut path = Vec::with_capacity(n);
    let mut current = rng.next_normal();
    path.push(current);
    for _ in 1..n {
        current = params.step(current, rng.next_normal());
        path.push(current);
    }
    Ok(path)
}
