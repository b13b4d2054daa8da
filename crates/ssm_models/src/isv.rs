//! Independent stochastic-volatility (ISV) simulator.
//!
//! Given a log-volatility path `alpha`, observations are
//! ```text
//! y[i] = z_i * exp(alpha[i]),   z_i ~ N(0, 1)
//! ```
//! The volatility path is an input. [`simulate_isv`] is the usual
//! composition that draws `alpha` from an AR(1) first.

use ssm_core::error::{require_finite, require_positive_len};
use ssm_core::rng::NormalSource;
use ssm_core::{SimulationError, SimulationResult};

use crate::ar1::{generate_ar1, Ar1Params};

/// Output of the ISV simulator.
///
/// `y` and `alpha` have the same length; the time index is derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct IsvPath {
    /// Observed series.
    pub y: Vec<f64>,
    /// Log-volatility path the observations were drawn with.
    pub alpha: Vec<f64>,
}

impl IsvPath {
    /// Number of time steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// `true` when the path has no steps (never produced by the simulator).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Time index `1..=n`.
    pub fn time(&self) -> Vec<usize> {
        (1..=self.len()).collect()
    }

    /// Per-step volatility `exp(alpha[i])`.
    pub fn volatility(&self) -> Vec<f64> {
        self.alpha.iter().map(|a| a.exp()).collect()
    }

    /// Iterates `(time, y, alpha)` rows, stopping at the shorter series.
    pub fn rows(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        (1..)
            .zip(&self.y)
            .zip(&self.alpha)
            .map(|((t, &y), &a)| (t, y, a))
    }
}

/// Draws observations for a given log-volatility path.
///
/// Consumes exactly `n` draws.
///
/// # Errors
///
/// - `InvalidArgument` if `n == 0` or `alpha` holds a non-finite value
/// - `DimensionMismatch` if `alpha.len() != n`
pub fn generate_isv<R: NormalSource>(
    n: usize,
    alpha: &[f64],
    rng: &mut R,
) -> SimulationResult<IsvPath> {
    require_positive_len("n", n)?;
    if alpha.len() != n {
        return Err(SimulationError::mismatch("alpha length", n, alpha.len()));
    }
    for &a in alpha {
        require_finite("alpha", a)?;
    }

    let y = alpha
        .iter()
        .map(|a| rng.next_normal() * a.exp())
        .collect();

    Ok(IsvPath {
        y,
        alpha: alpha.to_vec(),
    })
}

/// Draws an AR(1) log-volatility path and then the ISV observations.
///
/// Consumes `2n` draws: the AR(1) path first, then the observation noise.
pub fn simulate_isv<R: NormalSource>(
    n: usize,
    params: &Ar1Params,
    rng: &mut R,
) -> SimulationResult<IsvPath> {
    let alpha = generate_ar1(n, params, rng)?;
    generate_isv(n, &alpha, rng)
}
