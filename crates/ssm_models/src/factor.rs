//! Static factor-analysis simulator.
//!
//! For each time step `i`:
//! ```text
//! f[i,]   ~ MVN(0, I_k)
//! eps[i,] ~ MVN(0, Sigma),   Sigma diagonal
//! y[i,]   = beta * f[i,] + eps[i,]
//! ```
//! so that `Var(y[i,]) = beta * beta^T + Sigma` (see [`implied_covariance`]).

use nalgebra::{DMatrix, DVector};
use ssm_core::error::require_positive_len;
use ssm_core::linalg::{IdiosyncraticVariance, LoadingMatrix};
use ssm_core::rng::NormalSource;
use ssm_core::{SimulationError, SimulationResult};

/// Output of the factor-analysis simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct FactorSample {
    /// Observations, n×p.
    pub y: DMatrix<f64>,
    /// Latent factors, n×k.
    pub f: DMatrix<f64>,
}

impl FactorSample {
    /// Number of time steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.y.nrows()
    }

    /// Number of observed series.
    #[inline]
    pub fn n_series(&self) -> usize {
        self.y.ncols()
    }

    /// Number of latent factors.
    #[inline]
    pub fn n_factors(&self) -> usize {
        self.f.ncols()
    }
}

/// Draws `n` observations of a p-dimensional factor model with k factors.
///
/// Per row, the k factor draws are taken before the p noise draws, so a run
/// consumes `n * (k + p)` variates.
///
/// # Errors
///
/// - `InvalidArgument` if `n`, `p` or `k` is zero
/// - `DimensionMismatch` if `beta` is not p×k or `sigma` is not length p
///
/// # Example
///
/// ```
/// use ssm_core::linalg::{IdiosyncraticVariance, LoadingMatrix};
/// use ssm_core::rng::SimRng;
/// use ssm_models::factor::generate_factor_model;
///
/// let mut rng = SimRng::from_seed(8);
/// let beta = LoadingMatrix::random(6, 2, &mut rng).unwrap();
/// let sigma = IdiosyncraticVariance::uniform(6, 0.1).unwrap();
/// let sample = generate_factor_model(100, 6, 2, &beta, &sigma, &mut rng).unwrap();
/// assert_eq!(sample.y.shape(), (100, 6));
/// assert_eq!(sample.f.shape(), (100, 2));
///
/// // Asking for three factors with a two-column loading matrix fails.
/// assert!(generate_factor_model(100, 6, 3, &beta, &sigma, &mut rng).is_err());
/// ```
pub fn generate_factor_model<R: NormalSource>(
    n: usize,
    p: usize,
    k: usize,
    beta: &LoadingMatrix,
    sigma: &IdiosyncraticVariance,
    rng: &mut R,
) -> SimulationResult<FactorSample> {
    require_positive_len("n", n)?;
    require_positive_len("p", p)?;
    require_positive_len("k", k)?;
    beta.check_shape(p, k)?;
    if sigma.len() != p {
        return Err(SimulationError::mismatch("sigma length", p, sigma.len()));
    }

    let sd = sigma.std_devs();
    let mut y = DMatrix::zeros(n, p);
    let mut f = DMatrix::zeros(n, k);
    let mut f_row = DVector::zeros(k);
    let mut eps = DVector::zeros(p);

    for i in 0..n {
        rng.fill_normal(f_row.as_mut_slice());
        rng.fill_normal(eps.as_mut_slice());
        eps.component_mul_assign(&sd);

        let y_row = beta.as_matrix() * &f_row + &eps;
        f.row_mut(i).copy_from(&f_row.transpose());
        y.row_mut(i).copy_from(&y_row.transpose());
    }

    Ok(FactorSample { y, f })
}

/// Marginal covariance of one observation row, `beta * beta^T + Sigma`.
///
/// # Errors
///
/// `DimensionMismatch` if `sigma` does not have one entry per row of `beta`.
pub fn implied_covariance(
    beta: &LoadingMatrix,
    sigma: &IdiosyncraticVariance,
) -> SimulationResult<DMatrix<f64>> {
    if sigma.len() != beta.n_series() {
        return Err(SimulationError::mismatch(
            "sigma length",
            beta.n_series(),
            sigma.len(),
        ));
    }
    let b = beta.as_matrix();
    Ok(b * b.transpose() + sigma.to_matrix())
}
