//! Factor stochastic-volatility (FSV) simulator.
//!
//! Latent factors carry their own stochastic volatility and are mixed into
//! the observed series through a loading matrix:
//! ```text
//! ft[,j] = ISV path driven by an AR(1) log-volatility    (j = 1..k)
//! y[i,]  = beta * ft[i,] + e_i,   e_i ~ N(0, v)
//! ```
//!
//! ## Observation noise
//!
//! The default [`FsvNoise::Shared`] adds one scalar draw per row to every
//! series in that row. [`FsvNoise::Independent`] draws the full p-dimensional
//! noise vector of the model formula. In both variants `v` is the noise
//! variance, so each draw is scaled by `sqrt(v)`.

use std::fmt;
use std::str::FromStr;

use nalgebra::{DMatrix, DVector};
use ssm_core::error::{require_non_negative, require_positive_len};
use ssm_core::linalg::LoadingMatrix;
use ssm_core::rng::NormalSource;
use ssm_core::{SimulationError, SimulationResult};

use crate::ar1::{generate_ar1, Ar1Params};
use crate::isv::generate_isv;

/// Shape of the FSV observation noise.
///
/// Parsed case-insensitively from `shared` or `independent`; the same names
/// are used by `Display` and serde.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FsvNoise {
    /// One scalar draw per row, shared by all p series.
    #[default]
    Shared,
    /// p independent draws per row.
    Independent,
}

impl FsvNoise {
    /// Lower-case name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            FsvNoise::Shared => "shared",
            FsvNoise::Independent => "independent",
        }
    }
}

impl fmt::Display for FsvNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FsvNoise {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shared" => Ok(FsvNoise::Shared),
            "independent" => Ok(FsvNoise::Independent),
            other => Err(SimulationError::invalid(
                "noise",
                format!("unknown variant '{}', expected 'shared' or 'independent'", other),
            )),
        }
    }
}

/// Output of the FSV simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct FsvSample {
    /// Observations, n×p.
    pub y: DMatrix<f64>,
}

impl FsvSample {
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

    /// Time index `1..=n`.
    pub fn time(&self) -> Vec<usize> {
        (1..=self.n_steps()).collect()
    }

    /// The n×(p+1) table with the time index in the first column.
    pub fn to_table(&self) -> DMatrix<f64> {
        let n = self.n_steps();
        let p = self.n_series();
        DMatrix::from_fn(n, p + 1, |i, j| {
            if j == 0 {
                (i + 1) as f64
            } else {
                self.y[(i, j - 1)]
            }
        })
    }
}

/// Builds n×k latent factor paths for the FSV model.
///
/// Column `j` is an ISV path whose log-volatility is an AR(1) path with
/// `params`. Columns are generated left to right, each consuming `2n` draws
/// (AR(1) first, then the observation noise).
///
/// # Errors
///
/// `InvalidArgument` if `n` or `k` is zero, or the parameters are invalid.
pub fn simulate_factor_paths<R: NormalSource>(
    n: usize,
    k: usize,
    params: &Ar1Params,
    rng: &mut R,
) -> SimulationResult<DMatrix<f64>> {
    require_positive_len("n", n)?;
    require_positive_len("k", k)?;

    let mut ft = DMatrix::zeros(n, k);
    for j in 0..k {
        let alpha = generate_ar1(n, params, rng)?;
        let path = generate_isv(n, &alpha, rng)?;
        ft.column_mut(j).copy_from_slice(&path.y);
    }
    Ok(ft)
}

/// Mixes latent factor paths through `beta` and adds observation noise.
///
/// Draws per row: one for [`FsvNoise::Shared`], p for
/// [`FsvNoise::Independent`].
///
/// # Errors
///
/// - `InvalidArgument` if `n == 0` or `v` is negative/non-finite
/// - `DimensionMismatch` if `ft` is not n×k with k the column count of `beta`
///
/// # Example
///
/// ```
/// use ssm_core::linalg::LoadingMatrix;
/// use ssm_core::rng::SimRng;
/// use ssm_models::ar1::Ar1Params;
/// use ssm_models::fsv::{generate_factor_sv, simulate_factor_paths, FsvNoise};
///
/// let mut rng = SimRng::from_seed(21);
/// let params = Ar1Params::new(0.05, 0.2, -0.5).unwrap();
/// let ft = simulate_factor_paths(200, 2, &params, &mut rng).unwrap();
/// let beta = LoadingMatrix::random(5, 2, &mut rng).unwrap();
/// let sample = generate_factor_sv(200, 0.01, &beta, &ft, FsvNoise::Shared, &mut rng).unwrap();
/// assert_eq!(sample.to_table().shape(), (200, 6));
/// ```
pub fn generate_factor_sv<R: NormalSource>(
    n: usize,
    v: f64,
    beta: &LoadingMatrix,
    ft: &DMatrix<f64>,
    noise: FsvNoise,
    rng: &mut R,
) -> SimulationResult<FsvSample> {
    require_positive_len("n", n)?;
    require_non_negative("v", v)?;
    if ft.nrows() != n {
        return Err(SimulationError::mismatch("ft rows", n, ft.nrows()));
    }
    if ft.ncols() != beta.n_factors() {
        return Err(SimulationError::mismatch(
            "ft columns",
            beta.n_factors(),
            ft.ncols(),
        ));
    }

    let p = beta.n_series();
    let sd = v.sqrt();
    let mut y = ft * beta.as_matrix().transpose();
    let mut row_noise = DVector::zeros(p);

    for i in 0..n {
        match noise {
            FsvNoise::Shared => row_noise.fill(sd * rng.next_normal()),
            FsvNoise::Independent => {
                rng.fill_normal(row_noise.as_mut_slice());
                row_noise *= sd;
            }
        }
        let mut row = y.row_mut(i);
        row += row_noise.transpose();
    }

    Ok(FsvSample { y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ssm_core::rng::{ScriptedNormals, SimRng};

    fn beta_4x2() -> LoadingMatrix {
        LoadingMatrix::from_rows(&[
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.5, 0.5],
            vec![2.0, -1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_noise_from_str() {
        assert_eq!("shared".parse::<FsvNoise>().unwrap(), FsvNoise::Shared);
        assert_eq!("Independent".parse::<FsvNoise>().unwrap(), FsvNoise::Independent);
        assert!("diagonal".parse::<FsvNoise>().is_err());
        assert!("scalar".parse::<FsvNoise>().is_err());
        assert!("full".parse::<FsvNoise>().is_err());
        assert_eq!(FsvNoise::default().to_string(), "shared");
    }

    #[test]
    fn test_zero_variance_is_pure_loading_product() {
        let mut rng = SimRng::from_seed(5);
        let params = Ar1Params::new(0.1, 0.3, 0.0).unwrap();
        let ft = simulate_factor_paths(40, 2, &params, &mut rng).unwrap();
        let beta = beta_4x2();

        for noise in [FsvNoise::Shared, FsvNoise::Independent] {
            let sample = generate_factor_sv(40, 0.0, &beta, &ft, noise, &mut rng).unwrap();
            for i in 0..40 {
                let expected = beta.as_matrix() * ft.row(i).transpose();
                for j in 0..4 {
                    assert_relative_eq!(sample.y[(i, j)], expected[j], epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_shared_noise_is_common_to_row() {
        let ft = DMatrix::zeros(3, 2);
        let mut draws = ScriptedNormals::new(vec![1.0, -2.0, 0.5]);
        let sample =
            generate_factor_sv(3, 4.0, &beta_4x2(), &ft, FsvNoise::Shared, &mut draws).unwrap();

        // sd = sqrt(4) = 2
        for (i, z) in [1.0, -2.0, 0.5].iter().enumerate() {
            for j in 0..4 {
                assert_relative_eq!(sample.y[(i, j)], 2.0 * z);
            }
        }
        assert_eq!(draws.consumed(), 3);
    }

    #[test]
    fn test_independent_noise_draws_per_series() {
        let ft = DMatrix::zeros(2, 2);
        let script: Vec<f64> = (1..=8).map(f64::from).collect();
        let mut draws = ScriptedNormals::new(script);
        let sample =
            generate_factor_sv(2, 1.0, &beta_4x2(), &ft, FsvNoise::Independent, &mut draws)
                .unwrap();

        assert_eq!(sample.y.row(0).iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(sample.y.row(1).iter().copied().collect::<Vec<_>>(), vec![5.0, 6.0, 7.0, 8.0]);
        assert_eq!(draws.consumed(), 8);
    }

    #[test]
    fn test_ft_shape_checked() {
        let mut rng = SimRng::from_seed(1);
        let beta = beta_4x2();

        let wrong_k = DMatrix::zeros(10, 3);
        let err = generate_factor_sv(10, 0.1, &beta, &wrong_k, FsvNoise::Shared, &mut rng)
            .unwrap_err();
        assert_eq!(err, SimulationError::mismatch("ft columns", 2, 3));

        let wrong_n = DMatrix::zeros(9, 2);
        let err = generate_factor_sv(10, 0.1, &beta, &wrong_n, FsvNoise::Shared, &mut rng)
            .unwrap_err();
        assert_eq!(err, SimulationError::mismatch("ft rows", 10, 9));
    }

    #[test]
    fn test_negative_variance_rejected() {
        let mut rng = SimRng::from_seed(1);
        let ft = DMatrix::zeros(5, 2);
        let err = generate_factor_sv(5, -0.1, &beta_4x2(), &ft, FsvNoise::Shared, &mut rng)
            .unwrap_err();
        assert_eq!(err.parameter(), "v");
    }

    #[test]
    fn test_time_index_follows_rows() {
        let sample = FsvSample {
            y: DMatrix::from_row_slice(3, 1, &[0.5, 1.5, 2.5]),
        };
        assert_eq!(sample.time(), vec![1, 2, 3]);
        let table = sample.to_table();
        assert_eq!(table.column(0).iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
        assert_eq!(table[(2, 1)], 2.5);
    }

    #[test]
    fn test_table_has_leading_time_column() {
        let ft = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut rng = SimRng::from_seed(1);
        let sample = generate_factor_sv(2, 0.0, &beta_4x2(), &ft, FsvNoise::Shared, &mut rng)
            .unwrap();
        let table = sample.to_table();
        assert_eq!(table.shape(), (2, 5));
        assert_eq!(table[(0, 0)], 1.0);
        assert_eq!(table[(1, 0)], 2.0);
        assert_relative_eq!(table[(0, 4)], 2.0 * 1.0 - 2.0);
        assert_relative_eq!(table[(1, 3)], 0.5 * 3.0 + 0.5 * 4.0);
    }

    #[test]
    fn test_factor_paths_column_composition() {
        // Column 0: AR(1) draws [0, 0] -> alpha = [0, 0]; ISV draws [1, 2].
        // Column 1: AR(1) draws [ln 2, 0] -> alpha = [ln 2, ln 2]; ISV draws [3, 4].
        let ln2 = 2.0_f64.ln();
        let mut draws = ScriptedNormals::new(vec![0.0, 0.0, 1.0, 2.0, ln2, 0.0, 3.0, 4.0]);
        let params = Ar1Params::new(0.0, 0.0, 0.0).unwrap();
        let ft = simulate_factor_paths(2, 2, &params, &mut draws).unwrap();
        assert_relative_eq!(ft[(0, 0)], 1.0);
        assert_relative_eq!(ft[(1, 0)], 2.0);
        assert_relative_eq!(ft[(0, 1)], 6.0, epsilon = 1e-12);
        assert_relative_eq!(ft[(1, 1)], 8.0, epsilon = 1e-12);
    }
}
