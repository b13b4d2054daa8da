//! Shape-checked matrix types for the factor models.
//!
//! Loadings and idiosyncratic variances are held in `nalgebra` containers so
//! that products are computed by a tested linear-algebra routine instead of
//! hand-rolled index loops. The wrappers only add validation: once built, a
//! [`LoadingMatrix`] is non-empty and finite, and an
//! [`IdiosyncraticVariance`] is non-empty, finite and non-negative.

use nalgebra::{DMatrix, DVector};

use crate::error::{require_non_negative, SimulationError, SimulationResult};
use crate::rng::NormalSource;

/// Factor loading matrix `beta`: rows are observed series (p), columns are
/// latent factors (k).
#[derive(Clone, Debug, PartialEq)]
pub struct LoadingMatrix {
    inner: DMatrix<f64>,
}

impl LoadingMatrix {
    /// Wraps an existing matrix.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the matrix has no rows or columns, or contains a
    /// non-finite entry.
    pub fn new(inner: DMatrix<f64>) -> SimulationResult<Self> {
        if inner.nrows() == 0 {
            return Err(SimulationError::invalid("beta", "must have at least one row"));
        }
        if inner.ncols() == 0 {
            return Err(SimulationError::invalid(
                "beta",
                "must have at least one column",
            ));
        }
        if let Some(bad) = inner.iter().find(|x| !x.is_finite()) {
            return Err(SimulationError::invalid(
                "beta",
                format!("entries must be finite, got {}", bad),
            ));
        }
        Ok(Self { inner })
    }

    /// Builds the matrix from row vectors.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the rows are ragged, plus everything
    /// [`LoadingMatrix::new`] rejects.
    ///
    /// # Examples
    ///
    /// ```
    /// use ssm_core::linalg::LoadingMatrix;
    ///
    /// let beta = LoadingMatrix::from_rows(&[vec![1.0, 0.0], vec![0.5, 2.0], vec![0.0, 1.0]]).unwrap();
    /// assert_eq!((beta.n_series(), beta.n_factors()), (3, 2));
    ///
    /// assert!(LoadingMatrix::from_rows(&[vec![1.0, 0.0], vec![0.5]]).is_err());
    /// ```
    pub fn from_rows(rows: &[Vec<f64>]) -> SimulationResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(ragged) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(SimulationError::mismatch(
                "beta row length",
                n_cols,
                ragged.len(),
            ));
        }
        let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::new(DMatrix::from_row_slice(n_rows, n_cols, &flat))
    }

    /// Draws every entry independently from `Normal(0, 1)`, row by row.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `p` or `k` is zero.
    pub fn random<R: NormalSource>(p: usize, k: usize, rng: &mut R) -> SimulationResult<Self> {
        crate::error::require_positive_len("p", p)?;
        crate::error::require_positive_len("k", k)?;
        let mut flat = vec![0.0; p * k];
        rng.fill_normal(&mut flat);
        Self::new(DMatrix::from_row_slice(p, k, &flat))
    }

    /// Number of observed series (rows).
    #[inline]
    pub fn n_series(&self) -> usize {
        self.inner.nrows()
    }

    /// Number of latent factors (columns).
    #[inline]
    pub fn n_factors(&self) -> usize {
        self.inner.ncols()
    }

    /// Borrow the underlying matrix.
    #[inline]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.inner
    }

    /// Checks that the matrix is p×k.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` naming the offending axis. Nothing is broadcast.
    pub fn check_shape(&self, p: usize, k: usize) -> SimulationResult<()> {
        if self.n_series() != p {
            return Err(SimulationError::mismatch("beta rows", p, self.n_series()));
        }
        if self.n_factors() != k {
            return Err(SimulationError::mismatch(
                "beta columns",
                k,
                self.n_factors(),
            ));
        }
        Ok(())
    }

    /// Row vectors, for serialisation and display.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.inner
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

/// Diagonal of the idiosyncratic covariance `Sigma` (length p).
#[derive(Clone, Debug, PartialEq)]
pub struct IdiosyncraticVariance {
    diag: DVector<f64>,
}

impl IdiosyncraticVariance {
    /// Builds the diagonal from per-series variances.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty vector or a negative/non-finite entry.
    pub fn new(variances: Vec<f64>) -> SimulationResult<Self> {
        if variances.is_empty() {
            return Err(SimulationError::invalid(
                "sigma",
                "must have at least one entry",
            ));
        }
        for &v in &variances {
            require_non_negative("sigma", v)?;
        }
        Ok(Self {
            diag: DVector::from_vec(variances),
        })
    }

    /// The same variance for each of `p` series.
    pub fn uniform(p: usize, variance: f64) -> SimulationResult<Self> {
        crate::error::require_positive_len("p", p)?;
        Self::new(vec![variance; p])
    }

    /// Zero idiosyncratic noise.
    pub fn zeros(p: usize) -> SimulationResult<Self> {
        Self::uniform(p, 0.0)
    }

    /// Number of series.
    #[inline]
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    /// Always `false` for a validated value; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Variances on the diagonal.
    #[inline]
    pub fn variances(&self) -> &DVector<f64> {
        &self.diag
    }

    /// Per-series standard deviations.
    pub fn std_devs(&self) -> DVector<f64> {
        self.diag.map(f64::sqrt)
    }

    /// The full p×p diagonal matrix.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_diagonal(&self.diag)
    }
}
