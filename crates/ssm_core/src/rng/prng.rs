//! Seeded pseudo-random generator used by the simulators.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use super::source::NormalSource;

/// Seeded generator for reproducible simulation runs.
///
/// Wraps `rand::rngs::StdRng` and keeps the seed around so that a run can be
/// logged and replayed.
///
/// # Examples
///
/// ```rust
/// use ssm_core::rng::{NormalSource, SimRng};
///
/// let mut rng1 = SimRng::from_seed(7);
/// let mut rng2 = SimRng::from_seed(7);
/// assert_eq!(rng1.next_normal(), rng2.next_normal());
/// assert_eq!(rng1.seed(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: StdRng,
    seed: u64,
}

impl SimRng {
    /// Creates a generator initialised with `seed`.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl NormalSource for SimRng {
    /// Standard normal variate via the Ziggurat sampler in `rand_distr`.
    #[inline]
    fn next_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }
}
