//! # ssm_core: Foundation for Sensor State-Space Simulators
//!
//! ## Layer 1 (Foundation) Role
//!
//! ssm_core is the bottom layer of the workspace and provides:
//! - Explicit random number sources (`rng`): no simulator touches a global generator
//! - Shape-checked loading matrices and idiosyncratic variances (`linalg`)
//! - The shared error type `SimulationError` (`error`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use ssm_core::linalg::LoadingMatrix;
//! use ssm_core::rng::{NormalSource, SimRng};
//!
//! let mut rng = SimRng::from_seed(42);
//! let z = rng.next_normal();
//! assert!(z.is_finite());
//!
//! let beta = LoadingMatrix::from_rows(&[vec![1.0, 0.5], vec![0.2, 0.8]]).unwrap();
//! assert_eq!(beta.n_series(), 2);
//! assert_eq!(beta.n_factors(), 2);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod linalg;
pub mod rng;

pub use error::{SimulationError, SimulationResult};
