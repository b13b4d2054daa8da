//! # ssm_models (L2: Simulators)
//!
//! Forward simulators for the state-space and stochastic-volatility models
//! used to illustrate environmental sensor series.
//!
//! This crate provides:
//! - [`ar1`]: mean-reverting AR(1) path generator
//! - [`isv`]: independent stochastic-volatility simulator
//! - [`factor`]: static factor-analysis simulator
//! - [`fsv`]: factor stochastic-volatility simulator
//! - [`config`]: validated run configuration (length, seed)
//!
//! ## Design Principles
//!
//! - **Explicit generator**: every routine takes `&mut impl NormalSource`
//! - **Fail fast**: malformed lengths and shapes return `SimulationError`
//!   before any draw is made
//! - **Iterative recursions**: no recursion depth concerns for long paths
//!
//! ## Example
//!
//! ```
//! use ssm_core::rng::SimRng;
//! use ssm_models::ar1::{generate_ar1, Ar1Params};
//! use ssm_models::isv::generate_isv;
//!
//! let mut rng = SimRng::from_seed(42);
//! let params = Ar1Params::new(0.1, 0.2, -1.0).unwrap();
//! let alpha = generate_ar1(250, &params, &mut rng).unwrap();
//! let path = generate_isv(250, &alpha, &mut rng).unwrap();
//! assert_eq!(path.len(), 250);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod ar1;
pub mod config;
pub mod factor;
pub mod fsv;
pub mod isv;

pub use ar1::{generate_ar1, Ar1Params};
pub use config::{SimulationConfig, SimulationConfigBuilder, MAX_STEPS};
pub use factor::{generate_factor_model, implied_covariance, FactorSample};
pub use fsv::{generate_factor_sv, simulate_factor_paths, FsvNoise, FsvSample};
pub use isv::{generate_isv, simulate_isv, IsvPath};
