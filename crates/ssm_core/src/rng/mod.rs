//! # Random Number Sources
//!
//! Every simulator takes its randomness from an explicit handle passed by the
//! caller. There is no ambient generator, so two runs with the same seed
//! produce identical output and independent runs can proceed side by side.
//!
//! ## Module Structure
//!
//! - [`source`]: the [`NormalSource`] trait the simulators are generic over,
//!   plus [`ScriptedNormals`] for pinning exact draws
//! - [`prng`]: [`SimRng`], the seeded production generator
//!
//! ## Usage Example
//!
//! ```rust
//! use ssm_core::rng::{NormalSource, SimRng};
//!
//! let mut rng = SimRng::from_seed(12345);
//! let z = rng.next_normal();
//!
//! let mut buffer = vec![0.0; 16];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;
mod source;

pub use prng::SimRng;
pub use source::{NormalSource, ScriptedNormals};
