//! Error types for the simulators.
//!
//! Every simulator is a pure function of its arguments and the supplied
//! generator, so the only failures are precondition violations. They are
//! reported immediately with the name of the offending parameter.

use thiserror::Error;

/// Precondition failure raised by a simulator or one of its inputs.
///
/// # Variants
/// - `InvalidArgument`: a scalar parameter is out of range (zero length,
///   negative scale, non-finite value)
/// - `DimensionMismatch`: a matrix or vector does not conform to the
///   requested shape
///
/// # Examples
/// ```
/// use ssm_core::SimulationError;
///
/// let err = SimulationError::invalid("sigma", "must be non-negative, got -1");
/// assert_eq!(
///     err.to_string(),
///     "Invalid argument 'sigma': must be non-negative, got -1"
/// );
/// assert!(err.is_invalid_argument());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Scalar parameter outside its valid domain.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },

    /// Shape of a matrix or vector disagrees with the requested dimensions.
    #[error("Dimension mismatch for '{name}': expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Name of the mis-shaped input.
        name: &'static str,
        /// Expected size (rows, columns or length).
        expected: usize,
        /// Size actually supplied.
        actual: usize,
    },
}

impl SimulationError {
    /// Shorthand for [`SimulationError::InvalidArgument`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`SimulationError::DimensionMismatch`].
    pub fn mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            name,
            expected,
            actual,
        }
    }

    /// Returns `true` for every variant.
    ///
    /// Shape errors are a kind of invalid argument; callers that only care
    /// about the broad category can match on this instead of the variant.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::DimensionMismatch { .. }
        )
    }

    /// Name of the parameter that failed validation.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidArgument { name, .. } | Self::DimensionMismatch { name, .. } => name,
        }
    }
}

/// Result alias used throughout the simulator crates.
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Rejects a zero length.
pub fn require_positive_len(name: &'static str, n: usize) -> SimulationResult<()> {
    if n == 0 {
        return Err(SimulationError::invalid(name, "must be at least 1"));
    }
    Ok(())
}

/// Rejects NaN and infinities.
pub fn require_finite(name: &'static str, value: f64) -> SimulationResult<()> {
    if !value.is_finite() {
        return Err(SimulationError::invalid(
            name,
            format!("must be finite, got {}", value),
        ));
    }
    Ok(())
}

/// Rejects negative or non-finite scale and variance parameters.
pub fn require_non_negative(name: &'static str, value: f64) -> SimulationResult<()> {
    require_finite(name, value)?;
    if value < 0.0 {
        return Err(SimulationError::invalid(
            name,
            format!("must be non-negative, got {}", value),
        ));
    }
    Ok(())
}
