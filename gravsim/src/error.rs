//! Error types for the simulator.
//!
//! Only construction-time operations can fail: building bodies, drawing the
//! initial conditions, validating a scenario and changing the time scale.
//! The per-tick path (`step`, pair interactions) is infallible once its
//! inputs have been validated.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A configuration value or call argument is outside its valid domain.
    InvalidArgument {
        /// Name of the offending argument (for logging).
        name: &'static str,
        /// The rejected value, rendered as text.
        value: String,
        /// Human-readable description of what is accepted.
        reason: &'static str,
    },
}

impl SimError {
    pub fn invalid(name: &'static str, value: impl fmt::Display, reason: &'static str) -> Self {
        SimError::InvalidArgument {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidArgument {
                name,
                value,
                reason,
            } => write!(f, "invalid argument '{}' = {}: {}", name, value, reason),
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

/// Returns an error unless `value` is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> SimResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, value, "must be finite and > 0"))
    }
}
