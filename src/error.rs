//! Error types for solar geometry calculations.

use thiserror::Error;

/// Errors raised by the scalar and batch APIs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolarError {
    /// An inverse trigonometric argument left [-1, 1], went non-finite, or a
    /// denominator vanished.
    #[error("domain error: {quantity} = {value} is outside the valid domain")]
    Domain {
        /// Name of the offending intermediate quantity
        quantity: &'static str,
        /// The value that triggered the failure
        value: f64,
    },

    /// A parameter required by the selected mode was not supplied.
    #[error("missing required parameter: {parameter}")]
    MissingParameter { parameter: &'static str },

    #[error("invalid latitude {value}° (must be between -90° and +90°)")]
    InvalidLatitude { value: f64 },

    #[error("invalid longitude {value}° (must be between -180° and +180°)")]
    InvalidLongitude { value: f64 },

    /// Batch inputs whose shapes neither match nor broadcast from one element.
    #[error("shape mismatch for {quantity}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        quantity: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },
}

/// Result type for solar geometry operations
pub type Result<T> = std::result::Result<T, SolarError>;

impl SolarError {
    pub(crate) fn domain(quantity: &'static str, value: f64) -> Self {
        log::debug!("{quantity} = {value} is outside the valid domain");
        Self::Domain { quantity, value }
    }
}

/// Fails unless `value` is a valid argument for `acos`/`asin`. An overshoot
/// of a few ULP past ±1 is rounding and is pulled back onto the boundary.
pub(crate) fn check_unit_interval(quantity: &'static str, value: f64) -> Result<f64> {
    if (-1.0..=1.0).contains(&value) {
        Ok(value)
    } else if value.abs() - 1.0 <= 4.0 * f64::EPSILON {
        Ok(value.clamp(-1.0, 1.0))
    } else {
        Err(SolarError::domain(quantity, value))
    }
}
