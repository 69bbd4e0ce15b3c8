//! Error types for curve construction.
//!
//! Lookups on a curve never return errors: an age outside the curve is a
//! caller bug and panics. Only the checked constructor
//! [`AgeIndexedCurve::new`](crate::AgeIndexedCurve::new) reports problems
//! through [`CurveError`].

use thiserror::Error;

/// Curve construction errors.
///
/// # Examples
/// ```
/// use fpsim_core::CurveError;
///
/// let err = CurveError::InvalidResolution { resolution: 0.0 };
/// assert!(format!("{}", err).contains("resolution"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CurveError {
    /// The curve holds no values.
    #[error("Curve is empty: at least one age bin is required")]
    Empty,

    /// A curve value is NaN or infinite.
    #[error("Non-finite curve value {value} at index {index}")]
    NonFiniteValue {
        /// Position of the offending value
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Resolution is zero, negative or not finite.
    #[error("Invalid resolution: {resolution} bins per year (must be positive and finite)")]
    InvalidResolution {
        /// The invalid resolution
        resolution: f64,
    },
}
