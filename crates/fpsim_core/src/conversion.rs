//! Probability clamping and annual/step conversion.
//!
//! Calibration tables hold annual probabilities. The simulation advances in
//! `mpy` steps per year, so an annual probability is converted to the
//! per-step probability with the same compounded survival:
//!
//! ```text
//! step = 1 - (1 - annual)^(1/mpy)      ⇔      (1 - step)^mpy = 1 - annual
//! ```
//!
//! This assumes a constant hazard inside the year. The linear `annual / mpy`
//! shortcut does not satisfy the identity and is not offered.
//!
//! All functions use generic type parameter `T: num_traits::Float` for f32/f64 support.

use num_traits::Float;

/// Median of three values.
///
/// Built from a min/max network, so a NaN argument is ignored rather than
/// propagated (`Float::min`/`Float::max` return the non-NaN operand).
///
/// # Examples
/// ```
/// use fpsim_core::median_of_three;
///
/// assert_eq!(median_of_three(0.0, 0.4, 1.0), 0.4);
/// assert_eq!(median_of_three(0.0, 1.5, 1.0), 1.0);
/// assert_eq!(median_of_three(0.0, -0.2, 1.0), 0.0);
/// ```
#[inline]
pub fn median_of_three<T: Float>(a: T, b: T, c: T) -> T {
    a.min(b).max(a.max(b).min(c))
}

/// Clamps a probability into [0, 1].
///
/// Equivalent to `median_of_three(0, value, 1)` for every input, including
/// NaN, which maps to 0.
///
/// # Examples
/// ```
/// use fpsim_core::clamp_probability;
///
/// assert_eq!(clamp_probability(1.5_f64), 1.0);
/// assert_eq!(clamp_probability(-0.2_f64), 0.0);
/// assert_eq!(clamp_probability(0.25_f64), 0.25);
/// ```
#[inline]
pub fn clamp_probability<T: Float>(value: T) -> T {
    value.max(T::zero()).min(T::one())
}

/// Converts an annual probability into a per-step probability.
///
/// # Arguments
/// * `annual` - Probability of the event within one year
/// * `mpy` - Steps per year (12 for monthly stepping)
///
/// # Returns
/// `1 - (1 - annual)^(1/mpy)`
///
/// The input is not clamped. Callers that may produce values outside
/// [0, 1] clamp first (see [`clamp_probability`]).
///
/// # Examples
/// ```
/// use fpsim_core::annual_to_step;
///
/// let monthly = annual_to_step(0.01_f64, 12.0);
/// assert!((monthly - 0.000837).abs() < 1e-6);
/// ```
#[inline]
pub fn annual_to_step<T: Float>(annual: T, mpy: T) -> T {
    let one = T::one();
    one - (one - annual).powf(one / mpy)
}

/// Converts a per-step probability back into the annual probability.
///
/// Inverse of [`annual_to_step`]: `1 - (1 - step)^mpy`.
///
/// # Examples
/// ```
/// use fpsim_core::{annual_to_step, step_to_annual};
///
/// let annual = 0.2_f64;
/// let round_trip = step_to_annual(annual_to_step(annual, 12.0), 12.0);
/// assert!((round_trip - annual).abs() < 1e-12);
/// ```
#[inline]
pub fn step_to_annual<T: Float>(step: T, mpy: T) -> T {
    let one = T::one();
    one - (one - step).powf(mpy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median_of_three_orderings() {
        let values = [(1.0, 2.0, 3.0), (3.0, 1.0, 2.0), (2.0, 3.0, 1.0), (3.0, 2.0, 1.0)];
        for (a, b, c) in values {
            assert_eq!(median_of_three(a, b, c), 2.0, "median({a}, {b}, {c})");
        }
        assert_eq!(median_of_three(1.0, 1.0, 5.0), 1.0);
    }

    #[test]
    fn test_clamp_matches_median_idiom() {
        for value in [-3.0, -0.2, 0.0, 1e-12, 0.5, 1.0, 1.5, 42.0, f64::NAN] {
            let clamped = clamp_probability(value);
            let median = median_of_three(0.0, value, 1.0);
            assert_eq!(clamped.to_bits(), median.to_bits(), "value {value}");
        }
    }

    #[test]
    fn test_monthly_conversion_identity() {
        for annual in [0.0, 0.001, 0.01, 0.2, 0.5, 0.99] {
            let monthly = annual_to_step(annual, 12.0);
            assert_relative_eq!((1.0 - monthly).powi(12), 1.0 - annual, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_conversion_endpoints() {
        assert_eq!(annual_to_step(0.0_f64, 12.0), 0.0);
        assert_eq!(annual_to_step(1.0_f64, 12.0), 1.0);
        assert_eq!(annual_to_step(0.3_f64, 1.0), 0.3);
    }

    #[test]
    fn test_compounding_beats_linear_split() {
        // Constant hazard gives a larger step probability than annual / mpy.
        let annual = 0.5;
        let monthly = annual_to_step(annual, 12.0);
        assert!(monthly > annual / 12.0);
    }

    #[test]
    fn test_f32_support() {
        let monthly = annual_to_step(0.01_f32, 12.0);
        assert!((monthly - 0.000837).abs() < 1e-5);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_round_trip_identity(annual in 0.0..=1.0_f64, mpy in 1u32..=365) {
                let mpy = f64::from(mpy);
                let step = annual_to_step(annual, mpy);
                prop_assert!((0.0..=1.0).contains(&step));
                prop_assert!((step_to_annual(step, mpy) - annual).abs() < 1e-9);
            }

            #[test]
            fn test_clamp_bounds(value in -1e6..1e6_f64) {
                let clamped = clamp_probability(value);
                prop_assert!((0.0..=1.0).contains(&clamped));
                if (0.0..=1.0).contains(&value) {
                    prop_assert_eq!(clamped, value);
                }
            }
        }
    }
}
