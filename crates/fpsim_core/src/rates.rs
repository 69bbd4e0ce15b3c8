//! Rate conversion functions.
//!
//! Each function turns population-level data plus per-agent modifiers into
//! the probability that an event happens during one simulation step. The
//! result is meant to be fed to a trial primitive by the caller.
//!
//! | Event          | Source data          | Conversion                         |
//! |----------------|----------------------|------------------------------------|
//! | Death          | annual, by age       | × trend, clamp, annual → step      |
//! | Conception     | annual, by age       | × fecundity × (1 − efficacy), step |
//! | Sexual debut   | per step, by age     | lookup only                        |
//! | Miscarriage    | per step, by age     | lookup only                        |
//!
//! Only mortality clamps. The pregnancy product stays inside [0, 1] when its
//! inputs do, and it is deliberately not re-clamped.
//!
//! A NaN annual mortality rate (NaN trend or a corrupt curve value) is a
//! caller bug. Debug builds panic on it; release builds clamp it to 0, so the
//! agent never dies from it.
//!
//! The top-level functions are the fast kernels: one lookup, a handful of
//! flops, no allocation. [`reference`] holds literal formulations of the
//! same maths (median-of-three clamp, whole-curve scaling) used to check the
//! fast kernels and selected by the reference backend in `fpsim_engine`.

use crate::conversion::{annual_to_step, clamp_probability};
use crate::curve::lookup;

/// Per-step probability of death.
///
/// # Arguments
/// * `curve` - Annual mortality probability by age
/// * `trend` - Secular multiplier for the current calendar year
/// * `age` - Age in years
/// * `resolution` - Curve bins per year of age
/// * `mpy` - Steps per year
///
/// # Returns
/// `1 - (1 - clamp(curve[age] × trend))^(1/mpy)`
///
/// # Panics
/// Panics if `age` falls outside `curve`.
///
/// # Examples
/// ```
/// use fpsim_core::mortality_step_probability;
///
/// let curve = vec![0.01; 200];
/// let monthly = mortality_step_probability(&curve, 1.0, 30.0, 1.0, 12.0);
/// assert!((monthly - (1.0 - 0.99_f64.powf(1.0 / 12.0))).abs() < 1e-15);
///
/// // A trend that pushes the annual rate past 1 is clamped.
/// assert_eq!(mortality_step_probability(&curve, 150.0, 30.0, 1.0, 12.0), 1.0);
/// ```
#[inline]
pub fn mortality_step_probability(
    curve: &[f64],
    trend: f64,
    age: f64,
    resolution: f64,
    mpy: f64,
) -> f64 {
    let annual = lookup(curve, age, resolution) * trend;
    debug_assert!(
        !annual.is_nan(),
        "mortality rate at age {age} is not a number (trend {trend})"
    );
    annual_to_step(clamp_probability(annual), mpy)
}

/// Per-step probability of conception.
///
/// # Arguments
/// * `curve` - Annual fecundity by age
/// * `personal_fecundity` - Agent's multiplier on the population curve
/// * `age` - Age in years
/// * `resolution` - Curve bins per year of age
/// * `method_efficacy` - Efficacy of the agent's contraceptive method
/// * `lam` - Whether the agent is protected by lactational amenorrhea
/// * `lam_efficacy` - Efficacy of lactational amenorrhea
/// * `mpy` - Steps per year
///
/// When `lam` is set its efficacy replaces the method efficacy.
///
/// # Panics
/// Panics if `age` falls outside `curve`.
///
/// # Examples
/// ```
/// use fpsim_core::pregnancy_step_probability;
///
/// let curve = vec![0.3; 60];
/// let monthly = pregnancy_step_probability(&curve, 1.0, 25.0, 1.0, 0.0, true, 0.95, 12.0);
/// // annual = 0.05 × 0.3 = 0.015
/// assert!((monthly - 0.001258).abs() < 1e-6);
/// ```
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn pregnancy_step_probability(
    curve: &[f64],
    personal_fecundity: f64,
    age: f64,
    resolution: f64,
    method_efficacy: f64,
    lam: bool,
    lam_efficacy: f64,
    mpy: f64,
) -> f64 {
    let preg_eval = lookup(curve, age, resolution) * personal_fecundity;
    let efficacy = if lam { lam_efficacy } else { method_efficacy };
    annual_to_step((1.0 - efficacy) * preg_eval, mpy)
}

/// Probability that an agent of `age` is sexually active.
///
/// The curve is already tabulated per step, so this is a plain lookup.
///
/// # Panics
/// Panics if `age` falls outside `curve`.
#[inline]
pub fn activity_probability(curve: &[f64], age: f64, resolution: f64) -> f64 {
    lookup(curve, age, resolution)
}

/// Probability that a pregnancy at `age` ends in miscarriage.
///
/// Plain lookup; see [`activity_probability`].
///
/// # Panics
/// Panics if `age` falls outside `curve`.
#[inline]
pub fn miscarriage_probability(curve: &[f64], age: f64, resolution: f64) -> f64 {
    lookup(curve, age, resolution)
}

/// Literal formulations of the rate conversions.
///
/// These produce bit-identical results to the fast kernels for finite
/// inputs but spend more work doing it: the mortality clamp is a real median
/// of `{0, annual, 1}` and the pregnancy path scales the whole fecundity
/// curve before indexing it.
pub mod reference {
    use crate::conversion::{annual_to_step, median_of_three};
    use crate::curve::lookup;

    /// Reference form of [`super::mortality_step_probability`].
    ///
    /// # Panics
    /// Panics if `age` falls outside `curve`.
    pub fn mortality_step_probability(
        curve: &[f64],
        trend: f64,
        age: f64,
        resolution: f64,
        mpy: f64,
    ) -> f64 {
        let mortality_eval = lookup(curve, age, resolution);
        debug_assert!(
            !(mortality_eval * trend).is_nan(),
            "mortality rate at age {age} is not a number (trend {trend})"
        );
        let prob_annual = median_of_three(0.0, mortality_eval * trend, 1.0);
        annual_to_step(prob_annual, mpy)
    }

    /// Reference form of [`super::pregnancy_step_probability`].
    ///
    /// Allocates a scaled copy of `curve` on every call.
    ///
    /// # Panics
    /// Panics if `age` falls outside `curve`.
    #[allow(clippy::too_many_arguments)]
    pub fn pregnancy_step_probability(
        curve: &[f64],
        personal_fecundity: f64,
        age: f64,
        resolution: f64,
        method_efficacy: f64,
        lam: bool,
        lam_efficacy: f64,
        mpy: f64,
    ) -> f64 {
        let personal_curve: Vec<f64> = curve.iter().map(|v| v * personal_fecundity).collect();
        let preg_eval = lookup(&personal_curve, age, resolution);
        let prob_annual = if lam {
            (1.0 - lam_efficacy) * preg_eval
        } else {
            (1.0 - method_efficacy) * preg_eval
        };
        annual_to_step(prob_annual, mpy)
    }
}
