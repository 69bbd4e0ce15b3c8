//! Age-indexed calibration curves.
//!
//! Calibration data (mortality by age, fecundity by age, sexual activity and
//! miscarriage rates) arrives as a flat sequence sampled `resolution` times
//! per year of age. The value for age `a` sits at position
//! `round(a × resolution)`, rounded half to even.
//!
//! The slice-based [`lookup`] is what the rate functions use; callers that
//! want the resolution carried alongside the data use [`AgeIndexedCurve`].
//!
//! # Panics
//!
//! An age that maps outside the curve is a configuration bug on the caller's
//! side. Lookups panic instead of returning a default, so a mis-sized table
//! cannot silently skew simulation results.

use crate::conversion::clamp_probability;
use crate::error::CurveError;
use crate::rates;

/// Maps an age to its position on a curve sampled `resolution` times per year.
///
/// # Panics
/// Panics if `age × resolution` is negative or not finite.
///
/// # Examples
/// ```
/// use fpsim_core::age_index;
///
/// assert_eq!(age_index(30.0, 1.0), 30);
/// assert_eq!(age_index(30.04, 10.0), 300);
/// assert_eq!(age_index(30.06, 10.0), 301);
/// // Ties round to the even neighbour.
/// assert_eq!(age_index(30.5, 1.0), 30);
/// assert_eq!(age_index(31.5, 1.0), 32);
/// ```
#[inline]
pub fn age_index(age: f64, resolution: f64) -> usize {
    let position = (age * resolution).round_ties_even();
    assert!(
        position.is_finite() && position >= 0.0,
        "age {age} at resolution {resolution} maps to invalid curve position {position}"
    );
    position as usize
}

/// Looks up the curve value for `age`.
///
/// # Panics
/// Panics if the derived index is outside `curve`.
///
/// # Examples
/// ```
/// use fpsim_core::lookup;
///
/// let curve = [0.1, 0.2, 0.3];
/// assert_eq!(lookup(&curve, 2.0, 1.0), 0.3);
/// assert_eq!(lookup(&curve, 0.1, 10.0), 0.2);
/// ```
#[inline]
pub fn lookup(curve: &[f64], age: f64, resolution: f64) -> f64 {
    let index = age_index(age, resolution);
    match curve.get(index) {
        Some(&value) => value,
        None => panic!(
            "age {age} at resolution {resolution} maps to index {index}, outside curve of length {}",
            curve.len()
        ),
    }
}

/// A calibration curve together with its sampling resolution.
///
/// Immutable after construction. The checked constructor rejects empty
/// curves, non-finite values and non-positive resolutions; it does not
/// require values inside [0, 1], because trend-scaled or fecundity-scaled
/// rates may legitimately leave that range before clamping.
///
/// # Examples
/// ```
/// use fpsim_core::AgeIndexedCurve;
///
/// let mortality = AgeIndexedCurve::new(vec![0.01; 101], 1.0).unwrap();
/// assert_eq!(mortality.len(), 101);
/// assert_eq!(mortality.at_age(40.2), 0.01);
///
/// let monthly = mortality.mortality_step_probability(1.0, 30.0, 12.0);
/// assert!((monthly - 0.000837).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCurve"))]
pub struct AgeIndexedCurve {
    values: Vec<f64>,
    resolution: f64,
}

/// Unchecked wire form; deserialisation goes through [`AgeIndexedCurve::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCurve {
    values: Vec<f64>,
    resolution: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCurve> for AgeIndexedCurve {
    type Error = CurveError;

    fn try_from(raw: RawCurve) -> Result<Self, Self::Error> {
        Self::new(raw.values, raw.resolution)
    }
}

impl AgeIndexedCurve {
    /// Creates a curve sampled `resolution` times per year of age.
    ///
    /// # Errors
    ///
    /// Returns `CurveError` if:
    /// - `values` is empty
    /// - any value is NaN or infinite
    /// - `resolution` is not a positive finite number
    pub fn new(values: Vec<f64>, resolution: f64) -> Result<Self, CurveError> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(CurveError::InvalidResolution { resolution });
        }
        if values.is_empty() {
            return Err(CurveError::Empty);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CurveError::NonFiniteValue { index, value });
        }
        Ok(Self { values, resolution })
    }

    /// Creates a curve with one value per year of age.
    ///
    /// # Errors
    ///
    /// Same conditions as [`AgeIndexedCurve::new`].
    #[inline]
    pub fn annual(values: Vec<f64>) -> Result<Self, CurveError> {
        Self::new(values, 1.0)
    }

    /// Returns the curve values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of bins per year of age.
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns the number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; construction rejects empty curves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Oldest age whose index is still on the curve.
    #[inline]
    pub fn max_age(&self) -> f64 {
        (self.values.len() - 1) as f64 / self.resolution
    }

    /// Position of `age` on this curve.
    ///
    /// # Panics
    /// Panics under the same conditions as [`age_index`].
    #[inline]
    pub fn index_for(&self, age: f64) -> usize {
        age_index(age, self.resolution)
    }

    /// Value of the curve at `age`.
    ///
    /// # Panics
    /// Panics if `age` falls outside the curve.
    #[inline]
    pub fn at_age(&self, age: f64) -> f64 {
        lookup(&self.values, age, self.resolution)
    }

    /// Returns a copy with every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            values: self.values.iter().map(|v| v * factor).collect(),
            resolution: self.resolution,
        }
    }

    /// Returns a copy with every value clamped into [0, 1].
    pub fn clamped(&self) -> Self {
        Self {
            values: self.values.iter().map(|&v| clamp_probability(v)).collect(),
            resolution: self.resolution,
        }
    }

    /// Per-step death probability at `age` for this mortality curve.
    ///
    /// See [`rates::mortality_step_probability`].
    #[inline]
    pub fn mortality_step_probability(&self, trend: f64, age: f64, mpy: f64) -> f64 {
        rates::mortality_step_probability(&self.values, trend, age, self.resolution, mpy)
    }

    /// Per-step conception probability at `age` for this fecundity curve.
    ///
    /// See [`rates::pregnancy_step_probability`].
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn pregnancy_step_probability(
        &self,
        personal_fecundity: f64,
        age: f64,
        method_efficacy: f64,
        lam: bool,
        lam_efficacy: f64,
        mpy: f64,
    ) -> f64 {
        rates::pregnancy_step_probability(
            &self.values,
            personal_fecundity,
            age,
            self.resolution,
            method_efficacy,
            lam,
            lam_efficacy,
            mpy,
        )
    }
}

impl AsRef<[f64]> for AgeIndexedCurve {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
