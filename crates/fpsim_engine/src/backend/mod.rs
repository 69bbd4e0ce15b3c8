//! Trial backends.
//!
//! A backend is a random stream plus the sampling algorithms that draw from
//! it. Two implementations exist with identical semantics:
//!
//! | Backend             | Binomial count              | Multinomial search     | Rate kernels     |
//! |---------------------|-----------------------------|------------------------|------------------|
//! | [`CompiledBackend`] | `rand_distr::Binomial`      | binary search, cached  | `fpsim_core`     |
//! | [`ReferenceBackend`]| one uniform per repeat      | linear scan            | `rates::reference` |
//!
//! The compiled backend is the production inner-loop path. The reference
//! backend spells every algorithm out literally and exists to cross-check
//! the compiled one; [`BackendKind`] selects between them at start-up.
//!
//! Single Bernoulli trials and multinomial trials consume exactly one
//! uniform on both backends, so identically seeded backends return the same
//! outcomes for them. Binomial counts follow the same distribution but
//! consume the stream differently.
//!
//! # Preconditions
//!
//! Trials panic on programmer errors instead of recovering:
//! - binomial probabilities outside [0, 1] or NaN
//! - empty category weights
//!
//! A Bernoulli probability outside [0, 1] is not an error: it is always
//! (≥ 1) or never (≤ 0) a success.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

mod compiled;
mod reference;

pub use compiled::CompiledBackend;
pub use reference::ReferenceBackend;


/// Selects which backend serves trials and rate lookups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Accelerated path for per-agent, per-step invocation.
    #[default]
    Compiled,
    /// Literal implementation used to verify the compiled path.
    Reference,
}

impl BackendKind {
    /// All backends, in registration order.
    pub const ALL: [BackendKind; 2] = [BackendKind::Compiled, BackendKind::Reference];

    /// Configuration name of the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Compiled => "compiled",
            BackendKind::Reference => "reference",
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compiled" | "fast" => Ok(BackendKind::Compiled),
            "reference" | "ref" => Ok(BackendKind::Reference),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for BackendKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BackendKind::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Sampling operations shared by every backend.
///
/// Implementors own their random stream. The [`SeedManager`](crate::SeedManager)
/// reseeds every registered backend together through [`TrialBackend::reseed`].
///
/// Rate conversion is part of the trait so that the configured backend also
/// decides which kernel formulation computes the probabilities fed to the
/// trials. The default methods use the fast kernels from `fpsim_core`.
pub trait TrialBackend {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Restarts the random stream from `seed`.
    fn reseed(&mut self, seed: u64);

    /// Seed of the current stream, if seeded.
    fn seed(&self) -> Option<u64>;

    /// Draws one uniform variate in [0, 1).
    fn uniform(&mut self) -> f64;

    /// One Bernoulli trial: `true` iff a uniform draw is below `prob`.
    #[inline]
    fn bernoulli(&mut self, prob: f64) -> bool {
        self.uniform() < prob
    }

    /// Number of successes in `repeats` independent Bernoulli(`prob`) trials.
    ///
    /// # Panics
    /// Panics if `prob` is outside [0, 1] or NaN, or if `repeats` exceeds
    /// [`MAX_REPEATS`].
    fn binomial(&mut self, prob: f64, repeats: u64) -> u64;

    /// Whether at least one of `repeats` Bernoulli(`prob`) trials succeeds.
    ///
    /// Always drawn as `binomial(prob, repeats) > 0`.
    ///
    /// # Panics
    /// Panics if `prob` is outside [0, 1] or NaN.
    #[inline]
    fn repeated_bernoulli(&mut self, prob: f64, repeats: u64) -> bool {
        self.binomial(prob, repeats) > 0
    }

    /// Draws one category index with probability proportional to `probs`.
    ///
    /// A uniform draw `u × Σprobs` selects the first category whose
    /// cumulative weight is strictly greater than the draw. Zero-weight
    /// categories are therefore never chosen, so `[0, 0, 1]` always yields
    /// the last index. If no cumulative weight exceeds the draw (all weights
    /// zero) the last index is returned.
    ///
    /// # Panics
    /// Panics if `probs` is empty.
    fn multinomial(&mut self, probs: &[f64]) -> usize;

    /// One Bernoulli trial per element of `probs`, written to `out`.
    ///
    /// # Panics
    /// Panics if `probs` and `out` differ in length.
    fn fill_bernoulli(&mut self, probs: &[f64], out: &mut [bool]) {
        assert_same_length(probs.len(), out.len());
        for (outcome, &prob) in out.iter_mut().zip(probs) {
            *outcome = self.bernoulli(prob);
        }
    }

    /// Number of successes across one Bernoulli trial per element of `probs`.
    fn count_bernoulli(&mut self, probs: &[f64]) -> usize {
        probs.iter().filter(|&&prob| self.bernoulli(prob)).count()
    }

    /// Per-step death probability; see [`fpsim_core::mortality_step_probability`].
    #[inline]
    fn mortality_step_probability(
        &self,
        curve: &[f64],
        trend: f64,
        age: f64,
        resolution: f64,
        mpy: f64,
    ) -> f64 {
        fpsim_core::mortality_step_probability(curve, trend, age, resolution, mpy)
    }

    /// Per-step conception probability; see [`fpsim_core::pregnancy_step_probability`].
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn pregnancy_step_probability(
        &self,
        curve: &[f64],
        personal_fecundity: f64,
        age: f64,
        resolution: f64,
        method_efficacy: f64,
        lam: bool,
        lam_efficacy: f64,
        mpy: f64,
    ) -> f64 {
        fpsim_core::pregnancy_step_probability(
            curve,
            personal_fecundity,
            age,
            resolution,
            method_efficacy,
            lam,
            lam_efficacy,
            mpy,
        )
    }
}

/// Largest trial count a binomial draw accepts (`i64::MAX`).
pub const MAX_REPEATS: u64 = i64::MAX as u64;

/// Panics if `repeats` exceeds [`MAX_REPEATS`].
#[inline]
pub(crate) fn assert_repeats(repeats: u64, operation: &str) {
    assert!(
        repeats <= MAX_REPEATS,
        "{operation}: {repeats} repeats exceeds the maximum of {MAX_REPEATS}"
    );
}

/// Panics unless `prob` is a valid binomial success probability.
#[inline]
pub(crate) fn assert_probability(prob: f64, operation: &str) {
    assert!(
        (0.0..=1.0).contains(&prob),
        "{operation}: probability {prob} outside [0, 1]"
    );
}

/// Panics if the category weights are empty.
#[inline]
pub(crate) fn assert_categories(probs: &[f64]) {
    assert!(
        !probs.is_empty(),
        "multinomial trial: category weights must not be empty"
    );
}

#[inline]
fn assert_same_length(probs: usize, out: usize) {
    assert_eq!(
        probs, out,
        "batched trial: {probs} probabilities but {out} output slots"
    );
}
