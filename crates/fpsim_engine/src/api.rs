//! Free-function interface over a per-thread default engine.
//!
//! Simulation code calls these once per agent per time step. Each thread owns
//! an independent [`Engine`], created from [`EngineConfig::default`] on first
//! use; [`configure`] replaces it and [`set_seed`] reseeds it. Code that runs
//! replicates side by side should hold explicit engines instead (see
//! [`run_replicates`](crate::run_replicates)).
//!
//! The short names `bt`, `bc`, `rbt` and `mt` are aliases for the long ones.
//!
//! # Examples
//!
//! ```rust
//! use fpsim_engine::api;
//!
//! api::set_seed(Some(42));
//! let first = (api::bt(0.5), api::bc(0.3, 10), api::mt(&[0.2, 0.8]));
//!
//! api::set_seed(Some(42));
//! assert_eq!(first, (api::bt(0.5), api::bc(0.3, 10), api::mt(&[0.2, 0.8])));
//! ```

use std::cell::RefCell;

use crate::backend::BackendKind;
use crate::config::EngineConfig;
use crate::engine::Engine;

thread_local! {
    static DEFAULT_ENGINE: RefCell<Engine> = RefCell::new(Engine::default());
}

/// Runs `f` with exclusive access to this thread's default engine.
///
/// # Panics
/// Panics if called re-entrantly from inside `f`.
pub fn with_default_engine<R>(f: impl FnOnce(&mut Engine) -> R) -> R {
    DEFAULT_ENGINE.with(|engine| f(&mut engine.borrow_mut()))
}

/// Replaces this thread's default engine with one built from `config`.
pub fn configure(config: &EngineConfig) {
    let engine = Engine::new(config);
    with_default_engine(|current| *current = engine);
}

/// Reseeds every backend of this thread's default engine.
///
/// `None` is a no-op: the current streams continue.
///
/// Only the calling thread is affected. Default engines on other threads keep
/// their own streams, entropy-seeded unless those threads call `set_seed`
/// themselves; use [`run_replicates`](crate::run_replicates) or explicit
/// [`Engine`]s to seed work spread over threads.
pub fn set_seed(seed: Option<u64>) {
    with_default_engine(|engine| engine.set_seed(seed));
}

/// Switches the backend of this thread's default engine.
pub fn set_backend(kind: BackendKind) {
    with_default_engine(|engine| engine.set_backend(kind));
}

/// One Bernoulli trial: `true` iff a uniform draw is below `prob`.
#[inline]
pub fn bernoulli_trial(prob: f64) -> bool {
    with_default_engine(|engine| engine.bernoulli_trial(prob))
}

/// Number of successes in `repeats` Bernoulli(`prob`) trials.
///
/// # Panics
/// Panics if `prob` is outside [0, 1] or NaN.
#[inline]
pub fn binomial_count(prob: f64, repeats: u64) -> u64 {
    with_default_engine(|engine| engine.binomial_count(prob, repeats))
}

/// Whether at least one of `repeats` Bernoulli(`prob`) trials succeeds.
///
/// # Panics
/// Panics if `prob` is outside [0, 1] or NaN.
#[inline]
pub fn repeated_bernoulli_trial(prob: f64, repeats: u64) -> bool {
    with_default_engine(|engine| engine.repeated_bernoulli_trial(prob, repeats))
}

/// Category index drawn with probability proportional to `probs`.
///
/// # Panics
/// Panics if `probs` is empty.
#[inline]
pub fn multinomial_trial(probs: &[f64]) -> usize {
    with_default_engine(|engine| engine.multinomial_trial(probs))
}

/// Alias for [`bernoulli_trial`].
#[inline]
pub fn bt(prob: f64) -> bool {
    bernoulli_trial(prob)
}

/// Alias for [`binomial_count`].
#[inline]
pub fn bc(prob: f64, repeats: u64) -> u64 {
    binomial_count(prob, repeats)
}

/// Alias for [`repeated_bernoulli_trial`].
#[inline]
pub fn rbt(prob: f64, repeats: u64) -> bool {
    repeated_bernoulli_trial(prob, repeats)
}

/// Alias for [`multinomial_trial`].
#[inline]
pub fn mt(probs: &[f64]) -> usize {
    multinomial_trial(probs)
}

/// Per-step death probability from the default engine's backend kernel.
///
/// # Panics
/// Panics if `age` falls outside `curve`.
#[inline]
pub fn mortality_step_probability(
    curve: &[f64],
    trend: f64,
    age: f64,
    resolution: f64,
    mpy: f64,
) -> f64 {
    with_default_engine(|engine| {
        engine.mortality_step_probability(curve, trend, age, resolution, mpy)
    })
}

/// Per-step conception probability from the default engine's backend kernel.
///
/// # Panics
/// Panics if `age` falls outside `curve`.
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
    with_default_engine(|engine| {
        engine.pregnancy_step_probability(
            curve,
            personal_fecundity,
            age,
            resolution,
            method_efficacy,
            lam,
            lam_efficacy,
            mpy,
        )
    })
}

/// Probability that an agent of `age` is sexually active.
#[inline]
pub fn activity_probability(curve: &[f64], age: f64, resolution: f64) -> f64 {
    fpsim_core::activity_probability(curve, age, resolution)
}

/// Probability that a pregnancy at `age` ends in miscarriage.
#[inline]
pub fn miscarriage_probability(curve: &[f64], age: f64, resolution: f64) -> f64 {
    fpsim_core::miscarriage_probability(curve, age, resolution)
}
