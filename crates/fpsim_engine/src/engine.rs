//! Engine handle: the active backend plus the seed manager that owns it.
//!
//! An [`Engine`] is the explicit generator handle a replicate carries. Trials
//! dispatch statically on the active [`BackendKind`]; switching the backend
//! never touches seeding, because every backend was seeded together.

use tracing::{debug, info};

use crate::backend::{BackendKind, TrialBackend};
use crate::config::EngineConfig;
use crate::seed::SeedManager;

/// Routes a call to the active backend without dynamic dispatch.
macro_rules! dispatch {
    ($engine:expr, $backend:ident => $call:expr) => {
        match $engine.kind {
            BackendKind::Compiled => {
                let $backend = $engine.seeds.compiled_mut();
                $call
            }
            BackendKind::Reference => {
                let $backend = $engine.seeds.reference_mut();
                $call
            }
        }
    };
}

/// Trial and rate-conversion handle for one simulation run or replicate.
///
/// # Examples
///
/// ```rust
/// use fpsim_engine::{Engine, EngineConfig};
///
/// let mut engine = Engine::new(&EngineConfig::builder().seed(42).build());
///
/// let mortality = vec![0.01; 120];
/// let monthly = engine.mortality_step_probability(&mortality, 1.0, 30.0, 1.0, 12.0);
/// let died = engine.bernoulli_trial(monthly);
///
/// engine.set_seed(Some(42));
/// assert_eq!(engine.bernoulli_trial(monthly), died);
/// ```
#[derive(Clone, Debug)]
pub struct Engine {
    kind: BackendKind,
    seeds: SeedManager,
}

impl Engine {
    /// Creates an engine from configuration.
    pub fn new(config: &EngineConfig) -> Self {
        info!(backend = %config.backend(), seed = ?config.seed(), "initialising engine");
        Self {
            kind: config.backend(),
            seeds: SeedManager::new(config.seed()),
        }
    }

    /// Creates a compiled-backend engine seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            kind: BackendKind::Compiled,
            seeds: SeedManager::from_seed(seed),
        }
    }

    /// Reseeds every backend; `None` is a no-op.
    #[inline]
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seeds.set_seed(seed);
    }

    /// Seed most recently applied, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seeds.seed()
    }

    /// Returns the active backend.
    #[inline]
    pub fn backend(&self) -> BackendKind {
        self.kind
    }

    /// Switches the active backend.
    ///
    /// Each backend keeps its own stream position; switching does not reseed.
    pub fn set_backend(&mut self, kind: BackendKind) {
        if kind != self.kind {
            debug!(from = %self.kind, to = %kind, "switching trial backend");
            self.kind = kind;
        }
    }

    /// Seed manager owning the backends.
    #[inline]
    pub fn seed_manager(&self) -> &SeedManager {
        &self.seeds
    }

    /// One Bernoulli trial: `true` iff a uniform draw is below `prob`.
    ///
    /// `prob ≥ 1` always succeeds and `prob ≤ 0` never does.
    #[inline]
    pub fn bernoulli_trial(&mut self, prob: f64) -> bool {
        dispatch!(self, backend => backend.bernoulli(prob))
    }

    /// Successes in `repeats` independent Bernoulli(`prob`) trials.
    ///
    /// # Panics
    /// Panics if `prob` is outside [0, 1] or NaN.
    #[inline]
    pub fn binomial_count(&mut self, prob: f64, repeats: u64) -> u64 {
        dispatch!(self, backend => backend.binomial(prob, repeats))
    }

    /// Whether at least one of `repeats` Bernoulli(`prob`) trials succeeds.
    ///
    /// # Panics
    /// Panics if `prob` is outside [0, 1] or NaN.
    #[inline]
    pub fn repeated_bernoulli_trial(&mut self, prob: f64, repeats: u64) -> bool {
        dispatch!(self, backend => backend.repeated_bernoulli(prob, repeats))
    }

    /// Category index drawn with probability proportional to `probs`.
    ///
    /// # Panics
    /// Panics if `probs` is empty.
    #[inline]
    pub fn multinomial_trial(&mut self, probs: &[f64]) -> usize {
        dispatch!(self, backend => backend.multinomial(probs))
    }

    /// One Bernoulli trial per agent, written to `out`.
    ///
    /// # Panics
    /// Panics if `probs` and `out` differ in length.
    #[inline]
    pub fn fill_bernoulli(&mut self, probs: &[f64], out: &mut [bool]) {
        dispatch!(self, backend => backend.fill_bernoulli(probs, out))
    }

    /// Number of agents whose Bernoulli trial succeeds.
    #[inline]
    pub fn count_bernoulli(&mut self, probs: &[f64]) -> usize {
        dispatch!(self, backend => backend.count_bernoulli(probs))
    }

    /// Per-step death probability using the active backend's kernel.
    ///
    /// # Panics
    /// Panics if `age` falls outside `curve`.
    #[inline]
    pub fn mortality_step_probability(
        &self,
        curve: &[f64],
        trend: f64,
        age: f64,
        resolution: f64,
        mpy: f64,
    ) -> f64 {
        self.seeds
            .backend(self.kind)
            .mortality_step_probability(curve, trend, age, resolution, mpy)
    }

    /// Per-step conception probability using the active backend's kernel.
    ///
    /// # Panics
    /// Panics if `age` falls outside `curve`.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn pregnancy_step_probability(
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
        self.seeds.backend(self.kind).pregnancy_step_probability(
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

    /// Probability that an agent of `age` is sexually active.
    ///
    /// # Panics
    /// Panics if `age` falls outside `curve`.
    #[inline]
    pub fn activity_probability(&self, curve: &[f64], age: f64, resolution: f64) -> f64 {
        fpsim_core::activity_probability(curve, age, resolution)
    }

    /// Probability that a pregnancy at `age` ends in miscarriage.
    ///
    /// # Panics
    /// Panics if `age` falls outside `curve`.
    #[inline]
    pub fn miscarriage_probability(&self, curve: &[f64], age: f64, resolution: f64) -> f64 {
        fpsim_core::miscarriage_probability(curve, age, resolution)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
