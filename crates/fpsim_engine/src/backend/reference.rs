//! Reference trial backend.

use fpsim_core::rates::reference;

use super::{assert_categories, assert_probability, assert_repeats, BackendKind, TrialBackend};
use crate::rng::FpRng;

/// Literal backend used to verify [`CompiledBackend`](super::CompiledBackend).
///
/// Every algorithm is the textbook one: a binomial count is `repeats`
/// separate uniform comparisons, a multinomial trial scans the running sum
/// from the first category, and the rate kernels come from
/// `fpsim_core::rates::reference`. Cost grows linearly with `repeats` and
/// with the number of categories.
#[derive(Clone, Debug)]
pub struct ReferenceBackend {
    rng: FpRng,
}

impl ReferenceBackend {
    /// Creates a backend whose stream starts at `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: FpRng::from_seed(seed),
        }
    }

    /// Creates an unseeded backend from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: FpRng::from_entropy(),
        }
    }
}

impl TrialBackend for ReferenceBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Reference
    }

    fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    fn seed(&self) -> Option<u64> {
        self.rng.seed()
    }

    fn uniform(&mut self) -> f64 {
        self.rng.gen_uniform()
    }

    fn binomial(&mut self, prob: f64, repeats: u64) -> u64 {
        assert_probability(prob, "binomial count");
        assert_repeats(repeats, "binomial count");
        let mut successes = 0;
        for _ in 0..repeats {
            if self.rng.gen_uniform() < prob {
                successes += 1;
            }
        }
        successes
    }

    fn multinomial(&mut self, probs: &[f64]) -> usize {
        assert_categories(probs);

        let total: f64 = probs.iter().fold(0.0, |acc, &w| acc + w);
        let draw = self.rng.gen_uniform() * total;

        let mut cumulative = 0.0;
        for (index, &weight) in probs.iter().enumerate() {
            cumulative += weight;
            if cumulative > draw {
                return index;
            }
        }
        probs.len() - 1
    }

    fn mortality_step_probability(
        &self,
        curve: &[f64],
        trend: f64,
        age: f64,
        resolution: f64,
        mpy: f64,
    ) -> f64 {
        reference::mortality_step_probability(curve, trend, age, resolution, mpy)
    }

    #[allow(clippy::too_many_arguments)]
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
        reference::pregnancy_step_probability(
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
