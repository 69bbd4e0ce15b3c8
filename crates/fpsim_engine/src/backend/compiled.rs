//! Accelerated trial backend.

use rand_distr::{Binomial, Distribution};

use super::{assert_categories, assert_probability, assert_repeats, BackendKind, TrialBackend};
use crate::rng::FpRng;

/// Production backend for inner-loop trials.
///
/// - Binomial counts use `rand_distr::Binomial` (inversion for small means,
///   BTPE otherwise), so cost does not grow with `repeats`.
/// - Multinomial trials binary-search a cumulative buffer that is reused
///   across calls.
/// - Batched Bernoulli trials draw all uniforms into a reused buffer first.
///
/// # Examples
///
/// ```rust
/// use fpsim_engine::backend::{CompiledBackend, TrialBackend};
///
/// let mut backend = CompiledBackend::from_seed(42);
/// assert!(backend.bernoulli(1.0));
/// assert!(!backend.bernoulli(0.0));
/// assert!(backend.binomial(0.5, 10) <= 10);
/// assert_eq!(backend.multinomial(&[0.0, 0.0, 1.0]), 2);
/// ```
#[derive(Clone, Debug)]
pub struct CompiledBackend {
    rng: FpRng,
    /// Cumulative weights of the last multinomial trial.
    cumulative: Vec<f64>,
    /// Uniform draws for batched Bernoulli trials.
    uniforms: Vec<f64>,
}

impl CompiledBackend {
    /// Creates a backend whose stream starts at `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(FpRng::from_seed(seed))
    }

    /// Creates an unseeded backend from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(FpRng::from_entropy())
    }

    fn with_rng(rng: FpRng) -> Self {
        Self {
            rng,
            cumulative: Vec::new(),
            uniforms: Vec::new(),
        }
    }
}

impl TrialBackend for CompiledBackend {
    #[inline]
    fn kind(&self) -> BackendKind {
        BackendKind::Compiled
    }

    #[inline]
    fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    #[inline]
    fn seed(&self) -> Option<u64> {
        self.rng.seed()
    }

    #[inline]
    fn uniform(&mut self) -> f64 {
        self.rng.gen_uniform()
    }

    #[inline]
    fn binomial(&mut self, prob: f64, repeats: u64) -> u64 {
        assert_probability(prob, "binomial count");
        assert_repeats(repeats, "binomial count");
        match Binomial::new(repeats, prob) {
            Ok(distribution) => distribution.sample(&mut self.rng),
            Err(err) => panic!("binomial count: invalid parameters ({err})"),
        }
    }

    fn multinomial(&mut self, probs: &[f64]) -> usize {
        assert_categories(probs);

        self.cumulative.clear();
        let mut total = 0.0;
        for &weight in probs {
            total += weight;
            self.cumulative.push(total);
        }

        let draw = self.rng.gen_uniform() * total;
        // First bin whose cumulative weight exceeds the draw.
        let index = self.cumulative.partition_point(|&c| c <= draw);
        index.min(probs.len() - 1)
    }

    fn fill_bernoulli(&mut self, probs: &[f64], out: &mut [bool]) {
        super::assert_same_length(probs.len(), out.len());
        self.uniforms.resize(probs.len(), 0.0);
        self.rng.fill_uniform(&mut self.uniforms);
        for ((outcome, &prob), &u) in out.iter_mut().zip(probs).zip(&self.uniforms) {
            *outcome = u < prob;
        }
    }

    fn count_bernoulli(&mut self, probs: &[f64]) -> usize {
        self.uniforms.resize(probs.len(), 0.0);
        self.rng.fill_uniform(&mut self.uniforms);
        probs
            .iter()
            .zip(&self.uniforms)
            .filter(|(&prob, &u)| u < prob)
            .count()
    }
}
