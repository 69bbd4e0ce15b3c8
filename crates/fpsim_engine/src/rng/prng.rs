//! Pseudo-random number generator wrapper for trial backends.
//!
//! This module provides [`FpRng`], a seedable PRNG wrapper with in-place
//! reseeding and batch uniform generation.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Random number generator owned by a single trial backend.
///
/// Wraps `rand::rngs::StdRng`. The generator algorithm is fixed for a given
/// `rand` release, so a seed reproduces the same stream on every platform.
///
/// Implements [`RngCore`], so `rand_distr` distributions can sample from it
/// directly.
///
/// # Examples
///
/// ```rust
/// use fpsim_engine::rng::FpRng;
///
/// let mut rng = FpRng::from_seed(42);
/// assert_eq!(rng.seed(), Some(42));
///
/// let mut buffer = vec![0.0; 100];
/// rng.fill_uniform(&mut buffer);
/// assert!(buffer.iter().all(|u| (0.0..1.0).contains(u)));
/// ```
#[derive(Clone, Debug)]
pub struct FpRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// Seed of the current stream; `None` when initialised from OS entropy.
    seed: Option<u64>,
}

impl FpRng {
    /// Creates a generator initialised with the given seed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fpsim_engine::rng::FpRng;
    ///
    /// let mut rng1 = FpRng::from_seed(7);
    /// let mut rng2 = FpRng::from_seed(7);
    /// assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Creates an unseeded generator from operating-system entropy.
    ///
    /// Streams from this generator are not reproducible until
    /// [`FpRng::reseed`] is called.
    #[inline]
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Restarts the stream from `seed`, discarding the current state.
    #[inline]
    pub fn reseed(&mut self, seed: u64) {
        self.inner = StdRng::seed_from_u64(seed);
        self.seed = Some(seed);
    }

    /// Returns the seed of the current stream, if it was seeded.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generates a single uniform random value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Fills the buffer with uniform random values in [0, 1).
    ///
    /// Consumes exactly one value per element, in order, so the buffer holds
    /// the same values as `buffer.len()` calls to [`FpRng::gen_uniform`].
    /// Empty buffers are a no-op.
    #[inline]
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.inner.gen();
        }
    }
}

impl RngCore for FpRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
