//! Seed management across every trial backend.
//!
//! Both backends carry their own random stream. Reproducibility breaks if a
//! run seeds one stream and then draws from the other, so the backends are
//! owned here and seeded together: [`SeedManager::set_seed`] is the only way
//! to reseed them, and it always reaches every registered backend.
//!
//! # Lifecycle
//!
//! 1. Construction: every backend starts from the same seed, or from OS
//!    entropy when no seed is given.
//! 2. `set_seed(Some(s))`: every backend restarts its stream from `s`.
//! 3. `set_seed(None)`: nothing changes.
//! 4. Trials advance only the active backend's stream.

use tracing::{debug, info};

use crate::backend::{BackendKind, CompiledBackend, ReferenceBackend, TrialBackend};

/// Owner of every trial backend and their shared seeding.
///
/// # Examples
///
/// ```rust
/// use fpsim_engine::{BackendKind, SeedManager};
/// use fpsim_engine::backend::TrialBackend;
///
/// let mut seeds = SeedManager::from_entropy();
/// seeds.set_seed(Some(42));
///
/// assert_eq!(seeds.seed(), Some(42));
/// assert_eq!(seeds.backend(BackendKind::Compiled).seed(), Some(42));
/// assert_eq!(seeds.backend(BackendKind::Reference).seed(), Some(42));
/// ```
#[derive(Clone, Debug)]
pub struct SeedManager {
    compiled: CompiledBackend,
    reference: ReferenceBackend,
    /// Seed most recently broadcast, if any.
    seed: Option<u64>,
    /// Number of broadcasts since construction.
    reseeds: u64,
}

impl SeedManager {
    /// Creates backends seeded from `seed`, or from OS entropy for `None`.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Creates backends that all start from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            compiled: CompiledBackend::from_seed(seed),
            reference: ReferenceBackend::from_seed(seed),
            seed: Some(seed),
            reseeds: 0,
        }
    }

    /// Creates unseeded backends from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            compiled: CompiledBackend::from_entropy(),
            reference: ReferenceBackend::from_entropy(),
            seed: None,
            reseeds: 0,
        }
    }

    /// Reseeds every registered backend.
    ///
    /// `None` is a no-op: the current streams continue unchanged.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        let Some(seed) = seed else {
            return;
        };
        for backend in self.backends_mut() {
            debug!(backend = %backend.kind(), seed, "reseeding backend");
            backend.reseed(seed);
        }
        self.seed = Some(seed);
        self.reseeds += 1;
        info!(seed, reseeds = self.reseeds, "random streams seeded");
    }

    /// Seed most recently applied, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of times [`SeedManager::set_seed`] reseeded the backends.
    #[inline]
    pub fn reseeds(&self) -> u64 {
        self.reseeds
    }

    /// Every registered backend, in [`BackendKind::ALL`] order.
    pub fn backends_mut(&mut self) -> [&mut dyn TrialBackend; 2] {
        [&mut self.compiled, &mut self.reference]
    }

    /// Shared access to one backend.
    pub fn backend(&self, kind: BackendKind) -> &dyn TrialBackend {
        match kind {
            BackendKind::Compiled => &self.compiled,
            BackendKind::Reference => &self.reference,
        }
    }

    /// The compiled backend, for statically dispatched trials.
    #[inline]
    pub fn compiled_mut(&mut self) -> &mut CompiledBackend {
        &mut self.compiled
    }

    /// The reference backend, for statically dispatched trials.
    #[inline]
    pub fn reference_mut(&mut self) -> &mut ReferenceBackend {
        &mut self.reference
    }
}
