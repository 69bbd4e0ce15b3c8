//! Seeded replicate runs.
//!
//! A replicate is one independent simulation run with its own [`Engine`].
//! Replicate seeds are derived from a master seed so that every replicate is
//! reproducible on its own and the set of results does not depend on how many
//! threads ran them.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::ConfigError;

/// Golden-ratio increment spreading consecutive replicate seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Derives one seed per replicate from a master seed.
///
/// # Examples
///
/// ```rust
/// use fpsim_engine::ReplicateSeeds;
///
/// let seeds = ReplicateSeeds::new(42);
/// assert_eq!(seeds.seed_for(0), 42);
/// assert_ne!(seeds.seed_for(1), seeds.seed_for(2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplicateSeeds {
    master_seed: u64,
}

impl ReplicateSeeds {
    /// Creates the seed sequence for `master_seed`.
    #[inline]
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// The master seed.
    #[inline]
    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Seed of replicate `index`.
    #[inline]
    pub fn seed_for(&self, index: usize) -> u64 {
        self.master_seed
            .wrapping_add((index as u64).wrapping_mul(SEED_STRIDE))
    }
}

/// Runs `replicates` independent replicates and collects their results.
///
/// Replicate `i` receives an engine on the configured backend, seeded with
/// [`ReplicateSeeds::seed_for`]`(i)` from the configured seed. Results are
/// returned in replicate order and are identical whether the replicates ran
/// in parallel or sequentially.
///
/// Without a configured seed a random master seed is drawn and the run is
/// not reproducible.
///
/// # Errors
///
/// Returns `ConfigError::InvalidReplicateCount` if `replicates` is zero.
///
/// # Examples
///
/// ```rust
/// use fpsim_engine::{run_replicates, EngineConfig};
///
/// let config = EngineConfig::builder().seed(7).build();
/// let deaths = |_: usize, engine: &mut fpsim_engine::Engine| {
///     (0..1_000).filter(|_| engine.bernoulli_trial(0.01)).count()
/// };
///
/// let first = run_replicates(&config, 4, deaths).unwrap();
/// let second = run_replicates(&config, 4, deaths).unwrap();
/// assert_eq!(first, second);
/// ```
pub fn run_replicates<T, F>(
    config: &EngineConfig,
    replicates: usize,
    f: F,
) -> Result<Vec<T>, ConfigError>
where
    T: Send,
    F: Fn(usize, &mut Engine) -> T + Sync + Send,
{
    if replicates == 0 {
        return Err(ConfigError::InvalidReplicateCount(replicates));
    }

    let master_seed = match config.seed() {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            warn!(seed, "no seed configured; replicate run is not reproducible");
            seed
        }
    };
    let seeds = ReplicateSeeds::new(master_seed);
    let backend = config.backend();

    info!(
        replicates,
        master_seed,
        %backend,
        parallel = config.parallel_replicates(),
        "running replicates"
    );

    let run_one = |index: usize| {
        let replicate = EngineConfig::builder()
            .backend(backend)
            .seed(seeds.seed_for(index))
            .build();
        let mut engine = Engine::new(&replicate);
        f(index, &mut engine)
    };

    let results = if config.parallel_replicates() {
        (0..replicates).into_par_iter().map(run_one).collect()
    } else {
        (0..replicates).map(run_one).collect()
    };
    Ok(results)
}
