//! # fpsim_engine: Stochastic Trials for Fertility Simulation
//!
//! ## Layer 2 (Engine) Role
//!
//! fpsim_engine draws the random outcomes of an agent-based fertility
//! simulation. It provides:
//! - Trial primitives: Bernoulli, binomial count, repeated Bernoulli and
//!   multinomial trials (`backend`, `engine`)
//! - Seed management that reaches every backend at once (`seed`)
//! - Compiled and reference backends selected at start-up (`backend`, `config`)
//! - A per-thread default engine behind free functions (`api`)
//! - Seeded, optionally parallel replicate runs (`replicate`)
//!
//! Rate conversion comes from `fpsim_core` and is re-exported here.
//!
//! ## Usage Example
//!
//! ```rust
//! use fpsim_engine::{api, Engine, EngineConfig};
//!
//! // Free functions over the thread's default engine.
//! api::set_seed(Some(1));
//! let conceived = api::bt(0.02);
//! let method = api::mt(&[0.5, 0.3, 0.2]);
//! assert!(method < 3);
//!
//! // Explicit handle for one run.
//! let mut engine = Engine::new(&EngineConfig::builder().seed(1).build());
//! assert_eq!(engine.bernoulli_trial(0.02), conceived);
//! ```
//!
//! ## Configuration
//!
//! | Variable                    | Effect                               |
//! |-----------------------------|--------------------------------------|
//! | `FPSIM_BACKEND`             | `compiled` (default) or `reference`  |
//! | `FPSIM_SEED`                | Run seed                             |
//! | `FPSIM_PARALLEL_REPLICATES` | Spread replicates over rayon threads |
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `fpsim_core` curve types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod api;
pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod replicate;
pub mod rng;
pub mod seed;

pub use backend::{BackendKind, CompiledBackend, ReferenceBackend, TrialBackend};
pub use config::{build_config, EngineConfig, EngineConfigBuilder};
pub use engine::Engine;
pub use error::ConfigError;
pub use replicate::{run_replicates, ReplicateSeeds};
pub use seed::SeedManager;

pub use fpsim_core::{
    activity_probability, annual_to_step, clamp_probability, miscarriage_probability,
    mortality_step_probability, pregnancy_step_probability, step_to_annual, AgeIndexedCurve,
    CurveError,
};
