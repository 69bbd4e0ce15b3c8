//! # Random Number Generation Infrastructure
//!
//! Every trial backend owns one [`FpRng`]. The wrapper exists so that the
//! generator algorithm, the seeding rule and the record of the last seed sit
//! in one place, and so that a backend can be reseeded in place without
//! being rebuilt.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: a seeded generator always yields the same stream
//! - **Efficiency**: batch uniforms go into caller-provided `&mut [f64]` slices
//! - **Isolation**: no generator is ever shared between backends or threads
//!
//! ## Usage Example
//!
//! ```rust
//! use fpsim_engine::rng::FpRng;
//!
//! let mut rng = FpRng::from_seed(12345);
//! let u = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! rng.reseed(12345);
//! assert_eq!(rng.gen_uniform(), u);
//! ```

mod prng;

pub use prng::FpRng;

#[cfg(test)]
mod tests;
