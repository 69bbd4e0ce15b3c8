//! # fpsim_core: Rate Conversion for Fertility Simulation
//!
//! ## Layer 1 (Foundation) Role
//!
//! fpsim_core is the bottom layer of the engine. It turns population-level
//! annual rates, tabulated by age, into per-step probabilities for one agent:
//! - Age lookup on calibration curves (`curve`)
//! - Probability clamping and annual/step conversion (`conversion`)
//! - Mortality, pregnancy, sexual-activity and miscarriage rates (`rates`)
//! - Error types for curve construction (`error`)
//!
//! No function in this crate draws random numbers. Sampling lives in
//! `fpsim_engine`, which composes these rates with its trial primitives.
//!
//! ## Usage Example
//!
//! ```rust
//! use fpsim_core::rates::{mortality_step_probability, pregnancy_step_probability};
//!
//! let mortality = vec![0.01; 200];
//! let monthly = mortality_step_probability(&mortality, 1.0, 30.0, 1.0, 12.0);
//! assert!((monthly - 0.000837).abs() < 1e-6);
//!
//! let fecundity = vec![0.3; 200];
//! let monthly = pregnancy_step_probability(&fecundity, 1.0, 30.0, 1.0, 0.0, true, 0.95, 12.0);
//! assert!((monthly - 0.001258).abs() < 1e-6);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for [`AgeIndexedCurve`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod conversion;
pub mod curve;
pub mod error;
pub mod rates;

pub use conversion::{annual_to_step, clamp_probability, median_of_three, step_to_annual};
pub use curve::{age_index, lookup, AgeIndexedCurve};
pub use error::CurveError;
pub use rates::{
    activity_probability, miscarriage_probability, mortality_step_probability,
    pregnancy_step_probability,
};
