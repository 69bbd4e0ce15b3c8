//! Error types for engine configuration.
//!
//! Trial preconditions are not represented here: a bad probability or an
//! empty weight vector is a programmer error and panics at the call site.

use thiserror::Error;

/// Configuration error for the engine.
///
/// These errors occur while building an [`EngineConfig`](crate::EngineConfig)
/// from text, files or environment variables.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown backend name.
    #[error("Invalid backend: {0}. Must be one of: compiled, reference")]
    InvalidBackend(String),

    /// Seed text that is not an unsigned 64-bit integer.
    #[error("Invalid seed: {0}. Must be an unsigned 64-bit integer")]
    InvalidSeed(String),

    /// Replicate count outside the supported range.
    #[error("Invalid replicate count {0}: must be at least 1")]
    InvalidReplicateCount(usize),

    /// Boolean flag that could not be parsed.
    #[error("Invalid value '{value}' for {name}: expected true or false")]
    InvalidFlag {
        /// Setting name.
        name: &'static str,
        /// Raw value.
        value: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),
}
