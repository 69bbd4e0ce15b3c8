//! Engine configuration.
//!
//! Selects the active backend, the run seed and whether replicates run in
//! parallel. Configuration can be assembled in code with the builder, read
//! from a TOML file, or taken from environment variables:
//!
//! | Variable                    | Field                 | Example     |
//! |-----------------------------|-----------------------|-------------|
//! | `FPSIM_BACKEND`             | `backend`             | `reference` |
//! | `FPSIM_SEED`                | `seed`                | `42`        |
//! | `FPSIM_PARALLEL_REPLICATES` | `parallel_replicates` | `false`     |
//!
//! ```toml
//! backend = "compiled"
//! seed = 42
//! parallel_replicates = true
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::backend::BackendKind;
use crate::error::ConfigError;

/// Environment variable selecting the backend.
pub const ENV_BACKEND: &str = "FPSIM_BACKEND";
/// Environment variable holding the run seed.
pub const ENV_SEED: &str = "FPSIM_SEED";
/// Environment variable toggling parallel replicates.
pub const ENV_PARALLEL_REPLICATES: &str = "FPSIM_PARALLEL_REPLICATES";

/// Engine configuration.
///
/// # Examples
///
/// ```rust
/// use fpsim_engine::{BackendKind, EngineConfig};
///
/// let config = EngineConfig::builder()
///     .backend(BackendKind::Reference)
///     .seed(42)
///     .build();
///
/// assert_eq!(config.backend(), BackendKind::Reference);
/// assert_eq!(config.seed(), Some(42));
/// assert!(config.parallel_replicates());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Backend serving trials and rate kernels.
    backend: BackendKind,
    /// Run seed; `None` leaves the generators entropy-seeded.
    seed: Option<u64>,
    /// Whether replicates are spread across the rayon thread pool.
    parallel_replicates: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Compiled,
            seed: None,
            parallel_replicates: true,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Returns the active backend.
    #[inline]
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Returns the run seed, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns whether replicates run in parallel.
    #[inline]
    pub fn parallel_replicates(&self) -> bool {
        self.parallel_replicates
    }

    /// Loads configuration from environment variables over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// Missing keys keep their defaults; unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileError` if the text is not valid configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Applies every override that `lookup` returns a value for.
    ///
    /// `lookup` maps an environment variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for the first unparseable value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup(ENV_BACKEND) {
            self.backend = BackendKind::from_str(&backend)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(parse_seed(&seed)?);
        }
        if let Some(flag) = lookup(ENV_PARALLEL_REPLICATES) {
            self.parallel_replicates = parse_flag(ENV_PARALLEL_REPLICATES, &flag)?;
        }
        Ok(())
    }
}

/// Builder for [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Sets the active backend.
    #[inline]
    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.config.backend = backend;
        self
    }

    /// Sets the run seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Sets or clears the run seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// Enables or disables parallel replicates.
    #[inline]
    pub fn parallel_replicates(mut self, parallel: bool) -> Self {
        self.config.parallel_replicates = parallel;
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

/// Build configuration from all sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables
/// 2. Config file
/// 3. Default values
///
/// # Errors
///
/// Returns `ConfigError` if the file or any environment variable is invalid.
pub fn build_config(file: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let mut config = match file {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    config.apply_overrides(|name| std::env::var(name).ok())?;
    Ok(config)
}

fn parse_seed(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeed(value.to_string()))
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
