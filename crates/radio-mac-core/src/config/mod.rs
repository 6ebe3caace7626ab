//! Configuration schemas.
//!
//! Configuration is deserialized from TOML files and the environment via the
//! `config` crate, resolved once at startup, and never reloaded.

pub mod features;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::features::{FeatureConfig, FeatureSet};
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides, e.g. `RADIO_MAC__FEATURES__IFS=false`.
const ENV_PREFIX: &str = "RADIO_MAC";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional MAC feature switches.
    #[serde(default)]
    pub features: FeatureConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default` with an environment-specific overlay
    /// `config/{env}` and environment variables prefixed with `RADIO_MAC`.
    /// Every source is optional.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(environment())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from one explicit file plus environment overrides.
    ///
    /// Unlike [`AppConfig::load`], the file must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let config = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(environment())
            .build()
            .map_err(|e| {
                AppError::configuration(format!(
                    "Failed to read config '{}': {e}",
                    path.display()
                ))
            })?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Resolve the configured switches against the compiled-in features.
    pub fn feature_set(&self) -> FeatureSet {
        FeatureSet::resolve(&self.features)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
