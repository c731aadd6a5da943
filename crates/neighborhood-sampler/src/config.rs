//! Sampler configuration

use crate::SamplerError;
use feature_engine::{NeighborhoodConfig, NeighborhoodFeatures};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `SAMPLER__NEIGHBORHOOD__URL`
pub const ENV_PREFIX: &str = "SAMPLER";

/// Sampler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Neighborhood geometry and image source
    pub neighborhood: NeighborhoodConfig,

    /// Also emit a background row displaced by `offset` for every point
    pub include_background: bool,

    /// Maximum log level (`trace`, `debug`, `info`, `warn`, `error`)
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            neighborhood: NeighborhoodConfig::default(),
            include_background: true,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl SamplerConfig {
    /// Load from an optional config file layered under `SAMPLER__*` environment variables.
    ///
    /// The file format follows the extension (`.toml`, `.json`, `.yaml`, ...).
    /// List values in the environment are comma separated:
    /// `SAMPLER__NEIGHBORHOOD__SIZE=2,2,2`.
    pub fn load(path: Option<&Path>) -> Result<Self, SamplerError> {
        Self::load_with_env(path, None)
    }

    /// Same as [`SamplerConfig::load`] but reads overrides from `env` instead
    /// of the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, SamplerError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            info!("Loading sampler configuration from {}", path.display());
            builder = builder.add_source(::config::File::from(path));
        }

        let environment = ::config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("neighborhood.size")
            .with_list_parse_key("neighborhood.offset")
            .source(env);

        let settings = builder.add_source(environment).build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Flattening transform for the configured neighborhood
    pub fn neighborhood_features(&self) -> NeighborhoodFeatures {
        NeighborhoodFeatures::from_config(self.neighborhood.clone())
    }
}
