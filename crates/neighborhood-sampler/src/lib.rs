//! Neighborhood Sampler
//!
//! Composes a [`VolumeSource`] with any [`FeatureTransform`]: fetches the
//! neighborhood around each query point, converts it, and collects the
//! results as labeled rows of a feature table.

mod config;
mod sampler;
mod table;

pub use crate::config::SamplerConfig;
pub use sampler::NeighborhoodSampler;
pub use table::{FeatureRow, FeatureTable, SampleLabel};

pub use feature_engine::{FeatureRecord, FeatureTransform};
pub use volume_source::VolumeSource;

use std::str::FromStr;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use volume_source::VolumeError;

/// Sampler error types
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("Volume fetch failed: {0}")]
    Volume(#[from] VolumeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Table encoding failed: {0}")]
    Encode(#[from] postcard::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Initialize logging from the sampler configuration
pub fn init_logging(config: &SamplerConfig) -> Result<(), SamplerError> {
    let level = Level::from_str(&config.log_level).map_err(|_| {
        SamplerError::Logging(format!("invalid log level {:?}", config.log_level))
    })?;

    let result = if config.log_json {
        let subscriber = FmtSubscriber::builder()
            .json()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    result.map_err(|e| SamplerError::Logging(e.to_string()))
}
