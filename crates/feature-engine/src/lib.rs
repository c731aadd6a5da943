//! Feature Engineering Engine
//!
//! Turns voxel neighborhoods fetched around query points into feature
//! records suitable for building rows of a tabular dataset.

mod config;
mod error;
mod features;
mod neighborhood;
mod statistics;

pub use config::NeighborhoodConfig;
pub use error::FeatureError;
pub use features::{FeatureRecord, FeatureTransform};
pub use neighborhood::NeighborhoodFeatures;
pub use statistics::{IntensityStatistics, Moments, STATS_LABEL};
