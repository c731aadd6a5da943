//! Feature Extraction Error Types

use thiserror::Error;

/// Errors during feature extraction
#[derive(Debug, Clone, Error)]
pub enum FeatureError {
    /// Raw voxel data does not form an array of the claimed shape
    #[error("Malformed image block: {0}")]
    MalformedBlock(#[from] ndarray::ShapeError),
}
