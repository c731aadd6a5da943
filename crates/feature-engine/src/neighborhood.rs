//! Neighborhood Flattening Features

use crate::config::NeighborhoodConfig;
use crate::error::FeatureError;
use crate::features::{FeatureRecord, FeatureTransform};
use ndarray::{ArrayBase, ArrayD, ArrayViewD, Data, Dimension, IxDyn};
use tracing::debug;

/// Features made of the raw voxel intensities of a neighborhood.
///
/// The block is flattened in row-major order (last axis fastest) and stored
/// under a single group labelled with the configured `size`, e.g. `"[1, 1, 1]"`.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodFeatures {
    config: NeighborhoodConfig,
}

impl NeighborhoodFeatures {
    /// Create with default geometry (`size = [1, 1, 1]`, `offset = [15, 15, 15]`)
    pub fn new(url: impl Into<String>) -> Self {
        Self::from_config(NeighborhoodConfig::new(url))
    }

    /// Create with explicit geometry
    pub fn with_geometry(url: impl Into<String>, size: [usize; 3], offset: [i64; 3]) -> Self {
        Self::from_config(NeighborhoodConfig::with_geometry(url, size, offset))
    }

    /// Create from a loaded configuration
    pub fn from_config(config: NeighborhoodConfig) -> Self {
        Self { config }
    }

    /// Source identifier
    pub fn url(&self) -> &str {
        self.config.url()
    }

    /// Neighborhood radius
    pub fn size(&self) -> [usize; 3] {
        self.config.size()
    }

    /// Background displacement
    pub fn offset(&self) -> [i64; 3] {
        self.config.offset()
    }

    /// Flatten `img` into a single-group feature record.
    ///
    /// Accepts blocks of any rank. The label always comes from the
    /// configuration, never from the block's own shape.
    pub fn convert<S, D>(&self, img: &ArrayBase<S, D>) -> FeatureRecord<S::Elem>
    where
        S: Data,
        S::Elem: Clone,
        D: Dimension,
    {
        if img.ndim() == 3 {
            if let Some(expected) = self.config.window_shape() {
                if img.shape() != &expected[..] {
                    debug!(
                        "Block shape {:?} differs from neighborhood {:?}; keeping label {}",
                        img.shape(),
                        expected,
                        self.config.label()
                    );
                }
            }
        }

        // `iter` walks logical row-major order regardless of memory layout
        let values: Vec<S::Elem> = img.iter().cloned().collect();
        FeatureRecord::single(self.config.label(), values)
    }

    /// Flatten voxel data that arrives untyped as `(shape, row-major values)`.
    ///
    /// Fails without producing a record when `data` cannot fill `shape`.
    pub fn convert_raw<T: Clone>(
        &self,
        shape: &[usize],
        data: Vec<T>,
    ) -> Result<FeatureRecord<T>, FeatureError> {
        let block = ArrayD::from_shape_vec(IxDyn(shape), data)?;
        Ok(self.convert(&block))
    }
}

impl<T> FeatureTransform<T> for NeighborhoodFeatures
where
    T: Clone,
{
    type Value = T;

    fn config(&self) -> &NeighborhoodConfig {
        &self.config
    }

    fn convert(&self, img: &ArrayViewD<'_, T>) -> FeatureRecord<T> {
        NeighborhoodFeatures::convert(self, img)
    }
}
