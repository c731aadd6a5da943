//! Neighborhood configuration

use serde::{Deserialize, Serialize};

/// Default neighborhood radius along each axis
pub const DEFAULT_SIZE: [usize; 3] = [1, 1, 1];

/// Default displacement of the background sample
pub const DEFAULT_OFFSET: [i64; 3] = [15, 15, 15];

/// Geometry of the neighborhoods a transform is fed.
///
/// Fields are fixed at construction; only accessors are exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborhoodConfig {
    /// Identifier of the image source (never interpreted here)
    url: String,

    /// Neighborhood radius along each axis
    size: [usize; 3],

    /// Displacement from the query point, may be negative
    offset: [i64; 3],
}

impl Default for NeighborhoodConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            size: DEFAULT_SIZE,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl NeighborhoodConfig {
    /// Config for `url` with default geometry
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Config for `url` with explicit geometry
    pub fn with_geometry(url: impl Into<String>, size: [usize; 3], offset: [i64; 3]) -> Self {
        Self {
            url: url.into(),
            size,
            offset,
        }
    }

    /// Source identifier
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Neighborhood radius along each axis
    pub fn size(&self) -> [usize; 3] {
        self.size
    }

    /// Displacement of the background sample
    pub fn offset(&self) -> [i64; 3] {
        self.offset
    }

    /// Shape of the cube centered on a query point: `2 * size + 1` per axis.
    ///
    /// `None` when an axis does not fit in `usize`.
    pub fn window_shape(&self) -> Option<[usize; 3]> {
        let mut shape = [0usize; 3];
        for (extent, &r) in shape.iter_mut().zip(&self.size) {
            *extent = r.checked_mul(2)?.checked_add(1)?;
        }
        Some(shape)
    }

    /// Feature-group label, the textual form of `size`
    pub fn label(&self) -> String {
        format!("{:?}", self.size)
    }
}
