//! Volume Source
//!
//! Acquisition side of the neighborhood feature pipeline: a capability trait
//! for anything that can hand back a bounded sub-volume of voxel intensities,
//! plus an ndarray-backed implementation for local data and tests.

mod bounds;
mod memory;

pub use bounds::Bounds;
pub use memory::InMemoryVolume;

use ndarray::ArrayD;
use thiserror::Error;

/// Volume acquisition error types
#[derive(Error, Debug)]
pub enum VolumeError {
    #[error("Window {bounds} lies outside volume of shape {shape:?}")]
    OutOfBounds { bounds: Bounds, shape: [usize; 3] },

    #[error("Inverted window {0}: start exceeds end")]
    InvertedWindow(Bounds),

    #[error("Invalid volume shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Window coordinates overflow i64 on axis {axis}")]
    CoordinateOverflow { axis: usize },
}

/// A store of 3D voxel intensities that can be queried by window.
///
/// Implementations resolve their own `url`; callers never interpret it.
pub trait VolumeSource<T>: Send + Sync {
    /// Identifier of the backing image
    fn url(&self) -> &str;

    /// Extent of the full volume along each axis
    fn shape(&self) -> [usize; 3];

    /// Fetch the voxels inside `bounds` as a freshly owned block
    fn fetch(&self, bounds: &Bounds) -> Result<ArrayD<T>, VolumeError>;
}
