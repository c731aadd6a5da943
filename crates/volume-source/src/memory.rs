//! In-memory voxel volume

use crate::{Bounds, VolumeError, VolumeSource};
use ndarray::{s, Array3, ArrayD};
use tracing::{debug, info};

/// Dense 3D volume held in memory
#[derive(Debug, Clone)]
pub struct InMemoryVolume<T> {
    /// Identifier reported as the source url
    url: String,
    /// Voxel intensities, indexed `[x, y, z]`
    data: Array3<T>,
}

impl<T> InMemoryVolume<T> {
    /// Wrap an existing array
    pub fn new(url: impl Into<String>, data: Array3<T>) -> Self {
        let url = url.into();
        info!("Creating in-memory volume {} with shape {:?}", url, data.dim());
        Self { url, data }
    }

    /// Build a volume from row-major voxel data
    pub fn from_shape_vec(
        url: impl Into<String>,
        shape: [usize; 3],
        data: Vec<T>,
    ) -> Result<Self, VolumeError> {
        let data = Array3::from_shape_vec((shape[0], shape[1], shape[2]), data)?;
        Ok(Self::new(url, data))
    }

    /// Borrow the backing array
    pub fn data(&self) -> &Array3<T> {
        &self.data
    }
}

impl<T> VolumeSource<T> for InMemoryVolume<T>
where
    T: Clone + Send + Sync,
{
    fn url(&self) -> &str {
        &self.url
    }

    fn shape(&self) -> [usize; 3] {
        let (x, y, z) = self.data.dim();
        [x, y, z]
    }

    fn fetch(&self, bounds: &Bounds) -> Result<ArrayD<T>, VolumeError> {
        if !bounds.is_ordered() {
            return Err(VolumeError::InvertedWindow(*bounds));
        }
        let shape = self.shape();
        if !bounds.fits_within(shape) {
            return Err(VolumeError::OutOfBounds {
                bounds: *bounds,
                shape,
            });
        }

        debug!("Fetching {} from {}", bounds, self.url);

        // Both checks above guarantee non-negative, in-range corners
        let [x0, y0, z0] = bounds.start.map(|v| v as usize);
        let [x1, y1, z1] = bounds.end.map(|v| v as usize);
        Ok(self.data.slice(s![x0..x1, y0..y1, z0..z1]).to_owned().into_dyn())
    }
}
