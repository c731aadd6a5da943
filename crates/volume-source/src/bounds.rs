//! Fetch windows

use crate::VolumeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open 3D window `[start, end)` in voxel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub start: [i64; 3],
    pub end: [i64; 3],
}

impl Bounds {
    /// Create a window from explicit corners
    pub fn new(start: [i64; 3], end: [i64; 3]) -> Self {
        Self { start, end }
    }

    /// Window of `2 * radius + 1` voxels per axis centered on `center`
    pub fn around(center: [i64; 3], radius: [usize; 3]) -> Result<Self, VolumeError> {
        let mut start = [0i64; 3];
        let mut end = [0i64; 3];
        for axis in 0..3 {
            let r = i64::try_from(radius[axis])
                .map_err(|_| VolumeError::CoordinateOverflow { axis })?;
            start[axis] = center[axis]
                .checked_sub(r)
                .ok_or(VolumeError::CoordinateOverflow { axis })?;
            end[axis] = center[axis]
                .checked_add(r)
                .and_then(|v| v.checked_add(1))
                .ok_or(VolumeError::CoordinateOverflow { axis })?;
        }
        Ok(Self { start, end })
    }

    /// Same window displaced by `offset`
    pub fn shifted(&self, offset: [i64; 3]) -> Result<Self, VolumeError> {
        let mut start = self.start;
        let mut end = self.end;
        for axis in 0..3 {
            start[axis] = start[axis]
                .checked_add(offset[axis])
                .ok_or(VolumeError::CoordinateOverflow { axis })?;
            end[axis] = end[axis]
                .checked_add(offset[axis])
                .ok_or(VolumeError::CoordinateOverflow { axis })?;
        }
        Ok(Self { start, end })
    }

    /// Whether `start <= end` on every axis
    pub fn is_ordered(&self) -> bool {
        (0..3).all(|axis| self.start[axis] <= self.end[axis])
    }

    /// Extent along each axis (zero for inverted axes)
    pub fn shape(&self) -> [usize; 3] {
        let mut shape = [0usize; 3];
        for axis in 0..3 {
            let extent = i128::from(self.end[axis]) - i128::from(self.start[axis]);
            shape[axis] = usize::try_from(extent.max(0)).unwrap_or(usize::MAX);
        }
        shape
    }

    /// Number of voxels covered, saturating at `usize::MAX`
    pub fn volume(&self) -> usize {
        self.shape()
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .unwrap_or(usize::MAX)
    }

    /// Whether the window fits inside a volume of the given shape
    pub fn fits_within(&self, shape: [usize; 3]) -> bool {
        (0..3).all(|axis| {
            let limit = i64::try_from(shape[axis]).unwrap_or(i64::MAX);
            self.start[axis] >= 0 && self.end[axis] <= limit
        })
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}, {}..{}]",
            self.start[0], self.end[0], self.start[1], self.end[1], self.start[2], self.end[2]
        )
    }
}
