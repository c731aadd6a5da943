//! Fetch-and-convert pipeline

use crate::table::{FeatureRow, FeatureTable, SampleLabel};
use crate::SamplerError;
use feature_engine::{FeatureRecord, FeatureTransform};
use std::marker::PhantomData;
use tracing::{debug, info, warn};
use volume_source::{Bounds, VolumeError, VolumeSource};

/// Pairs a volume source with a feature transform.
///
/// The transform owns the neighborhood geometry; the sampler turns each
/// query point into a fetch window with it and hands the fetched block back
/// to the transform.
pub struct NeighborhoodSampler<T, S, F> {
    source: S,
    transform: F,
    _voxel: PhantomData<fn() -> T>,
}

impl<T, S, F> NeighborhoodSampler<T, S, F>
where
    S: VolumeSource<T>,
    F: FeatureTransform<T>,
{
    /// Create a new sampler
    pub fn new(source: S, transform: F) -> Self {
        let url = transform.config().url();
        if !url.is_empty() && url != source.url() {
            warn!(
                "Transform configured for {} but sampling from {}",
                url,
                source.url()
            );
        }
        info!(
            "Sampling {} with size {:?}, offset {:?}",
            source.url(),
            transform.config().size(),
            transform.config().offset()
        );
        Self {
            source,
            transform,
            _voxel: PhantomData,
        }
    }

    /// The wrapped source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The wrapped transform
    pub fn transform(&self) -> &F {
        &self.transform
    }

    /// Fetch window for the neighborhood centered on `point`
    pub fn window(&self, point: [i64; 3]) -> Result<Bounds, SamplerError> {
        Ok(Bounds::around(point, self.transform.config().size())?)
    }

    /// Features of the neighborhood centered on `point`
    pub fn sample(&self, point: [i64; 3]) -> Result<FeatureRecord<F::Value>, SamplerError> {
        self.sample_window(self.window(point)?)
    }

    /// Foreground row at `point` followed by the background row at `point + offset`
    pub fn sample_pair(&self, point: [i64; 3]) -> Result<[FeatureRow<F::Value>; 2], SamplerError> {
        let offset = self.transform.config().offset();
        let foreground = self.window(point)?;
        let background = foreground.shifted(offset)?;
        let shifted_point = background_center(point, offset)?;

        Ok([
            FeatureRow {
                point,
                label: SampleLabel::Foreground,
                record: self.sample_window(foreground)?,
            },
            FeatureRow {
                point: shifted_point,
                label: SampleLabel::Background,
                record: self.sample_window(background)?,
            },
        ])
    }

    /// Sample every point into a table.
    ///
    /// The first failure aborts collection; no partial table is returned.
    pub fn collect<I>(
        &self,
        points: I,
        include_background: bool,
    ) -> Result<FeatureTable<F::Value>, SamplerError>
    where
        I: IntoIterator<Item = [i64; 3]>,
    {
        let mut table = FeatureTable::new();
        for point in points {
            if include_background {
                table.extend(self.sample_pair(point)?);
            } else {
                table.push(FeatureRow {
                    point,
                    label: SampleLabel::Foreground,
                    record: self.sample(point)?,
                });
            }
        }
        info!("Collected {} feature rows from {}", table.len(), self.source.url());
        Ok(table)
    }

    fn sample_window(&self, bounds: Bounds) -> Result<FeatureRecord<F::Value>, SamplerError> {
        debug!("Sampling window {}", bounds);
        let block = self.source.fetch(&bounds)?;
        Ok(self.transform.convert(&block.view()))
    }
}

fn background_center(point: [i64; 3], offset: [i64; 3]) -> Result<[i64; 3], VolumeError> {
    let mut center = point;
    for axis in 0..3 {
        center[axis] = point[axis]
            .checked_add(offset[axis])
            .ok_or(VolumeError::CoordinateOverflow { axis })?;
    }
    Ok(center)
}
