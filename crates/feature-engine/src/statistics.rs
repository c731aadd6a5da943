//! Intensity Statistics Features

use crate::config::NeighborhoodConfig;
use crate::features::{FeatureRecord, FeatureTransform};
use ndarray::ArrayViewD;

/// Label of the statistics feature group
pub const STATS_LABEL: &str = "stats";

/// Summary statistics of neighborhood intensities.
///
/// Emits `[mean, std_dev, min, max, skewness, kurtosis]` under [`STATS_LABEL`].
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityStatistics {
    config: NeighborhoodConfig,
}

/// Moments computed over one block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Skewness (asymmetry)
    pub skewness: f64,
    /// Excess kurtosis (tailedness)
    pub kurtosis: f64,
}

impl Moments {
    /// Compute moments over a slice of intensities; empty input gives zeros
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;
        for &v in values {
            let d = v - mean;
            m2 += d * d;
            m3 += d * d * d;
            m4 += d * d * d * d;
        }

        let variance = m2 / n;
        let std_dev = variance.sqrt();

        // E[(X-μ)³] / σ³
        let skewness = if std_dev > 0.0 {
            (m3 / n) / (std_dev * std_dev * std_dev)
        } else {
            0.0
        };

        // E[(X-μ)⁴] / σ⁴ - 3
        let kurtosis = if std_dev > 0.0 {
            (m4 / n) / (variance * variance) - 3.0
        } else {
            0.0
        };

        Self {
            mean,
            std_dev,
            min,
            max,
            skewness,
            kurtosis,
        }
    }

    /// Flat feature layout
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.mean,
            self.std_dev,
            self.min,
            self.max,
            self.skewness,
            self.kurtosis,
        ]
    }
}

impl IntensityStatistics {
    /// Create with default geometry
    pub fn new(url: impl Into<String>) -> Self {
        Self::from_config(NeighborhoodConfig::new(url))
    }

    /// Create from a loaded configuration
    pub fn from_config(config: NeighborhoodConfig) -> Self {
        Self { config }
    }
}

impl<T> FeatureTransform<T> for IntensityStatistics
where
    T: Copy + Into<f64>,
{
    type Value = f64;

    fn config(&self) -> &NeighborhoodConfig {
        &self.config
    }

    fn convert(&self, img: &ArrayViewD<'_, T>) -> FeatureRecord<f64> {
        let values: Vec<f64> = img.iter().map(|&v| v.into()).collect();
        let moments = Moments::compute(&values);
        FeatureRecord::single(STATS_LABEL, moments.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array3};

    #[test]
    fn test_mean_computation() {
        let stats = Moments::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((stats.mean - 3.0).abs() < 0.001);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_std_dev_computation() {
        let stats = Moments::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.std_dev - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_block_has_no_shape_moments() {
        let stats = Moments::compute(&[7.0; 10]);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.kurtosis, 0.0);
    }

    #[test]
    fn test_infinite_extremes() {
        let stats = Moments::compute(&[f64::INFINITY]);
        assert_eq!(stats.min, f64::INFINITY);
        assert_eq!(stats.max, f64::INFINITY);

        let stats = Moments::compute(&[f64::NEG_INFINITY, 1.0]);
        assert_eq!(stats.min, f64::NEG_INFINITY);
        assert_eq!(stats.max, 1.0);

        let stats = Moments::compute(&[f64::NEG_INFINITY]);
        assert_eq!(stats.max, f64::NEG_INFINITY);
    }

    #[test]
    fn test_empty_values() {
        let stats = Moments::compute(&[]);
        assert_eq!(stats, Moments::default());
    }

    #[test]
    fn test_transform_record() {
        let img = Array3::from_shape_vec((2, 2, 2), (0u8..8).collect()).unwrap();
        let transform = IntensityStatistics::new("mem://test");
        let record = transform.convert(&img.view().into_dyn());
        assert_eq!(record.len(), 1);
        let values = record.get(STATS_LABEL).unwrap();
        assert_eq!(values.len(), 6);
        assert!((values[0] - 3.5).abs() < 1e-12);
        assert_eq!(values[2], 0.0);
        assert_eq!(values[3], 7.0);
        // Symmetric ramp
        assert!(values[4].abs() < 1e-12);
    }

    #[test]
    fn test_transform_empty_block() {
        let img: Array1<f32> = Array1::zeros(0);
        let record = IntensityStatistics::new("").convert(&img.view().into_dyn());
        assert_eq!(record.get(STATS_LABEL), Some(&[0.0; 6][..]));
    }
}
