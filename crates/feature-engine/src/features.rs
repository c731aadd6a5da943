//! Feature Record Assembly

use crate::config::NeighborhoodConfig;
use ndarray::ArrayViewD;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named groups of feature values produced from one neighborhood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureRecord<T> {
    groups: BTreeMap<String, Vec<T>>,
}

impl<T> Default for FeatureRecord<T> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<T> FeatureRecord<T> {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record holding a single feature group
    pub fn single(label: impl Into<String>, values: Vec<T>) -> Self {
        let mut record = Self::new();
        record.insert(label, values);
        record
    }

    /// Add or replace a feature group, returning the previous values
    pub fn insert(&mut self, label: impl Into<String>, values: Vec<T>) -> Option<Vec<T>> {
        self.groups.insert(label.into(), values)
    }

    /// Values of a feature group
    pub fn get(&self, label: &str) -> Option<&[T]> {
        self.groups.get(label).map(Vec::as_slice)
    }

    /// Number of feature groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the record has no feature groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Feature-group labels in sorted order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Iterate over `(label, values)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total number of values across all groups
    pub fn dimension(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Consume the record, yielding the underlying map
    pub fn into_inner(self) -> BTreeMap<String, Vec<T>> {
        self.groups
    }
}

/// Final step of the fetch pipeline: image block in, feature record out.
///
/// Implementations carry the neighborhood geometry the acquisition side
/// needs to bound its fetches, and must not retain or mutate the block.
pub trait FeatureTransform<T>: Send + Sync {
    /// Element type of the produced feature vectors
    type Value;

    /// Geometry and source this transform was configured with
    fn config(&self) -> &NeighborhoodConfig;

    /// Convert one fetched neighborhood into a feature record
    fn convert(&self, img: &ArrayViewD<'_, T>) -> FeatureRecord<Self::Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record() {
        let record = FeatureRecord::single("[1, 1, 1]", vec![1u8, 2, 3]);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("[1, 1, 1]"), Some(&[1u8, 2, 3][..]));
        assert_eq!(record.get("missing"), None);
        assert_eq!(record.dimension(), 3);
    }

    #[test]
    fn test_insert_replaces() {
        let mut record = FeatureRecord::new();
        assert!(record.insert("a", vec![1.0f32]).is_none());
        assert_eq!(record.insert("a", vec![2.0]), Some(vec![1.0]));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_labels_sorted() {
        let mut record = FeatureRecord::new();
        record.insert("b", vec![0i32]);
        record.insert("a", vec![1i32, 2]);
        assert_eq!(record.labels().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.dimension(), 3);
    }

    #[test]
    fn test_empty_record() {
        let record: FeatureRecord<f64> = FeatureRecord::default();
        assert!(record.is_empty());
        assert_eq!(record.iter().count(), 0);
    }

    #[test]
    fn test_json_decodes_bare_mapping() {
        let record: FeatureRecord<i32> =
            serde_json::from_str(r#"{"[1, 1, 1]":[0,1,2,3,4,5,6,7]}"#).unwrap();
        assert_eq!(record, FeatureRecord::single("[1, 1, 1]", (0..8).collect()));
    }

    #[test]
    fn test_json_shape() {
        let record = FeatureRecord::single("[1, 1, 1]", vec![0u8, 1]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"[1, 1, 1]":[0,1]}"#);
    }
}
