//! Labeled feature table

use crate::SamplerError;
use feature_engine::FeatureRecord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Whether a row was sampled at the query point or displaced from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleLabel {
    /// Neighborhood centered on the query point
    Foreground,
    /// Neighborhood centered `offset` voxels away
    Background,
}

impl SampleLabel {
    /// Numeric class used by downstream classifiers
    pub fn class(self) -> u8 {
        match self {
            SampleLabel::Foreground => 1,
            SampleLabel::Background => 0,
        }
    }
}

/// One dataset row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow<V> {
    /// Center of the fetched neighborhood
    pub point: [i64; 3],
    pub label: SampleLabel,
    pub record: FeatureRecord<V>,
}

/// Rows accumulated in sampling order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable<V> {
    rows: Vec<FeatureRow<V>>,
}

impl<V> Default for FeatureTable<V> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<V> FeatureTable<V> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    pub fn push(&mut self, row: FeatureRow<V>) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow all rows
    pub fn rows(&self) -> &[FeatureRow<V>] {
        &self.rows
    }

    /// Rows carrying `label`
    pub fn with_label(&self, label: SampleLabel) -> impl Iterator<Item = &FeatureRow<V>> {
        self.rows.iter().filter(move |row| row.label == label)
    }

    /// Consume the table, yielding its rows
    pub fn into_rows(self) -> Vec<FeatureRow<V>> {
        self.rows
    }
}

impl<V> Extend<FeatureRow<V>> for FeatureTable<V> {
    fn extend<I: IntoIterator<Item = FeatureRow<V>>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl<V: Serialize> FeatureTable<V> {
    /// Encode as compact postcard bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, SamplerError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Render as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<V: DeserializeOwned> FeatureTable<V> {
    /// Decode from postcard bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SamplerError> {
        Ok(postcard::from_bytes(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(point: [i64; 3], label: SampleLabel, values: Vec<u16>) -> FeatureRow<u16> {
        FeatureRow {
            point,
            label,
            record: FeatureRecord::single("[1, 1, 1]", values),
        }
    }

    #[test]
    fn test_label_classes() {
        assert_eq!(SampleLabel::Foreground.class(), 1);
        assert_eq!(SampleLabel::Background.class(), 0);
    }

    #[test]
    fn test_push_and_filter() {
        let mut table = FeatureTable::new();
        table.push(row([1, 2, 3], SampleLabel::Foreground, vec![1, 2]));
        table.push(row([16, 17, 18], SampleLabel::Background, vec![3, 4]));
        table.push(row([4, 5, 6], SampleLabel::Foreground, vec![5, 6]));

        assert_eq!(table.len(), 3);
        let points: Vec<_> = table
            .with_label(SampleLabel::Foreground)
            .map(|r| r.point)
            .collect();
        assert_eq!(points, vec![[1, 2, 3], [4, 5, 6]]);
    }

    #[test]
    fn test_bytes_decode_preserves_rows() {
        let mut table = FeatureTable::new();
        table.extend([
            row([0, 0, 0], SampleLabel::Foreground, vec![0, 65535]),
            row([15, 15, 15], SampleLabel::Background, vec![]),
        ]);
        let bytes = table.to_bytes().unwrap();
        let decoded: FeatureTable<u16> = FeatureTable::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let mut table = FeatureTable::new();
        table.push(row([0, 0, 0], SampleLabel::Foreground, vec![1, 2, 3]));
        let bytes = table.to_bytes().unwrap();
        let result = FeatureTable::<u16>::from_bytes(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(SamplerError::Encode(_))));
    }

    #[test]
    fn test_json_mentions_label() {
        let mut table = FeatureTable::new();
        table.push(row([0, 0, 0], SampleLabel::Background, vec![7]));
        let json = table.to_json().unwrap();
        assert!(json.contains("Background"));
        assert!(json.contains("[1, 1, 1]"));
    }
}
