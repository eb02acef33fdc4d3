//! FILENAME: table-core/src/summary.rs
//! PURPOSE: The aggregate produced for one column (sum, mean, min, ...).
//! CONTEXT: A summary is an open key -> value mapping. Several summarizers may
//! contribute to the same column; their outputs are combined with `merge`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Aggregate values computed over all rows for one column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSummary {
    values: FxHashMap<String, CellValue>,
}

impl ColumnSummary {
    pub fn new() -> Self {
        ColumnSummary {
            values: FxHashMap::default(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.values.get(key)
    }

    /// Reads a key as a number, if it holds one.
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(CellValue::as_number)
    }

    /// Shallow merge: keys in `other` overwrite keys of the same name in `self`,
    /// all other keys are kept.
    pub fn merge(&mut self, other: ColumnSummary) {
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.values.iter()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for ColumnSummary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut summary = ColumnSummary::new();
        for (key, value) in iter {
            summary.insert(key, value);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_later_wins() {
        let mut base = ColumnSummary::new().with("sum", 10.0).with("min", 1.0);
        base.merge(ColumnSummary::new().with("sum", 20.0).with("mean", 5.0));

        assert_eq!(base.len(), 3);
        assert_eq!(base.get_number("sum"), Some(20.0));
        assert_eq!(base.get_number("min"), Some(1.0));
        assert_eq!(base.get_number("mean"), Some(5.0));
    }

    #[test]
    fn test_get_number_ignores_text() {
        let summary = ColumnSummary::new().with("label", "n/a");
        assert_eq!(summary.get_number("label"), None);
        assert_eq!(summary.get_number("missing"), None);
    }
}
