//! FILENAME: table-core/src/row.rs
//! PURPOSE: A single keyed record of the dataset.
//! CONTEXT: Rows have no required shape. Columns decide which keys they read,
//! and a key that is not present reads as `CellValue::Empty`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// An ordered table is just a sequence of rows.
pub type Dataset = Vec<Row>;

/// An opaque keyed record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: FxHashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Row {
            fields: FxHashMap::default(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Reads a field. Missing keys read as `CellValue::Empty`.
    pub fn get(&self, key: &str) -> &CellValue {
        self.fields.get(key).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<CellValue> {
        self.fields.remove(key)
    }

    /// True if the key holds a non-empty value.
    pub fn has_value(&self, key: &str) -> bool {
        !self.get(key).is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.set(key, value);
        }
        row
    }
}

/// Builds a [`Row`] from `key => value` pairs.
///
/// ```
/// use table_core::{row, CellValue};
///
/// let r = row! { "id" => 1, "name" => "apple" };
/// assert_eq!(r.get("name"), &CellValue::text("apple"));
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Row::new()$(.with($key, $value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_empty() {
        let r = Row::new().with("a", 1);
        assert_eq!(r.get("a"), &CellValue::Number(1.0));
        assert_eq!(r.get("b"), &CellValue::Empty);
        assert!(r.has_value("a"));
        assert!(!r.has_value("b"));
    }

    #[test]
    fn test_explicit_empty_is_not_a_value() {
        let r = Row::new().with("a", CellValue::Empty);
        assert_eq!(r.len(), 1);
        assert!(!r.has_value("a"));
    }

    #[test]
    fn test_row_macro_and_equality() {
        let a = crate::row! { "id" => 2, "v" => 10 };
        let b: Row = vec![("v", 10), ("id", 2)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_row_from_json_object() {
        let r: Row = serde_json::from_str(r#"{"id": 1, "name": null}"#).unwrap();
        assert_eq!(r.get("id"), &CellValue::Number(1.0));
        assert!(r.get("name").is_empty());
    }
}
