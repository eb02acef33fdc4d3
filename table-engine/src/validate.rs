//! FILENAME: table-engine/src/validate.rs
//! Column validation. Diagnostic only: problems are logged, never returned
//! as errors, and lookups keep using the first column with a given id.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use table_core::logging::log_warn;

use crate::definition::Column;

/// A column id used by more than one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateColumnId {
    pub id: String,
    /// Positions of every column using the id, in order.
    pub indices: SmallVec<[usize; 2]>,
}

/// Checks the columns for duplicate ids, warning once per duplicated id.
/// Returns the duplicates found, in order of first appearance.
pub fn validate_columns(columns: &[Column]) -> Vec<DuplicateColumnId> {
    let mut positions: FxHashMap<&str, SmallVec<[usize; 2]>> = FxHashMap::default();
    let mut order: Vec<&str> = Vec::new();

    for (index, column) in columns.iter().enumerate() {
        let entry = positions.entry(column.id.as_str()).or_default();
        if entry.is_empty() {
            order.push(column.id.as_str());
        }
        entry.push(index);
    }

    let duplicates: Vec<DuplicateColumnId> = order
        .into_iter()
        .filter_map(|id| {
            positions
                .remove(id)
                .filter(|indices| indices.len() > 1)
                .map(|indices| DuplicateColumnId {
                    id: id.to_string(),
                    indices,
                })
        })
        .collect();

    for duplicate in &duplicates {
        log_warn!(
            "COLUMNS",
            "duplicate column id '{}' at positions {:?}; the first one is used",
            duplicate.id,
            duplicate.indices.as_slice()
        );
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids_pass() {
        let columns = vec![Column::new("a"), Column::new("b")];
        assert!(validate_columns(&columns).is_empty());
    }

    #[test]
    fn test_duplicates_reported_in_order() {
        let columns = vec![
            Column::new("b"),
            Column::new("a"),
            Column::new("b"),
            Column::new("a"),
            Column::new("b"),
            Column::new("c"),
        ];
        let duplicates = validate_columns(&columns);
        assert_eq!(duplicates.len(), 2);
        assert_eq!(duplicates[0].id, "b");
        assert_eq!(duplicates[0].indices.as_slice(), &[0, 2, 4]);
        assert_eq!(duplicates[1].id, "a");
        assert_eq!(duplicates[1].indices.as_slice(), &[1, 3]);
    }
}
