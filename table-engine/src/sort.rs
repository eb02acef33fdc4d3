//! FILENAME: table-engine/src/sort.rs
//! Sort Engine - orders a dataset by one column.
//!
//! Algorithm:
//! 1. Resolve the column by id (unknown id: warn and keep the input order)
//! 2. Pick a comparator from the column's sort type
//! 3. Decorate every row with its original index and its sort value
//! 4. If the rows are already ordered in the OPPOSITE direction, reverse them
//! 5. Otherwise stable sort (ties by original index), reversing for Descending
//!
//! Step 4 makes toggling the direction on unchanged data yield the exact
//! reverse of the previous order, including among ties. For Ascending requests
//! the input must be strictly descending: reversing a run of ties would break
//! their original order.

use std::cmp::Ordering;

use table_core::logging::{log_debug, log_warn};
use table_core::{CellValue, Row};

use crate::definition::{Column, DataType, SortDirection};
use crate::resolver::{get_column_by_id, get_sort_value};

/// Orders two sort values.
pub type Comparator = fn(&CellValue, &CellValue) -> Ordering;

// ============================================================================
// COMPARATORS
// ============================================================================

/// Gets the comparator for a column's effective sort type.
pub fn get_sort_comparator(sort_type: Option<DataType>) -> Comparator {
    match sort_type {
        Some(DataType::Number) | Some(DataType::NumberOrdinal) => number_comparator,
        Some(DataType::String) => string_comparator,
        None => default_comparator,
    }
}

/// Compares parsed floats. Values that do not parse count as missing and
/// sort after everything else.
fn number_comparator(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

/// Case-insensitive text comparison. Missing values sort first.
///
/// Accented Latin letters sort with their base letter; text whose keys fold
/// equal is ordered by its lowercase form ("e" < "é").
fn string_comparator(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            let a = a.display_value().to_lowercase();
            let b = b.display_value().to_lowercase();
            collation_key(&a).cmp(&collation_key(&b)).then_with(|| a.cmp(&b))
        }
    }
}

/// Folds lowercase Latin-1 letters to their unaccented base letters.
fn collation_key(lowercase: &str) -> String {
    let mut key = String::with_capacity(lowercase.len());
    for c in lowercase.chars() {
        match c {
            'à'..='å' => key.push('a'),
            'æ' => key.push_str("ae"),
            'ç' => key.push('c'),
            'è'..='ë' => key.push('e'),
            'ì'..='ï' => key.push('i'),
            'ð' => key.push('d'),
            'ñ' => key.push('n'),
            'ò'..='ö' | 'ø' => key.push('o'),
            'ù'..='ü' => key.push('u'),
            'ý' | 'ÿ' => key.push('y'),
            'ß' => key.push_str("ss"),
            'þ' => key.push_str("th"),
            _ => key.push(c),
        }
    }
    key
}

/// Compares raw values. Missing values sort last; values of different kinds
/// are ordered Numbers < Text < Booleans.
fn default_comparator(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
        (CellValue::Empty, _) => Ordering::Greater,
        (_, CellValue::Empty) => Ordering::Less,
        (CellValue::Number(x), CellValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        (CellValue::Boolean(x), CellValue::Boolean(y)) => x.cmp(y),
        _ => a.type_order().cmp(&b.type_order()),
    }
}

// ============================================================================
// SORTING
// ============================================================================

/// A row reference decorated for sorting.
#[derive(Debug, Clone)]
struct SortItem {
    index: usize,
    sort_value: CellValue,
}

/// True if `items` are ordered in `direction`. With `strict`, adjacent ties
/// count as out of order.
fn already_sorted(
    direction: SortDirection,
    items: &[SortItem],
    comparator: Comparator,
    strict: bool,
) -> bool {
    let in_order = match direction {
        SortDirection::Ascending => Ordering::Less,
        SortDirection::Descending => Ordering::Greater,
    };
    items.windows(2).all(|pair| {
        let ordering = comparator(&pair[0].sort_value, &pair[1].sort_value);
        ordering == in_order || (!strict && ordering == Ordering::Equal)
    })
}

/// Computes the sorted order of `dataset` as indices into it.
///
/// Returns `None` (after a warning) when no column has the given id.
pub fn sort_order(
    dataset: &[Row],
    column_id: &str,
    direction: SortDirection,
    columns: &[Column],
) -> Option<Vec<usize>> {
    let Some(column) = get_column_by_id(columns, column_id) else {
        log_warn!("SORT", "no column found by id '{}' ({} columns)", column_id, columns.len());
        return None;
    };

    let comparator = get_sort_comparator(column.effective_sort_type());
    let mut items: Vec<SortItem> = dataset
        .iter()
        .enumerate()
        .map(|(index, row)| SortItem {
            index,
            sort_value: get_sort_value(column, row, index, dataset, columns),
        })
        .collect();

    let strict = direction == SortDirection::Ascending;
    if already_sorted(direction.reverse(), &items, comparator, strict) {
        log_debug!(
            "SORT",
            "column={} rows={} already ordered {:?}, reversing",
            column_id,
            items.len(),
            direction.reverse()
        );
        items.reverse();
    } else {
        items.sort_by(|a, b| {
            comparator(&a.sort_value, &b.sort_value).then(a.index.cmp(&b.index))
        });
        if direction == SortDirection::Descending {
            items.reverse();
        }
        log_debug!("SORT", "column={} rows={} sorted {:?}", column_id, items.len(), direction);
    }

    Some(items.into_iter().map(|item| item.index).collect())
}

/// Sorts the data by a column. Returns a new sequence; the input is untouched.
/// An unknown column id returns the data in its current order.
pub fn sort_data(
    dataset: &[Row],
    column_id: &str,
    direction: SortDirection,
    columns: &[Column],
) -> Vec<Row> {
    match sort_order(dataset, column_id, direction, columns) {
        Some(order) => order.into_iter().map(|index| dataset[index].clone()).collect(),
        None => dataset.to_vec(),
    }
}
