//! FILENAME: table-engine/src/resolver.rs
//! Cell Value Resolver - reads cell and sort values out of rows.
//!
//! Body rows go through the column's accessor (function, key, or id).
//! Synthetic bottom rows were built per column id with final values, so they
//! are read directly by id with no accessor pass.

use table_core::{CellValue, Row};

use crate::definition::{Accessor, AccessorContext, Column, RowNumber};

/// Finds a column by id. With duplicate ids the first match wins.
pub fn get_column_by_id<'a>(columns: &'a [Column], column_id: &str) -> Option<&'a Column> {
    columns.iter().find(|column| column.id == column_id)
}

/// Index of the column with the given id (first match).
pub fn get_column_index(columns: &[Column], column_id: &str) -> Option<usize> {
    columns.iter().position(|column| column.id == column_id)
}

/// Gets the value of a cell given the row.
pub fn get_cell_data(
    column: &Column,
    row: &Row,
    row_number: RowNumber,
    dataset: &[Row],
    columns: &[Column],
    is_synthetic: bool,
) -> CellValue {
    if is_synthetic {
        return row.get(&column.id).clone();
    }

    match &column.value {
        Accessor::Function(f) => {
            let ctx = AccessorContext {
                row_number,
                dataset,
                columns,
            };
            f(row, &ctx)
        }
        Accessor::Key(key) => row.get(key).clone(),
        Accessor::Identifier => row.get(&column.id).clone(),
    }
}

/// Maps a cell value to the value compared when sorting.
pub fn get_sort_value_from_cell_data(cell_data: CellValue, column: &Column, row: &Row) -> CellValue {
    match &column.sort_value {
        Some(f) => f(&cell_data, row),
        None => cell_data,
    }
}

/// Sort value of a body row: cell value first, then the sort-value mapping.
pub fn get_sort_value(
    column: &Column,
    row: &Row,
    row_index: usize,
    dataset: &[Row],
    columns: &[Column],
) -> CellValue {
    let cell_data = get_cell_data(column, row, RowNumber::Body(row_index), dataset, columns, false);
    get_sort_value_from_cell_data(cell_data, column, row)
}
