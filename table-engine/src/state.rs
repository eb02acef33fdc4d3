//! FILENAME: table-engine/src/state.rs
//! Table State - the caller-owned controller around the engine functions.
//!
//! Holds a working copy of the data, the current sort and the current column
//! summaries. Every change is explicit:
//! - `sort_by`: a header click (toggles direction on the same column)
//! - `set_data`: new data (re-sorts keeping the direction, re-summarizes)
//!
//! Display values for body and bottom rows are resolved on demand.

use serde::{Deserialize, Serialize};
use table_core::logging::{log_info, log_warn};
use table_core::{CellValue, ColumnSummary, Row, TableError};

use crate::bottom::{compute_bottom_rows, BottomData};
use crate::definition::{Column, Plugin, RowNumber, SortDirection};
use crate::render::render_cell;
use crate::resolver::{get_cell_data, get_column_by_id};
use crate::sort::sort_data;
use crate::summary::summarize_columns;
use crate::validate::validate_columns;

// ============================================================================
// OPTIONS & SORT STATE
// ============================================================================

/// Table-level behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    /// Whether `sort_by` reorders the data.
    #[serde(default = "default_true")]
    pub sortable: bool,

    #[serde(default)]
    pub initial_sort_column_id: Option<String>,

    /// Falls back to the column's first sort direction, then Ascending.
    #[serde(default)]
    pub initial_sort_direction: Option<SortDirection>,

    #[serde(default)]
    pub bottom_data: BottomData,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            sortable: true,
            initial_sort_column_id: None,
            initial_sort_direction: None,
            bottom_data: BottomData::Disabled,
        }
    }
}

fn default_true() -> bool {
    true
}

/// The column the data is sorted by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

// ============================================================================
// TABLE STATE
// ============================================================================

pub struct TableState {
    columns: Vec<Column>,
    plugins: Vec<Plugin>,
    options: TableOptions,
    data: Vec<Row>,
    sort: Option<SortState>,
    summaries: Vec<Option<ColumnSummary>>,
}

impl TableState {
    /// Builds the state: copies the data, computes the summaries and applies
    /// the initial sort when the table is sortable.
    pub fn new(
        columns: Vec<Column>,
        plugins: Vec<Plugin>,
        data: &[Row],
        options: TableOptions,
    ) -> Result<Self, TableError> {
        validate_columns(&columns);
        let summaries = summarize_columns(&columns, data, &plugins)?;

        let mut state = TableState {
            columns,
            plugins,
            options,
            data: data.to_vec(),
            sort: None,
            summaries,
        };

        if state.options.sortable {
            state.apply_initial_sort();
        }

        log_info!(
            "TABLE",
            "created columns={} rows={} sort={:?}",
            state.columns.len(),
            state.data.len(),
            state.sort
        );
        Ok(state)
    }

    fn apply_initial_sort(&mut self) {
        let Some(column_id) = self.options.initial_sort_column_id.clone() else {
            return;
        };
        let Some(column) = get_column_by_id(&self.columns, &column_id) else {
            log_warn!("TABLE", "initial sort column '{}' not found", column_id);
            return;
        };

        let direction = self
            .options
            .initial_sort_direction
            .or(column.first_sort_direction)
            .unwrap_or_default();
        self.data = sort_data(&self.data, &column_id, direction, &self.columns);
        self.sort = Some(SortState {
            column_id,
            direction,
        });
    }

    /// Sorts by a column as a header click would. Returns `None` (and changes
    /// nothing) when the table is not sortable or the column is unknown.
    ///
    /// A new column starts at its first sort direction; the current column
    /// flips direction.
    pub fn sort_by(&mut self, column_id: &str) -> Option<(SortState, &[Row])> {
        if !self.options.sortable {
            return None;
        }
        let sort = self.apply_sort(column_id, false)?;
        log_info!("TABLE", "sorted by {} {:?}", sort.column_id, sort.direction);
        Some((sort, self.data.as_slice()))
    }

    fn apply_sort(&mut self, column_id: &str, keep_direction: bool) -> Option<SortState> {
        let column = get_column_by_id(&self.columns, column_id)?;

        let direction = match &self.sort {
            Some(current) if current.column_id == column_id => {
                if keep_direction {
                    current.direction
                } else {
                    current.direction.reverse()
                }
            }
            _ => column.first_sort_direction.unwrap_or_default(),
        };

        self.data = sort_data(&self.data, column_id, direction, &self.columns);
        let sort = SortState {
            column_id: column_id.to_string(),
            direction,
        };
        self.sort = Some(sort.clone());
        Some(sort)
    }

    /// Replaces the data. The current sort is reapplied with its direction
    /// kept, and every summary is recomputed.
    pub fn set_data(&mut self, data: &[Row]) -> Result<(), TableError> {
        validate_columns(&self.columns);
        self.data = data.to_vec();

        if let Some(current) = self.sort.clone() {
            self.apply_sort(&current.column_id, true);
        }

        self.summaries = summarize_columns(&self.columns, &self.data, &self.plugins)?;
        log_info!("TABLE", "data replaced rows={} sort={:?}", self.data.len(), self.sort);
        Ok(())
    }

    /// The working data, in display order.
    pub fn data(&self) -> &[Row] {
        &self.data
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// One slot per column, `None` for columns without a summary.
    pub fn summaries(&self) -> &[Option<ColumnSummary>] {
        &self.summaries
    }

    pub fn column_summary(&self, column_id: &str) -> Option<&ColumnSummary> {
        let index = self.columns.iter().position(|column| column.id == column_id)?;
        self.summaries.get(index).and_then(Option::as_ref)
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Synthetic bottom rows for the current data and summaries.
    pub fn bottom_rows(&self) -> Result<Vec<Row>, TableError> {
        compute_bottom_rows(
            &self.options.bottom_data,
            &self.columns,
            &self.data,
            &self.summaries,
        )
    }

    /// Display values of the body rows, one inner vector per row in column order.
    pub fn body_display(&self) -> Result<Vec<Vec<CellValue>>, TableError> {
        self.data
            .iter()
            .enumerate()
            .map(|(index, row)| self.display_row(row, RowNumber::Body(index), false))
            .collect()
    }

    /// Display values of the bottom rows. Their cells are final and are not
    /// run through the column renderers again.
    pub fn bottom_display(&self) -> Result<Vec<Vec<CellValue>>, TableError> {
        self.bottom_rows()?
            .iter()
            .enumerate()
            .map(|(index, row)| self.display_row(row, RowNumber::Bottom(index), true))
            .collect()
    }

    fn display_row(
        &self,
        row: &Row,
        row_number: RowNumber,
        is_synthetic: bool,
    ) -> Result<Vec<CellValue>, TableError> {
        self.columns
            .iter()
            .zip(&self.summaries)
            .map(|(column, summary)| {
                let value = get_cell_data(
                    column,
                    row,
                    row_number,
                    &self.data,
                    &self.columns,
                    is_synthetic,
                );
                render_cell(
                    &value,
                    column,
                    row,
                    row_number,
                    &self.data,
                    &self.columns,
                    is_synthetic,
                    summary.as_ref(),
                )
            })
            .collect()
    }
}

impl std::fmt::Debug for TableState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableState")
            .field("columns", &self.columns.len())
            .field("plugins", &self.plugins.len())
            .field("rows", &self.data.len())
            .field("sort", &self.sort)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::DataType;
    use table_core::row;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id").data_type(DataType::Number),
            Column::new("v")
                .data_type(DataType::Number)
                .first_sort_direction(SortDirection::Descending),
        ]
    }

    fn data() -> Vec<Row> {
        vec![
            row! { "id" => 1, "v" => 30 },
            row! { "id" => 2, "v" => 10 },
            row! { "id" => 3, "v" => 20 },
        ]
    }

    fn ids(rows: &[Row]) -> Vec<f64> {
        rows.iter().filter_map(|r| r.get("id").as_number()).collect()
    }

    #[test]
    fn test_sort_by_uses_first_sort_direction_then_toggles() {
        let mut state = TableState::new(columns(), vec![], &data(), TableOptions::default()).unwrap();

        let (sort, rows) = state.sort_by("v").unwrap();
        assert_eq!(sort.direction, SortDirection::Descending);
        assert_eq!(ids(rows), vec![1.0, 3.0, 2.0]);

        let (sort, rows) = state.sort_by("v").unwrap();
        assert_eq!(sort.direction, SortDirection::Ascending);
        assert_eq!(ids(rows), vec![2.0, 3.0, 1.0]);

        let (sort, _) = state.sort_by("id").unwrap();
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_by_noop_cases() {
        let mut state = TableState::new(columns(), vec![], &data(), TableOptions::default()).unwrap();
        assert!(state.sort_by("missing").is_none());
        assert!(state.sort_state().is_none());

        let options = TableOptions {
            sortable: false,
            ..TableOptions::default()
        };
        let mut fixed = TableState::new(columns(), vec![], &data(), options).unwrap();
        assert!(fixed.sort_by("v").is_none());
        assert_eq!(ids(fixed.data()), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_initial_sort_direction_precedence() {
        let options = TableOptions {
            initial_sort_column_id: Some("v".to_string()),
            ..TableOptions::default()
        };
        let state = TableState::new(columns(), vec![], &data(), options).unwrap();
        assert_eq!(
            state.sort_state().map(|s| s.direction),
            Some(SortDirection::Descending)
        );

        let options = TableOptions {
            initial_sort_column_id: Some("v".to_string()),
            initial_sort_direction: Some(SortDirection::Ascending),
            ..TableOptions::default()
        };
        let state = TableState::new(columns(), vec![], &data(), options).unwrap();
        assert_eq!(ids(state.data()), vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_caller_data_untouched() {
        let original = data();
        let mut state = TableState::new(columns(), vec![], &original, TableOptions::default()).unwrap();
        state.sort_by("v");
        assert_eq!(ids(&original), vec![1.0, 2.0, 3.0]);
    }
}
