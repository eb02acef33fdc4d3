//! FILENAME: table-engine/src/bottom.rs
//! Bottom-Row Synthesizer - builds footer rows (totals, averages, labels).
//!
//! Starting records come from the configured `BottomData`:
//! - `Rows(rows)`: one synthetic row per record
//! - `Row(row)`: the same as a one-element `Rows`
//! - `Auto`: as many empty records as the longest column bottom render
//! - `Disabled`: no rows
//!
//! Each record is then completed column by column, left to right. Per cell:
//! a. a value already in the record with no override is run through the
//!    column renderer (with the column summary as context)
//! b. a function override is called and its result stored as final
//! c. a value override is stored as final
//! d. otherwise the record keeps whatever it had

use serde::{Deserialize, Serialize};
use table_core::logging::{log_enter, log_exit};
use table_core::{CellValue, ColumnSummary, Row, TableError};

use crate::definition::{BottomCell, BottomRenderContext, Column, RowNumber};
use crate::render::render_cell;

/// Where synthetic bottom rows come from.
///
/// In JSON this is `true`/`false`, a single object, or an array of objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BottomDataRepr", into = "BottomDataRepr")]
pub enum BottomData {
    #[default]
    Disabled,
    /// Row count taken from the columns' bottom renders.
    Auto,
    Row(Row),
    Rows(Vec<Row>),
}

impl BottomData {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, BottomData::Disabled)
    }

    fn mode_name(&self) -> &'static str {
        match self {
            BottomData::Disabled => "disabled",
            BottomData::Auto => "auto",
            BottomData::Row(_) => "row",
            BottomData::Rows(_) => "rows",
        }
    }

    /// The records synthesis starts from.
    fn starting_rows(&self, columns: &[Column]) -> Vec<Row> {
        match self {
            BottomData::Disabled => Vec::new(),
            BottomData::Auto => vec![Row::new(); auto_row_count(columns)],
            BottomData::Row(row) => vec![row.clone()],
            BottomData::Rows(rows) => rows.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BottomDataRepr {
    Flag(bool),
    Rows(Vec<Row>),
    Row(Row),
}

impl From<BottomDataRepr> for BottomData {
    fn from(repr: BottomDataRepr) -> Self {
        match repr {
            BottomDataRepr::Flag(enabled) => enabled.into(),
            BottomDataRepr::Rows(rows) => BottomData::Rows(rows),
            BottomDataRepr::Row(row) => BottomData::Row(row),
        }
    }
}

impl From<BottomData> for BottomDataRepr {
    fn from(data: BottomData) -> Self {
        match data {
            BottomData::Disabled => BottomDataRepr::Flag(false),
            BottomData::Auto => BottomDataRepr::Flag(true),
            BottomData::Row(row) => BottomDataRepr::Row(row),
            BottomData::Rows(rows) => BottomDataRepr::Rows(rows),
        }
    }
}

impl From<bool> for BottomData {
    fn from(enabled: bool) -> Self {
        if enabled {
            BottomData::Auto
        } else {
            BottomData::Disabled
        }
    }
}

impl From<Row> for BottomData {
    fn from(row: Row) -> Self {
        BottomData::Row(row)
    }
}

impl From<Vec<Row>> for BottomData {
    fn from(rows: Vec<Row>) -> Self {
        BottomData::Rows(rows)
    }
}

/// Longest bottom render across the columns (0 when no column has one).
pub fn auto_row_count(columns: &[Column]) -> usize {
    columns
        .iter()
        .filter_map(|column| column.bottom_render.as_ref())
        .map(|render| render.row_count())
        .max()
        .unwrap_or(0)
}

/// Builds the synthetic bottom rows. `summaries` is indexed like `columns`.
pub fn compute_bottom_rows(
    bottom_data: &BottomData,
    columns: &[Column],
    dataset: &[Row],
    summaries: &[Option<ColumnSummary>],
) -> Result<Vec<Row>, TableError> {
    log_enter!(
        "BOTTOM",
        "compute_bottom_rows",
        "mode={} columns={}",
        bottom_data.mode_name(),
        columns.len()
    );

    let rows = bottom_data
        .starting_rows(columns)
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            complete_bottom_row(index, record, bottom_data, columns, dataset, summaries)
        })
        .collect::<Result<Vec<_>, _>>()?;

    log_exit!("BOTTOM", "compute_bottom_rows", "rows={}", rows.len());

    Ok(rows)
}

fn complete_bottom_row(
    index: usize,
    mut record: Row,
    bottom_data: &BottomData,
    columns: &[Column],
    dataset: &[Row],
    summaries: &[Option<ColumnSummary>],
) -> Result<Row, TableError> {
    for (column_index, column) in columns.iter().enumerate() {
        let column_summary = summaries.get(column_index).and_then(Option::as_ref);
        let override_cell = column
            .bottom_render
            .as_ref()
            .and_then(|render| render.for_row(index))
            .filter(|cell| cell.is_present());

        let resolved: Option<CellValue> = match override_cell {
            None => {
                let existing = record.get(&column.id);
                if existing.is_empty() {
                    None
                } else {
                    Some(render_cell(
                        existing,
                        column,
                        &record,
                        RowNumber::Bottom(index),
                        dataset,
                        columns,
                        false,
                        column_summary,
                    )?)
                }
            }
            Some(BottomCell::Function(f)) => {
                let ctx = BottomRenderContext {
                    column_summary,
                    column,
                    row: &record,
                    dataset,
                    columns,
                    bottom_data,
                };
                Some(f(&ctx).map_err(|err| column.callback_error("BOTTOM", err))?)
            }
            Some(BottomCell::Value(value)) => Some(value.clone()),
        };

        if let Some(value) = resolved {
            record.set(column.id.as_str(), value);
        }
    }
    Ok(record)
}
