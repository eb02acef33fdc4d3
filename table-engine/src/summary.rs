//! FILENAME: table-engine/src/summary.rs
//! Summary Pipeline - computes one optional summary per column.
//!
//! Contributors, in merge order:
//! 1. Every plugin that has a summarizer and accepts the column
//! 2. The column's own summarizer
//!
//! Partial summaries are merged shallowly with later keys winning, so the
//! column summarizer always has the final say. A column with no contributor
//! gets `None` in its slot, never an empty summary.

use table_core::logging::{log_enter, log_exit};
use table_core::{ColumnSummary, Row, TableError};

use crate::definition::{Column, Plugin, Summarizer};

/// Computes the summary of every column. The result is indexed like `columns`.
pub fn summarize_columns(
    columns: &[Column],
    dataset: &[Row],
    plugins: &[Plugin],
) -> Result<Vec<Option<ColumnSummary>>, TableError> {
    log_enter!(
        "SUMMARY",
        "summarize_columns",
        "columns={} rows={} plugins={}",
        columns.len(),
        dataset.len(),
        plugins.len()
    );

    let summaries = columns
        .iter()
        .map(|column| summarize_column(column, dataset, columns, plugins))
        .collect::<Result<Vec<_>, _>>()?;

    log_exit!(
        "SUMMARY",
        "summarize_columns",
        "summarized={}",
        summaries.iter().filter(|s| s.is_some()).count()
    );

    Ok(summaries)
}

/// Folds every applicable summarizer for one column into a single summary.
pub fn summarize_column(
    column: &Column,
    dataset: &[Row],
    columns: &[Column],
    plugins: &[Plugin],
) -> Result<Option<ColumnSummary>, TableError> {
    let plugin_summarizers = plugins
        .iter()
        .filter(|plugin| plugin.applies_to(column))
        .filter_map(|plugin| plugin.summarizer.as_deref());

    let mut result: Option<ColumnSummary> = None;
    for summarizer in plugin_summarizers.chain(column.summarizer.as_deref()) {
        result = merge_partial(result, run_summarizer(summarizer, column, dataset, columns)?);
    }
    Ok(result)
}

fn run_summarizer(
    summarizer: &dyn Summarizer,
    column: &Column,
    dataset: &[Row],
    columns: &[Column],
) -> Result<Option<ColumnSummary>, TableError> {
    summarizer
        .summarize(column, dataset, columns)
        .map_err(|err| column.callback_error("SUMMARY", err))
}

/// Shallow later-wins merge. A summarizer that returned nothing leaves the
/// accumulated summary untouched.
pub(crate) fn merge_partial(
    acc: Option<ColumnSummary>,
    next: Option<ColumnSummary>,
) -> Option<ColumnSummary> {
    match (acc, next) {
        (Some(mut acc), Some(next)) => {
            acc.merge(next);
            Some(acc)
        }
        (acc, None) => acc,
        (None, next) => next,
    }
}
