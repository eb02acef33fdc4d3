//! FILENAME: table-engine/src/definition.rs
//! Column and plugin definitions - what the table IS.
//!
//! This module contains the types that DESCRIBE a table to the engine:
//! - `Column`: how one field is extracted, sorted, summarized and rendered
//! - `Plugin`: a cross-column summary contributor, optionally filtered per column
//! - the callback signatures and the context records they receive
//!
//! Definitions are immutable snapshots of caller intent. The engine never
//! mutates them; every computation reads them by reference.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use table_core::logging::log_error;
use table_core::{format_value, CellValue, ColumnSummary, NumberFormat, Row, TableError};

use crate::bottom::BottomData;

// ============================================================================
// DATA TYPES & DIRECTIONS
// ============================================================================

/// Semantic type of a column's values. Selects the sort comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    Number,
    /// Numbers that represent an ordering (levels, ranks).
    NumberOrdinal,
    String,
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }
}

impl std::ops::Not for SortDirection {
    type Output = SortDirection;

    fn not(self) -> Self::Output {
        self.reverse()
    }
}

/// Position of a row in the rendered table.
///
/// Body rows are numbered by their position in the ordered dataset; bottom
/// rows by their position among the synthetic rows (`bottom-0`, `bottom-1`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowNumber {
    Body(usize),
    Bottom(usize),
}

impl fmt::Display for RowNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowNumber::Body(n) => write!(f, "{}", n),
            RowNumber::Bottom(n) => write!(f, "bottom-{}", n),
        }
    }
}

// ============================================================================
// CALLBACK CONTEXTS
// ============================================================================

/// Extra arguments handed to a value accessor function.
#[derive(Debug, Clone, Copy)]
pub struct AccessorContext<'a> {
    pub row_number: RowNumber,
    pub dataset: &'a [Row],
    pub columns: &'a [Column],
}

/// Extra arguments handed to a cell renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub column: &'a Column,
    pub row: &'a Row,
    pub row_number: RowNumber,
    pub dataset: &'a [Row],
    pub columns: &'a [Column],
    pub column_summary: Option<&'a ColumnSummary>,
}

/// Arguments handed to a bottom-render function.
///
/// `row` is the synthetic record as built so far: the starting record plus the
/// values already resolved for columns to the left.
#[derive(Debug, Clone, Copy)]
pub struct BottomRenderContext<'a> {
    pub column_summary: Option<&'a ColumnSummary>,
    pub column: &'a Column,
    pub row: &'a Row,
    pub dataset: &'a [Row],
    pub columns: &'a [Column],
    pub bottom_data: &'a BottomData,
}

// ============================================================================
// CALLBACK TYPES
// ============================================================================

pub type ValueFn = Arc<dyn Fn(&Row, &AccessorContext<'_>) -> CellValue + Send + Sync>;

pub type SortValueFn = Arc<dyn Fn(&CellValue, &Row) -> CellValue + Send + Sync>;

pub type RendererFn =
    Arc<dyn Fn(&CellValue, &RenderContext<'_>) -> Result<CellValue, TableError> + Send + Sync>;

pub type BottomRenderFn =
    Arc<dyn Fn(&BottomRenderContext<'_>) -> Result<CellValue, TableError> + Send + Sync>;

pub type ColumnTest = Arc<dyn Fn(&Column) -> bool + Send + Sync>;

/// Produces a partial summary for one column.
///
/// Returning `Ok(None)` means "nothing to contribute"; it is not the same as
/// an empty summary.
pub trait Summarizer: Send + Sync {
    fn summarize(
        &self,
        column: &Column,
        dataset: &[Row],
        columns: &[Column],
    ) -> Result<Option<ColumnSummary>, TableError>;
}

/// Adapts a plain function or closure into a [`Summarizer`].
pub struct FnSummarizer<F>(pub F);

impl<F> Summarizer for FnSummarizer<F>
where
    F: Fn(&Column, &[Row], &[Column]) -> Result<Option<ColumnSummary>, TableError> + Send + Sync,
{
    fn summarize(
        &self,
        column: &Column,
        dataset: &[Row],
        columns: &[Column],
    ) -> Result<Option<ColumnSummary>, TableError> {
        (self.0)(column, dataset, columns)
    }
}

// ============================================================================
// ACCESSORS
// ============================================================================

/// Where a column reads its cell value from. Chosen once, when the column
/// is built.
#[derive(Clone)]
pub enum Accessor {
    /// Computed from the row.
    Function(ValueFn),
    /// Read from a named key of the row.
    Key(String),
    /// Read from the key equal to the column id.
    Identifier,
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Function(_) => f.write_str("Function(..)"),
            Accessor::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Accessor::Identifier => f.write_str("Identifier"),
        }
    }
}

// ============================================================================
// BOTTOM RENDER SPECS
// ============================================================================

/// One entry of a column's bottom render.
#[derive(Clone)]
pub enum BottomCell {
    /// Stored as the final cell value. `CellValue::Empty` counts as no override.
    Value(CellValue),
    /// Computed from the column summary; the result is stored as final.
    Function(BottomRenderFn),
}

impl BottomCell {
    /// True when this entry actually overrides the cell.
    pub fn is_present(&self) -> bool {
        match self {
            BottomCell::Value(value) => !value.is_empty(),
            BottomCell::Function(_) => true,
        }
    }
}

impl fmt::Debug for BottomCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BottomCell::Value(value) => f.debug_tuple("Value").field(value).finish(),
            BottomCell::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// How a column fills synthetic bottom rows.
#[derive(Debug, Clone)]
pub enum BottomRender {
    /// The same entry for every synthetic row.
    Single(BottomCell),
    /// One entry per synthetic row, by index.
    Rows(Vec<BottomCell>),
}

impl BottomRender {
    /// Number of synthetic rows this render implies on its own.
    pub fn row_count(&self) -> usize {
        match self {
            BottomRender::Single(_) => 1,
            BottomRender::Rows(cells) => cells.len(),
        }
    }

    /// The entry that applies to synthetic row `index`, if any.
    pub fn for_row(&self, index: usize) -> Option<&BottomCell> {
        match self {
            BottomRender::Single(cell) => Some(cell),
            BottomRender::Rows(cells) => cells.get(index),
        }
    }
}

// ============================================================================
// COLUMN
// ============================================================================

/// Configuration describing how to extract, sort, summarize and render one
/// field across all rows.
#[derive(Clone)]
pub struct Column {
    /// Unique key of the column.
    pub id: String,

    /// Display label (defaults to `id`).
    pub header: Option<String>,

    pub value: Accessor,

    /// Maps the cell value to the value actually compared when sorting.
    pub sort_value: Option<SortValueFn>,

    pub data_type: Option<DataType>,

    /// Overrides `data_type` for comparator selection only.
    pub sort_type: Option<DataType>,

    /// Direction used the first time this column is sorted.
    pub first_sort_direction: Option<SortDirection>,

    pub summarizer: Option<Arc<dyn Summarizer>>,

    pub bottom_render: Option<BottomRender>,

    pub renderer: Option<RendererFn>,

    /// Whether empty cells still go through the renderer.
    pub render_on_null: bool,
}

impl Column {
    pub fn new(id: impl Into<String>) -> Self {
        Column {
            id: id.into(),
            header: None,
            value: Accessor::Identifier,
            sort_value: None,
            data_type: None,
            sort_type: None,
            first_sort_direction: None,
            summarizer: None,
            bottom_render: None,
            renderer: None,
            render_on_null: false,
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Read the cell value from `key` instead of the column id.
    pub fn value_key(mut self, key: impl Into<String>) -> Self {
        self.value = Accessor::Key(key.into());
        self
    }

    /// Compute the cell value from the row.
    pub fn value_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Row, &AccessorContext<'_>) -> CellValue + Send + Sync + 'static,
    {
        self.value = Accessor::Function(Arc::new(f));
        self
    }

    pub fn sort_value_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, &Row) -> CellValue + Send + Sync + 'static,
    {
        self.sort_value = Some(Arc::new(f));
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn sort_type(mut self, sort_type: DataType) -> Self {
        self.sort_type = Some(sort_type);
        self
    }

    pub fn first_sort_direction(mut self, direction: SortDirection) -> Self {
        self.first_sort_direction = Some(direction);
        self
    }

    pub fn summarizer(mut self, summarizer: impl Summarizer + 'static) -> Self {
        self.summarizer = Some(Arc::new(summarizer));
        self
    }

    pub fn summarize_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Column, &[Row], &[Column]) -> Result<Option<ColumnSummary>, TableError>
            + Send
            + Sync
            + 'static,
    {
        self.summarizer(FnSummarizer(f))
    }

    pub fn bottom_render(mut self, render: BottomRender) -> Self {
        self.bottom_render = Some(render);
        self
    }

    /// A fixed bottom value for every synthetic row.
    pub fn bottom_value(self, value: impl Into<CellValue>) -> Self {
        self.bottom_render(BottomRender::Single(BottomCell::Value(value.into())))
    }

    /// A computed bottom value for every synthetic row.
    pub fn bottom_fn<F>(self, f: F) -> Self
    where
        F: Fn(&BottomRenderContext<'_>) -> Result<CellValue, TableError> + Send + Sync + 'static,
    {
        self.bottom_render(BottomRender::Single(BottomCell::Function(Arc::new(f))))
    }

    /// One bottom entry per synthetic row.
    pub fn bottom_rows(self, cells: Vec<BottomCell>) -> Self {
        self.bottom_render(BottomRender::Rows(cells))
    }

    pub fn renderer_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, &RenderContext<'_>) -> Result<CellValue, TableError>
            + Send
            + Sync
            + 'static,
    {
        self.renderer = Some(Arc::new(f));
        self
    }

    /// Render numeric cells with a number format.
    pub fn format(self, format: NumberFormat) -> Self {
        self.renderer_fn(move |value, _ctx| Ok(format_value(value, &format)))
    }

    pub fn render_on_null(mut self, render_on_null: bool) -> Self {
        self.render_on_null = render_on_null;
        self
    }

    /// The type that picks the sort comparator: `sort_type`, else `data_type`.
    pub fn effective_sort_type(&self) -> Option<DataType> {
        self.sort_type.or(self.data_type)
    }

    pub fn header_label(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.id)
    }

    /// Attributes a callback failure to this column and logs it under
    /// `category`.
    pub(crate) fn callback_error(&self, category: &str, err: TableError) -> TableError {
        let err = match err {
            TableError::Callback { .. } => err,
            other => TableError::callback(&self.id, other.to_string()),
        };
        log_error!(category, "{}", err);
        err
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("value", &self.value)
            .field("sort_value", &self.sort_value.is_some())
            .field("data_type", &self.data_type)
            .field("sort_type", &self.sort_type)
            .field("first_sort_direction", &self.first_sort_direction)
            .field("summarizer", &self.summarizer.is_some())
            .field("bottom_render", &self.bottom_render)
            .field("renderer", &self.renderer.is_some())
            .field("render_on_null", &self.render_on_null)
            .finish()
    }
}

// ============================================================================
// PLUGIN
// ============================================================================

/// A cross-column contributor of summary logic.
#[derive(Clone)]
pub struct Plugin {
    pub id: String,

    /// Restricts the plugin to the columns it accepts. Absent = all columns.
    pub column_test: Option<ColumnTest>,

    pub summarizer: Option<Arc<dyn Summarizer>>,
}

impl Plugin {
    pub fn new(id: impl Into<String>) -> Self {
        Plugin {
            id: id.into(),
            column_test: None,
            summarizer: None,
        }
    }

    pub fn column_test<F>(mut self, f: F) -> Self
    where
        F: Fn(&Column) -> bool + Send + Sync + 'static,
    {
        self.column_test = Some(Arc::new(f));
        self
    }

    pub fn summarizer(mut self, summarizer: impl Summarizer + 'static) -> Self {
        self.summarizer = Some(Arc::new(summarizer));
        self
    }

    pub fn summarize_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Column, &[Row], &[Column]) -> Result<Option<ColumnSummary>, TableError>
            + Send
            + Sync
            + 'static,
    {
        self.summarizer(FnSummarizer(f))
    }

    /// Whether this plugin runs for `column`.
    pub fn applies_to(&self, column: &Column) -> bool {
        self.column_test.as_ref().map_or(true, |test| test(column))
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("id", &self.id)
            .field("column_test", &self.column_test.is_some())
            .field("summarizer", &self.summarizer.is_some())
            .finish()
    }
}
