//! FILENAME: table-engine/src/lib.rs
//! Table engine: sorting, column summaries and bottom rows over in-memory data.
//!
//! Depends on `table-core` for shared types (CellValue, Row, ColumnSummary,
//! TableError) and for logging and number formatting.
//!
//! Layers:
//! - `definition`: Columns and plugins (what the table IS)
//! - `resolver`: Cell and sort values out of rows
//! - `sort`: Ordering with the reversal short-circuit
//! - `summary` / `summarizers`: Per-column summaries and the built-in aggregates
//! - `bottom`: Synthetic footer rows
//! - `render`: Display values for cells
//! - `validate`: Column diagnostics
//! - `state`: Sort toggling and recomputation for a live table
//! - `config`: Serializable table description (JSON)

pub mod bottom;
pub mod config;
pub mod definition;
pub mod render;
pub mod resolver;
pub mod sort;
pub mod state;
pub mod summarizers;
pub mod summary;
pub mod validate;

pub use bottom::{auto_row_count, compute_bottom_rows, BottomData};
pub use config::{BottomRenderConfig, ColumnConfig, SummarizerConfig, TableConfig};
pub use definition::*;
pub use render::render_cell;
pub use resolver::{
    get_cell_data, get_column_by_id, get_column_index, get_sort_value,
    get_sort_value_from_cell_data,
};
pub use sort::{get_sort_comparator, sort_data, sort_order, Comparator};
pub use state::{SortState, TableOptions, TableState};
pub use summarizers::{Composite, Frequency, Mean, MinMax, NumericAccumulator, WeightedAverage};
pub use summary::{summarize_column, summarize_columns};
pub use validate::{validate_columns, DuplicateColumnId};

pub use table_core::{
    dec_format, format_number, format_value, percent_format, plus_minus_format, row, CellValue,
    ColumnSummary, Dataset, NumberFormat, Row, TableError,
};
