//! FILENAME: table-engine/src/config.rs
//! Serializable table configuration.
//!
//! A `TableConfig` is plain data (JSON in, JSON out) describing the columns
//! and table options. `build_columns` turns it into runtime `Column`s, wiring
//! up built-in summarizers, number formats and bottom values.
//!
//! Bottom values that are strings of the form `"$summary.<key>"` read `<key>`
//! from the column summary instead of being shown literally.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use table_core::{CellValue, NumberFormat, Row, TableError};

use crate::definition::{
    BottomCell, BottomRender, BottomRenderContext, BottomRenderFn, Column, DataType,
    SortDirection, Summarizer,
};
use crate::state::{TableOptions, TableState};
use crate::summarizers::{Composite, Frequency, Mean, MinMax, WeightedAverage};

/// Prefix of bottom values that read from the column summary.
pub const SUMMARY_REF_PREFIX: &str = "$summary.";

// ============================================================================
// CONFIG TYPES
// ============================================================================

/// The complete table description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub columns: Vec<ColumnConfig>,

    #[serde(default)]
    pub options: TableOptions,
}

/// One column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub id: String,

    #[serde(default)]
    pub header: Option<String>,

    /// Row key to read the value from (defaults to `id`).
    #[serde(default)]
    pub value: Option<String>,

    #[serde(default, rename = "type")]
    pub data_type: Option<DataType>,

    #[serde(default)]
    pub sort_type: Option<DataType>,

    #[serde(default)]
    pub first_sort_direction: Option<SortDirection>,

    #[serde(default)]
    pub render_on_null: bool,

    #[serde(default)]
    pub summarizer: Option<SummarizerConfig>,

    #[serde(default)]
    pub format: Option<NumberFormat>,

    #[serde(default)]
    pub bottom_render: Option<BottomRenderConfig>,
}

impl ColumnConfig {
    pub fn new(id: impl Into<String>) -> Self {
        ColumnConfig {
            id: id.into(),
            header: None,
            value: None,
            data_type: None,
            sort_type: None,
            first_sort_direction: None,
            render_on_null: false,
            summarizer: None,
            format: None,
            bottom_render: None,
        }
    }
}

/// Built-in summarizers by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SummarizerConfig {
    Mean,
    MinMax,
    #[serde(rename_all = "camelCase")]
    WeightedAverage {
        weight_column_id: String,
    },
    Frequency,
    /// Several summarizers merged, later ones winning.
    Composite {
        parts: Vec<SummarizerConfig>,
    },
}

/// A single bottom value for every synthetic row, or one per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BottomRenderConfig {
    Rows(Vec<CellValue>),
    Single(CellValue),
}

// ============================================================================
// BUILDING
// ============================================================================

impl TableConfig {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the runtime columns.
    ///
    /// Fails on an empty column id, or on a weighted average whose weight
    /// column is not part of the table.
    pub fn build_columns(&self) -> Result<Vec<Column>, TableError> {
        self.columns
            .iter()
            .map(|column| self.build_column(column))
            .collect()
    }

    /// Builds the columns and a `TableState` over `data`.
    pub fn into_state(self, data: &[Row]) -> Result<TableState, TableError> {
        let columns = self.build_columns()?;
        TableState::new(columns, Vec::new(), data, self.options)
    }

    fn build_column(&self, config: &ColumnConfig) -> Result<Column, TableError> {
        if config.id.trim().is_empty() {
            return Err(TableError::InvalidConfig(
                "column id must not be empty".to_string(),
            ));
        }

        let mut column = Column::new(config.id.clone()).render_on_null(config.render_on_null);
        column.header = config.header.clone();
        column.data_type = config.data_type;
        column.sort_type = config.sort_type;
        column.first_sort_direction = config.first_sort_direction;

        if let Some(key) = &config.value {
            column = column.value_key(key.clone());
        }
        if let Some(summarizer) = &config.summarizer {
            column.summarizer = Some(self.build_summarizer(summarizer)?);
        }
        if let Some(format) = &config.format {
            column = column.format(format.clone());
        }
        if let Some(bottom) = &config.bottom_render {
            column = column.bottom_render(build_bottom_render(bottom));
        }
        Ok(column)
    }

    fn build_summarizer(&self, config: &SummarizerConfig) -> Result<Arc<dyn Summarizer>, TableError> {
        let summarizer: Arc<dyn Summarizer> = match config {
            SummarizerConfig::Mean => Arc::new(Mean),
            SummarizerConfig::MinMax => Arc::new(MinMax),
            SummarizerConfig::Frequency => Arc::new(Frequency),
            SummarizerConfig::WeightedAverage { weight_column_id } => {
                if !self.columns.iter().any(|c| &c.id == weight_column_id) {
                    return Err(TableError::UnknownColumn(weight_column_id.clone()));
                }
                Arc::new(WeightedAverage::new(weight_column_id.clone()))
            }
            SummarizerConfig::Composite { parts } => {
                let mut composite = Composite::new();
                for part in parts {
                    composite.push(self.build_summarizer(part)?);
                }
                Arc::new(composite)
            }
        };
        Ok(summarizer)
    }
}

fn build_bottom_render(config: &BottomRenderConfig) -> BottomRender {
    match config {
        BottomRenderConfig::Single(value) => BottomRender::Single(build_bottom_cell(value)),
        BottomRenderConfig::Rows(values) => {
            BottomRender::Rows(values.iter().map(build_bottom_cell).collect())
        }
    }
}

fn build_bottom_cell(value: &CellValue) -> BottomCell {
    match value {
        CellValue::Text(text) => match text.strip_prefix(SUMMARY_REF_PREFIX) {
            Some(key) => BottomCell::Function(summary_reference(key.to_string())),
            None => BottomCell::Value(value.clone()),
        },
        _ => BottomCell::Value(value.clone()),
    }
}

/// Bottom function reading `key` from the column summary (empty if absent).
fn summary_reference(key: String) -> BottomRenderFn {
    Arc::new(
        move |ctx: &BottomRenderContext<'_>| -> Result<CellValue, TableError> {
            Ok(ctx
                .column_summary
                .and_then(|summary| summary.get(&key))
                .cloned()
                .unwrap_or_default())
        },
    )
}
