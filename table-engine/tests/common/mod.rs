//! FILENAME: table-engine/tests/common/mod.rs
//! Test harness and fixtures for table-engine integration tests.

#![allow(dead_code)]

use table_engine::{
    row, CellValue, Column, ColumnSummary, DataType, Plugin, Row, TableError, TableOptions,
    TableState,
};

/// Test harness bundling columns, plugins and data for a table.
pub struct TestHarness {
    pub columns: Vec<Column>,
    pub plugins: Vec<Plugin>,
    pub data: Vec<Row>,
}

impl TestHarness {
    /// Create a harness with no columns, plugins or data.
    pub fn new() -> Self {
        TestHarness {
            columns: Vec::new(),
            plugins: Vec::new(),
            data: Vec::new(),
        }
    }

    /// `id` and `v` columns over three rows, `v` carrying a sum summarizer.
    pub fn with_sum_table() -> Self {
        TestHarness {
            columns: vec![
                Column::new("id").data_type(DataType::Number),
                Column::new("v").data_type(DataType::Number).summarize_fn(sum_summarizer),
            ],
            plugins: Vec::new(),
            data: vec![
                row! { "id" => 1, "v" => 30 },
                row! { "id" => 2, "v" => 10 },
                row! { "id" => 3, "v" => 20 },
            ],
        }
    }

    /// A people table with names, ages, cities and an optional score.
    pub fn with_people() -> Self {
        let data = vec![
            ("Alice", 30.0, "Paris", Some(7.5)),
            ("bob", 25.0, "Oslo", None),
            ("Carol", 35.0, "paris", Some(9.0)),
            ("dave", 25.0, "Rome", Some(6.0)),
            ("Eve", 28.0, "Oslo", Some(9.0)),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, age, city, score))| {
            row! { "id" => i + 1, "name" => name, "age" => age, "city" => city, "score" => score }
        })
        .collect();

        TestHarness {
            columns: vec![
                Column::new("id").data_type(DataType::Number),
                Column::new("name").data_type(DataType::String),
                Column::new("age").data_type(DataType::Number),
                Column::new("city").data_type(DataType::String),
                Column::new("score").data_type(DataType::Number),
            ],
            plugins: Vec::new(),
            data,
        }
    }

    pub fn with_plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Build a `TableState` over the harness data.
    pub fn state(&self, options: TableOptions) -> Result<TableState, TableError> {
        TableState::new(self.columns.clone(), self.plugins.clone(), &self.data, options)
    }
}

/// `{sum}` over the numeric values of the column's id key.
pub fn sum_summarizer(
    column: &Column,
    dataset: &[Row],
    _columns: &[Column],
) -> Result<Option<ColumnSummary>, TableError> {
    let sum: f64 = dataset
        .iter()
        .filter_map(|row| row.get(&column.id).as_number())
        .sum();
    Ok(Some(ColumnSummary::new().with("sum", sum)))
}

/// Values of `key` across the rows, as display text.
pub fn texts(rows: &[Row], key: &str) -> Vec<String> {
    rows.iter().map(|row| row.get(key).display_value()).collect()
}

/// Values of `key` across the rows.
pub fn values(rows: &[Row], key: &str) -> Vec<CellValue> {
    rows.iter().map(|row| row.get(key).clone()).collect()
}

/// Values of `key` that read as numbers.
pub fn numbers(rows: &[Row], key: &str) -> Vec<f64> {
    rows.iter().filter_map(|row| row.get(key).as_number()).collect()
}
