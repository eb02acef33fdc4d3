//! FILENAME: table-engine/src/summarizers.rs
//! Built-in summarizers for common column aggregates.
//!
//! Each summarizer reads cell values through the column's accessor, so
//! computed columns summarize the same values they display.
//!
//! | Summarizer        | Keys                                          |
//! |-------------------|-----------------------------------------------|
//! | `Mean`            | `sum`, `mean` (no `mean` without numbers)     |
//! | `MinMax`          | `min`, `max`                                  |
//! | `WeightedAverage` | `weightedAverage`                             |
//! | `Frequency`       | `mostFrequent`, `mostFrequentCount`, `distinctCount` |
//! | `Composite`       | union of its parts, later parts winning       |

use std::sync::Arc;

use rustc_hash::FxHashMap;
use table_core::{CellValue, ColumnSummary, Row, TableError};

use crate::definition::{Column, RowNumber, Summarizer};
use crate::resolver::{get_cell_data, get_column_by_id};
use crate::summary::merge_partial;

// ============================================================================
// NUMERIC ACCUMULATOR
// ============================================================================

/// Running numeric aggregates over the values that read as numbers.
#[derive(Debug, Clone, Default)]
pub struct NumericAccumulator {
    pub sum: f64,
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_number(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Adds the value if it reads as a number; other values are skipped.
    pub fn add_value(&mut self, value: &CellValue) {
        if let Some(n) = value.as_number() {
            self.add_number(n);
        }
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    /// Accumulates a column over the whole dataset.
    pub fn from_column(column: &Column, dataset: &[Row], columns: &[Column]) -> Self {
        let mut acc = Self::new();
        for value in column_values(column, dataset, columns) {
            acc.add_value(&value);
        }
        acc
    }
}

/// Cell values of one column, in dataset order.
fn column_values<'a>(
    column: &'a Column,
    dataset: &'a [Row],
    columns: &'a [Column],
) -> impl Iterator<Item = CellValue> + 'a {
    dataset.iter().enumerate().map(move |(index, row)| {
        get_cell_data(column, row, RowNumber::Body(index), dataset, columns, false)
    })
}

// ============================================================================
// SUMMARIZERS
// ============================================================================

/// `{sum, mean}` over numeric cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl Summarizer for Mean {
    fn summarize(
        &self,
        column: &Column,
        dataset: &[Row],
        columns: &[Column],
    ) -> Result<Option<ColumnSummary>, TableError> {
        let acc = NumericAccumulator::from_column(column, dataset, columns);
        let mut summary = ColumnSummary::new().with("sum", acc.sum);
        if let Some(mean) = acc.mean() {
            summary.insert("mean", mean);
        }
        Ok(Some(summary))
    }
}

/// `{min, max}` over numeric cells. Contributes nothing without numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMax;

impl Summarizer for MinMax {
    fn summarize(
        &self,
        column: &Column,
        dataset: &[Row],
        columns: &[Column],
    ) -> Result<Option<ColumnSummary>, TableError> {
        let acc = NumericAccumulator::from_column(column, dataset, columns);
        Ok(match (acc.min, acc.max) {
            (Some(min), Some(max)) => Some(ColumnSummary::new().with("min", min).with("max", max)),
            _ => None,
        })
    }
}

/// Average of this column weighted by another column:
/// `Σ(value × weight) / Σ weight` over rows where both are numbers.
#[derive(Debug, Clone)]
pub struct WeightedAverage {
    pub weight_column_id: String,
}

impl WeightedAverage {
    pub fn new(weight_column_id: impl Into<String>) -> Self {
        WeightedAverage {
            weight_column_id: weight_column_id.into(),
        }
    }
}

impl Summarizer for WeightedAverage {
    fn summarize(
        &self,
        column: &Column,
        dataset: &[Row],
        columns: &[Column],
    ) -> Result<Option<ColumnSummary>, TableError> {
        let weight_column = get_column_by_id(columns, &self.weight_column_id)
            .ok_or_else(|| TableError::UnknownColumn(self.weight_column_id.clone()))?;

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for (index, row) in dataset.iter().enumerate() {
            let row_number = RowNumber::Body(index);
            let value = get_cell_data(column, row, row_number, dataset, columns, false);
            let weight = get_cell_data(weight_column, row, row_number, dataset, columns, false);
            if let (Some(v), Some(w)) = (value.as_number(), weight.as_number()) {
                weighted_sum += v * w;
                total_weight += w;
            }
        }

        if total_weight == 0.0 {
            return Ok(None);
        }
        Ok(Some(
            ColumnSummary::new().with("weightedAverage", weighted_sum / total_weight),
        ))
    }
}

/// Most frequent non-empty value (compared as text) and the number of
/// distinct values. Ties go to the value seen first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frequency;

impl Summarizer for Frequency {
    fn summarize(
        &self,
        column: &Column,
        dataset: &[Row],
        columns: &[Column],
    ) -> Result<Option<ColumnSummary>, TableError> {
        let mut counts: FxHashMap<String, usize> = FxHashMap::default();
        let mut first_seen: Vec<String> = Vec::new();

        for value in column_values(column, dataset, columns) {
            if value.is_empty() {
                continue;
            }
            let key = value.display_value();
            let count = counts.entry(key.clone()).or_insert(0);
            if *count == 0 {
                first_seen.push(key);
            }
            *count += 1;
        }

        let mut best: Option<(&String, usize)> = None;
        for key in &first_seen {
            let count = counts.get(key).copied().unwrap_or(0);
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((key, count));
            }
        }

        Ok(best.map(|(key, count)| {
            ColumnSummary::new()
                .with("mostFrequent", key.as_str())
                .with("mostFrequentCount", count)
                .with("distinctCount", first_seen.len())
        }))
    }
}

/// Runs several summarizers and merges their results, later ones winning.
#[derive(Clone, Default)]
pub struct Composite {
    parts: Vec<Arc<dyn Summarizer>>,
}

impl Composite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, summarizer: impl Summarizer + 'static) -> Self {
        self.parts.push(Arc::new(summarizer));
        self
    }

    pub fn push(&mut self, summarizer: Arc<dyn Summarizer>) {
        self.parts.push(summarizer);
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl std::fmt::Debug for Composite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composite").field("parts", &self.parts.len()).finish()
    }
}

impl Summarizer for Composite {
    fn summarize(
        &self,
        column: &Column,
        dataset: &[Row],
        columns: &[Column],
    ) -> Result<Option<ColumnSummary>, TableError> {
        let mut result = None;
        for part in &self.parts {
            result = merge_partial(result, part.summarize(column, dataset, columns)?);
        }
        Ok(result)
    }
}
