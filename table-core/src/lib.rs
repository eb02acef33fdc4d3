//! FILENAME: table-core/src/lib.rs
//! PURPOSE: Shared value types for the table engine.
//! CONTEXT: Re-exports cell values, rows, column summaries, the error type,
//! logging macros and number formatting for use by `table-engine`.

pub mod cell;
pub mod error;
pub mod logging;
pub mod number_format;
pub mod row;
pub mod summary;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use error::TableError;
pub use number_format::{
    dec_format, format_number, format_value, percent_format, plus_minus_format, NumberFormat,
};
pub use row::{Dataset, Row};
pub use summary::ColumnSummary;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_rows_from_macro() {
        let r = row! { "id" => 1, "v" => 30.5, "name" => "a" };
        assert_eq!(r.get("v"), &CellValue::Number(30.5));
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn it_formats_summary_values() {
        let summary = ColumnSummary::new().with("mean", 2.456);
        let mean = summary.get("mean").cloned().unwrap_or_default();
        assert_eq!(
            format_value(&mean, &NumberFormat::decimal(2)),
            CellValue::text("2.46")
        );
    }

    #[test]
    fn it_reports_callback_errors() {
        let err = TableError::callback("v", "boom");
        assert_eq!(err.to_string(), "Callback failed for column 'v': boom");
    }
}
