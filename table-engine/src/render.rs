//! FILENAME: table-engine/src/render.rs
//! Cell Renderer - turns a resolved cell value into its display value.

use table_core::{CellValue, ColumnSummary, Row, TableError};

use crate::definition::{Column, RenderContext, RowNumber};

/// Resolves the display value of one cell.
///
/// Synthetic (bottom) cells already hold final values and are returned as-is.
/// Empty cells skip the renderer unless the column sets `render_on_null`.
#[allow(clippy::too_many_arguments)]
pub fn render_cell(
    cell_value: &CellValue,
    column: &Column,
    row: &Row,
    row_number: RowNumber,
    dataset: &[Row],
    columns: &[Column],
    is_synthetic: bool,
    column_summary: Option<&ColumnSummary>,
) -> Result<CellValue, TableError> {
    if is_synthetic {
        return Ok(cell_value.clone());
    }

    if cell_value.is_empty() && !column.render_on_null {
        return Ok(CellValue::Empty);
    }

    match &column.renderer {
        Some(renderer) => {
            let ctx = RenderContext {
                column,
                row,
                row_number,
                dataset,
                columns,
                column_summary,
            };
            renderer(cell_value, &ctx).map_err(|err| column.callback_error("RENDER", err))
        }
        None => Ok(cell_value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_core::{row, NumberFormat};

    fn shout() -> Column {
        Column::new("name")
            .renderer_fn(|value, _ctx| Ok(CellValue::text(value.display_value().to_uppercase())))
    }

    #[test]
    fn test_renderer_applied_to_body_cells() {
        let column = shout();
        let r = row! { "name" => "abc" };
        let out = render_cell(
            &CellValue::text("abc"),
            &column,
            &r,
            RowNumber::Body(0),
            &[],
            &[],
            false,
            None,
        )
        .unwrap();
        assert_eq!(out, CellValue::text("ABC"));
    }

    #[test]
    fn test_synthetic_cells_bypass_renderer() {
        let column = shout();
        let r = row! { "name" => "total" };
        let out = render_cell(
            &CellValue::text("total"),
            &column,
            &r,
            RowNumber::Bottom(0),
            &[],
            &[],
            true,
            None,
        )
        .unwrap();
        assert_eq!(out, CellValue::text("total"));
    }

    #[test]
    fn test_null_policy() {
        let r = row! {};
        let skipped = render_cell(
            &CellValue::Empty,
            &shout(),
            &r,
            RowNumber::Body(0),
            &[],
            &[],
            false,
            None,
        )
        .unwrap();
        assert_eq!(skipped, CellValue::Empty);

        let rendered = render_cell(
            &CellValue::Empty,
            &shout().render_on_null(true),
            &r,
            RowNumber::Body(0),
            &[],
            &[],
            false,
            None,
        )
        .unwrap();
        assert_eq!(rendered, CellValue::text(""));
    }

    #[test]
    fn test_renderer_sees_column_summary() {
        let column = Column::new("v").renderer_fn(|value, ctx| {
            let sum = ctx.column_summary.and_then(|s| s.get_number("sum")).unwrap_or(1.0);
            Ok(CellValue::from(value.as_number().map(|n| n / sum)))
        });
        let summary = ColumnSummary::new().with("sum", 40);
        let r = row! { "v" => 10 };
        let out = render_cell(
            &CellValue::Number(10.0),
            &column,
            &r,
            RowNumber::Body(0),
            &[],
            &[],
            false,
            Some(&summary),
        )
        .unwrap();
        assert_eq!(out, CellValue::Number(0.25));
    }

    #[test]
    fn test_format_renderer() {
        let column = Column::new("v").format(NumberFormat::percent(0));
        let r = row! { "v" => 0.5 };
        let out = render_cell(
            &CellValue::Number(0.5),
            &column,
            &r,
            RowNumber::Body(0),
            &[],
            &[],
            false,
            None,
        )
        .unwrap();
        assert_eq!(out, CellValue::text("50%"));
    }

    #[test]
    fn test_renderer_failure_names_column() {
        let column = Column::new("v")
            .renderer_fn(|_value, _ctx| Err(TableError::InvalidConfig("nope".to_string())));
        let r = row! { "v" => 1 };
        let err = render_cell(
            &CellValue::Number(1.0),
            &column,
            &r,
            RowNumber::Body(0),
            &[],
            &[],
            false,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Callback { column, .. } if column == "v"));
    }
}
