//! FILENAME: table-engine/tests/test_config.rs
//! PURPOSE: Tests for building tables from JSON configuration.

mod common;

use common::numbers;
use table_engine::{
    row, BottomData, CellValue, Row, SortDirection, SummarizerConfig, TableConfig, TableError,
};

const SALES_TABLE: &str = r#"{
    "columns": [
        {"id": "region", "header": "Region", "type": "string", "bottomRender": "Total"},
        {"id": "units", "type": "number", "summarizer": {"kind": "mean"},
         "bottomRender": ["$summary.sum", "$summary.mean"]},
        {"id": "price", "type": "number",
         "summarizer": {"kind": "weightedAverage", "weightColumnId": "units"},
         "format": {"kind": "decimal", "decimalPlaces": 2},
         "bottomRender": "$summary.weightedAverage"},
        {"id": "change", "value": "delta", "type": "number", "firstSortDirection": "descending",
         "format": {"kind": "plusMinus", "decimalPlaces": 1}}
    ],
    "options": {
        "initialSortColumnId": "units",
        "bottomData": true
    }
}"#;

fn sales() -> Vec<Row> {
    vec![
        row! { "region" => "North", "units" => 10, "price" => 2.0, "delta" => 0.5 },
        row! { "region" => "South", "units" => 30, "price" => 4.0, "delta" => -1.25 },
        row! { "region" => "East", "units" => 20, "price" => 3.0, "delta" => 0 },
    ]
}

#[test]
fn test_options_parse() {
    let config = TableConfig::from_json(SALES_TABLE).unwrap();
    assert!(config.options.sortable);
    assert_eq!(config.options.initial_sort_column_id.as_deref(), Some("units"));
    assert_eq!(config.options.initial_sort_direction, None);
    assert_eq!(config.options.bottom_data, BottomData::Auto);
    assert_eq!(
        config.columns[2].summarizer,
        Some(SummarizerConfig::WeightedAverage {
            weight_column_id: "units".to_string()
        })
    );
}

#[test]
fn test_table_from_config() {
    let state = TableConfig::from_json(SALES_TABLE)
        .unwrap()
        .into_state(&sales())
        .unwrap();

    // Initial sort by units, ascending by default
    assert_eq!(
        state.sort_state().map(|s| s.direction),
        Some(SortDirection::Ascending)
    );
    assert_eq!(numbers(state.data(), "units"), vec![10.0, 20.0, 30.0]);

    let body = state.body_display().unwrap();
    assert_eq!(body[1][0], CellValue::text("East"));
    assert_eq!(body[1][2], CellValue::text("3.00"));
    assert_eq!(body[0][3], CellValue::text("+0.5"));

    let bottom = state.bottom_display().unwrap();
    assert_eq!(bottom.len(), 2);
    assert_eq!(bottom[0][0], CellValue::text("Total"));
    assert_eq!(bottom[0][1], CellValue::Number(60.0));
    assert_eq!(bottom[1][1], CellValue::Number(20.0));
    // (10*2 + 30*4 + 20*3) / 60
    let weighted = bottom[0][2].as_number().unwrap();
    assert!((weighted - 200.0 / 60.0).abs() < 1e-9);
    // A single bottom value repeats on every row
    assert_eq!(bottom[1][0], CellValue::text("Total"));
}

#[test]
fn test_value_key_and_first_sort_direction() {
    let mut state = TableConfig::from_json(SALES_TABLE)
        .unwrap()
        .into_state(&sales())
        .unwrap();

    let (sort, rows) = state.sort_by("change").unwrap();
    assert_eq!(sort.direction, SortDirection::Descending);
    assert_eq!(numbers(rows, "delta"), vec![0.5, 0.0, -1.25]);
}

#[test]
fn test_config_round_trips_through_json() {
    let config = TableConfig::from_json(SALES_TABLE).unwrap();
    let json = config.to_json().unwrap();
    assert_eq!(TableConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_missing_columns_field_is_error() {
    let err = TableConfig::from_json(r#"{"options": {}}"#).unwrap_err();
    assert!(matches!(err, TableError::Json(_)));
}
