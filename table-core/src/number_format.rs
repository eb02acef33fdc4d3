//! FILENAME: table-core/src/number_format.rs
//! PURPOSE: Number formatting utilities for displaying cell values.
//! CONTEXT: Column renderers use these to turn raw numbers (or summary
//! values) into display text. Values that do not read as numbers are
//! passed through untouched.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// How a numeric cell is turned into text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NumberFormat {
    /// Fixed decimal places, e.g. `1234.50`.
    #[serde(rename_all = "camelCase")]
    Decimal {
        decimal_places: u8,
        #[serde(default)]
        use_thousands_separator: bool,
    },
    /// Fixed decimal places with an explicit `+` on positive values.
    #[serde(rename_all = "camelCase")]
    PlusMinus { decimal_places: u8 },
    /// Value multiplied by 100 with a trailing `%`.
    #[serde(rename_all = "camelCase")]
    Percent { decimal_places: u8 },
}

impl NumberFormat {
    pub fn decimal(decimal_places: u8) -> NumberFormat {
        NumberFormat::Decimal {
            decimal_places,
            use_thousands_separator: false,
        }
    }

    pub fn decimal_with_separators(decimal_places: u8) -> NumberFormat {
        NumberFormat::Decimal {
            decimal_places,
            use_thousands_separator: true,
        }
    }

    pub fn plus_minus(decimal_places: u8) -> NumberFormat {
        NumberFormat::PlusMinus { decimal_places }
    }

    pub fn percent(decimal_places: u8) -> NumberFormat {
        NumberFormat::Percent { decimal_places }
    }
}

/// Format a number according to the specified format.
pub fn format_number(value: f64, format: &NumberFormat) -> String {
    match format {
        NumberFormat::Decimal {
            decimal_places,
            use_thousands_separator,
        } => format_decimal(value, *decimal_places, *use_thousands_separator),
        NumberFormat::PlusMinus { decimal_places } => plus_minus_format(*decimal_places, value),
        NumberFormat::Percent { decimal_places } => percent_format(*decimal_places, value),
    }
}

/// Format a cell value. Non-numeric values, including text with anything
/// besides a number in it, are returned unchanged.
pub fn format_value(value: &CellValue, format: &NumberFormat) -> CellValue {
    match value.as_exact_number() {
        Some(n) => CellValue::Text(format_number(n, format)),
        None => value.clone(),
    }
}

/// Fixed number of decimal places.
pub fn dec_format(decimal_places: u8, value: f64) -> String {
    format_decimal(value, decimal_places, false)
}

/// Fixed decimal places, with `+` prepended to positive values.
pub fn plus_minus_format(decimal_places: u8, value: f64) -> String {
    let formatted = dec_format(decimal_places, value);
    if value > 0.0 {
        format!("+{}", formatted)
    } else {
        formatted
    }
}

/// Format a number as percentage.
pub fn percent_format(decimal_places: u8, value: f64) -> String {
    let percentage = value * 100.0;
    format!("{:.prec$}%", percentage, prec = decimal_places as usize)
}

/// Format a number with specified decimal places and optional thousands separator.
fn format_decimal(value: f64, decimal_places: u8, use_thousands_separator: bool) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places as usize);

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dec_format() {
        assert_eq!(dec_format(2, 3.14159), "3.14");
        assert_eq!(dec_format(0, 2.7), "3");
        assert_eq!(dec_format(1, -0.26), "-0.3");
    }

    #[test]
    fn test_plus_minus_format() {
        assert_eq!(plus_minus_format(1, 1.26), "+1.3");
        assert_eq!(plus_minus_format(1, -1.26), "-1.3");
        assert_eq!(plus_minus_format(1, 0.0), "0.0");
    }

    #[test]
    fn test_percent_format() {
        assert_eq!(percent_format(1, 0.256), "25.6%");
        assert_eq!(percent_format(0, 1.0), "100%");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(
            format_number(1234567.891, &NumberFormat::decimal_with_separators(2)),
            "1,234,567.89"
        );
        assert_eq!(
            format_number(-1234.0, &NumberFormat::decimal_with_separators(0)),
            "-1,234"
        );
        assert_eq!(format_number(999.0, &NumberFormat::decimal_with_separators(0)), "999");
    }

    #[test]
    fn test_format_value_passes_non_numbers_through() {
        let format = NumberFormat::decimal(1);
        assert_eq!(format_value(&CellValue::Number(2.0), &format), CellValue::text("2.0"));
        assert_eq!(format_value(&CellValue::text("abc"), &format), CellValue::text("abc"));
        assert_eq!(format_value(&CellValue::Empty, &format), CellValue::Empty);
    }

    #[test]
    fn test_format_value_keeps_text_with_units() {
        let format = NumberFormat::decimal(2);
        assert_eq!(format_value(&CellValue::text("12px"), &format), CellValue::text("12px"));
        assert_eq!(format_value(&CellValue::text(" 12 "), &format), CellValue::text("12.00"));
    }

    #[test]
    fn test_number_format_from_json() {
        let format: NumberFormat =
            serde_json::from_str(r#"{"kind": "plusMinus", "decimalPlaces": 2}"#).unwrap();
        assert_eq!(format, NumberFormat::plus_minus(2));
    }
}
