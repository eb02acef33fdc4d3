//! FILENAME: table-core/src/cell.rs
//! PURPOSE: Defines the value held by a single cell of a row.
//! CONTEXT: `CellValue` is what accessors produce, what comparators compare
//! and what renderers return. `Empty` stands in for a missing (null) value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The raw data within a cell, or the display value produced for it.
///
/// Deserializes from plain JSON scalars: `null`, booleans, numbers and strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// True for the absent value.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Reads the value as a float the way a lenient number parser would.
    ///
    /// Numbers are returned as-is (NaN counts as no number), text is parsed
    /// from its longest numeric prefix ("12px" -> 12). Booleans and empty
    /// cells have no numeric reading.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            CellValue::Number(_) => None,
            CellValue::Text(s) => float_prefix(s.trim_start()).map(|(n, _)| n),
            CellValue::Boolean(_) | CellValue::Empty => None,
        }
    }

    /// Like [`as_number`](Self::as_number), but text only counts when the
    /// whole text (ignoring surrounding whitespace) is a number.
    pub fn as_exact_number(&self) -> Option<f64> {
        match self {
            CellValue::Text(s) => {
                let trimmed = s.trim();
                match float_prefix(trimmed) {
                    Some((n, end)) if end == trimmed.len() => Some(n),
                    _ => None,
                }
            }
            other => other.as_number(),
        }
    }

    /// Coerces the value to text.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
        }
    }

    /// Rank used when values of different kinds meet in a comparison.
    /// Numbers < Text < Booleans < Empty
    pub fn type_order(&self) -> u8 {
        match self {
            CellValue::Number(_) => 0,
            CellValue::Text(_) => 1,
            CellValue::Boolean(_) => 2,
            CellValue::Empty => 3,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// Parses the longest leading float literal of `trimmed`, returning the value
/// and the byte length consumed. Accepts an optional sign, digits with an
/// optional fraction, an optional exponent, and the literal `Infinity`.
fn float_prefix(trimmed: &str) -> Option<(f64, usize)> {
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    if trimmed[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        let value = if negative { f64::NEG_INFINITY } else { f64::INFINITY };
        return Some((value, end + "Infinity".len()));
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts if at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().ok().map(|n| (n, end))
}
