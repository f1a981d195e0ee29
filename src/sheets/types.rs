//! Data types for the Sheets `values.get` response and the rows shaped from it.
//!
//! The wire type [`ValueRange`] is deserialized as-is; [`Dataset`] and [`Row`]
//! are the shaped form handed to the table renderer and the chart adapter.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body returned by `GET /v4/spreadsheets/{id}/values/{range}`.
///
/// Every field is optional on the wire: a missing `values` is how the API
/// reports an empty range, and is treated as a malformed response here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<Vec<Value>>>,
}

/// A single cell of a row. Absent cells (short rows) display as `undefined`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell(Option<String>);

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self(Some(text.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }

    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => Self(None),
            Some(Value::String(text)) => Self(Some(text.clone())),
            Some(other) => Self(Some(other.to_string())),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// Lenient numeric reading: the longest leading decimal literal, or NaN.
    pub fn number(&self) -> f64 {
        self.0.as_deref().map_or(f64::NAN, parse_leading_float)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(text) => f.write_str(text),
            None => f.write_str("undefined"),
        }
    }
}

/// One production record: who produced how much of what, in which period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub period: Cell,
    pub person: Cell,
    pub process: Cell,
    pub produced: Cell,
    pub expected: Cell,
    pub yield_ratio: Cell,
    pub absenteeism: Cell,
}

impl Row {
    /// Number of columns a row carries; extra sheet columns are ignored.
    pub const WIDTH: usize = 7;

    pub fn from_values(values: &[Value]) -> Self {
        let cell = |index: usize| Cell::from_value(values.get(index));
        Self {
            period: cell(0),
            person: cell(1),
            process: cell(2),
            produced: cell(3),
            expected: cell(4),
            yield_ratio: cell(5),
            absenteeism: cell(6),
        }
    }

    /// Cells in column order.
    pub fn cells(&self) -> [&Cell; Row::WIDTH] {
        [
            &self.period,
            &self.person,
            &self.process,
            &self.produced,
            &self.expected,
            &self.yield_ratio,
            &self.absenteeism,
        ]
    }
}

/// The data rows of one successful fetch, header excluded.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub rows: Vec<Row>,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Shapes raw sheet values into rows. The first row is always the header
    /// and is dropped without inspection.
    pub fn from_values(values: &[Vec<Value>]) -> Self {
        Self {
            rows: values.iter().skip(1).map(|row| Row::from_values(row)).collect(),
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// Reads the longest decimal literal at the start of `text` ("12.5 kg" -> 12.5).
fn parse_leading_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}
