//! Conversion of reader-native cell values into plain JSON values.
//!
//! Each conversion step is fallible and returns `Option`; when every step
//! declines, the original value is kept (rendered as text).

use calamine::Data;
use serde_json::{Number, Value};

use crate::model::{Record, SanitizedRow};

/// Unwrap a numeric, boolean or string cell into its JSON equivalent.
pub fn unwrap_scalar(cell: &Data) -> Option<Value> {
    match cell {
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => float_to_json(*f),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::String(s) => Some(Value::String(s.clone())),
        _ => None,
    }
}

/// Convert a date/time cell to an ISO-8601 string.
pub fn to_timestamp(cell: &Data) -> Option<Value> {
    match cell {
        Data::DateTime(dt) if !dt.is_duration() => {
            let ts = dt.as_datetime()?;
            Some(Value::String(ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
        }
        Data::DateTimeIso(s) => Some(Value::String(s.clone())),
        _ => None,
    }
}

/// Normalize one cell; `None` stays null.
pub fn normalize_scalar(cell: Option<&Data>) -> Value {
    let Some(cell) = cell else {
        return Value::Null;
    };
    unwrap_scalar(cell)
        .or_else(|| to_timestamp(cell))
        .unwrap_or_else(|| Value::String(cell.to_string()))
}

/// Normalize every cell of every row, keeping row order.
pub fn normalize_rows(rows: &[SanitizedRow]) -> Vec<Record> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(column, cell)| (column.clone(), normalize_scalar(cell.as_ref())))
                .collect()
        })
        .collect()
}

/// A balance bound as JSON; absent or non-finite bounds become null.
pub fn normalize_bound(bound: Option<f64>) -> Value {
    bound.and_then(float_to_json).unwrap_or(Value::Null)
}

fn float_to_json(f: f64) -> Option<Value> {
    Number::from_f64(f).map(Value::Number)
}
