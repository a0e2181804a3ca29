pub mod locations;
pub mod measurements;
pub mod media;
pub mod scalar;
pub mod subjects;
pub mod timestamp;
pub mod titles;
pub mod vocab;

use serde_json::Value;

use crate::error::NormalizeError;

/// A pure transform from one raw JSON fragment to its canonical value.
pub type Normalizer = fn(&Value) -> Result<Value, NormalizeError>;

fn as_list(raw: &Value) -> Result<&Vec<Value>, NormalizeError> {
    raw.as_array().ok_or_else(|| NormalizeError::shape("list", raw))
}

fn string_list(items: &[Value]) -> Result<Vec<&str>, NormalizeError> {
    items
        .iter()
        .map(|v| v.as_str().ok_or_else(|| NormalizeError::shape("string", v)))
        .collect()
}

fn str_field<'a>(row: &'a Value, key: &'static str) -> Result<&'a str, NormalizeError> {
    match row.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(NormalizeError::shape("string", other)),
        None => Err(NormalizeError::shape("object with string fields", row)),
    }
}

/// Absent and `null` both read as `None`.
fn opt_str_field<'a>(row: &'a Value, key: &'static str) -> Result<Option<&'a str>, NormalizeError> {
    match row.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(NormalizeError::shape("string or null", other)),
    }
}

/// The source's `sort` key, either an integer or a numeric string.
fn sort_key(row: &Value) -> Result<i64, NormalizeError> {
    let raw = row
        .get("sort")
        .ok_or_else(|| NormalizeError::shape("object with 'sort'", row))?;
    raw.as_i64()
        .or_else(|| raw.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| NormalizeError::shape("integer sort key", raw))
}
