use serde_json::Value;

use super::timestamp;
use crate::error::NormalizeError;

pub fn string(raw: &Value) -> Result<Value, NormalizeError> {
    raw.as_str()
        .map(|s| Value::String(s.trim().to_string()))
        .ok_or_else(|| NormalizeError::shape("string", raw))
}

pub fn integer(raw: &Value) -> Result<Value, NormalizeError> {
    if raw.is_i64() || raw.is_u64() {
        Ok(raw.clone())
    } else {
        Err(NormalizeError::shape("integer", raw))
    }
}

pub fn calendar_date(raw: &Value) -> Result<Value, NormalizeError> {
    let s = raw
        .as_str()
        .ok_or_else(|| NormalizeError::shape("timestamp string", raw))?;
    timestamp::calendar_date(s).map(Value::String)
}

pub fn instant(raw: &Value) -> Result<Value, NormalizeError> {
    let s = raw
        .as_str()
        .ok_or_else(|| NormalizeError::shape("timestamp string", raw))?;
    timestamp::instant(s).map(Value::String)
}
