use serde_json::Value;

use super::vocab::{FINE_ART_MARKER, SUBJECTS};
use super::{as_list, string_list};
use crate::error::NormalizeError;

pub fn normalize(raw: &Value) -> Result<Value, NormalizeError> {
    let terms = string_list(as_list(raw)?)?;
    Ok(Value::from(translate(&terms)))
}

pub fn translate(terms: &[&str]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| t != FINE_ART_MARKER)
        .map(|t| SUBJECTS.translate(&t))
        .collect()
}
