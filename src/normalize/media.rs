//! Techniques and materials: the two halves of an artwork's medium.

use itertools::Itertools;
use serde_json::Value;

use super::vocab::{MATERIALS, TECHNIQUES};
use super::{as_list, sort_key, str_field};
use crate::error::NormalizeError;

pub fn techniques(raw: &Value) -> Result<Value, NormalizeError> {
    let out = as_list(raw)?
        .iter()
        .map(|row| str_field(row, "technique"))
        .map_ok(|t| TECHNIQUES.translate(&t.trim().to_lowercase()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::from(out))
}

/// Materials keep the source's `sort` order, which encodes application order
/// ("watercolour over pencil on cardboard").
pub fn materials(raw: &Value) -> Result<Value, NormalizeError> {
    let rows = as_list(raw)?
        .iter()
        .map(|row| -> Result<_, NormalizeError> {
            Ok((sort_key(row)?, str_field(row, "material")?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let out: Vec<String> = rows
        .into_iter()
        .sorted_by_key(|(sort, _)| *sort)
        .map(|(_, material)| MATERIALS.translate(&material.trim().to_lowercase()))
        .collect();
    Ok(Value::from(out))
}
