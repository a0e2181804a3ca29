use std::collections::BTreeMap;

use itertools::Itertools;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::warn;

use super::vocab::{MEASURE_DIMENSIONS, MEASURE_PARTS};
use super::{as_list, str_field};
use crate::error::NormalizeError;

/// Physical component of an artwork that carries its own dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    MainObject,
    Frame,
    Paper,
    EtchingPlate,
    Page,
    Image,
}

impl Part {
    pub fn key(self) -> &'static str {
        match self {
            Part::MainObject => "main_object",
            Part::Frame => "frame",
            Part::Paper => "paper",
            Part::EtchingPlate => "etching_plate",
            Part::Page => "page",
            Part::Image => "image",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dimension {
    Height,
    Width,
    Depth,
}

impl Dimension {
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Height => "height",
            Dimension::Width => "width",
            Dimension::Depth => "depth",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub value: Value,
    pub unit: String,
}

/// Dimensions of one part. Serializes flat, `height` next to `height_unit`,
/// so a unit can never appear without its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartDimensions(BTreeMap<Dimension, Measure>);

impl PartDimensions {
    #[cfg(test)]
    pub fn get(&self, dim: Dimension) -> Option<&Measure> {
        self.0.get(&dim)
    }

    fn check_units(&self, part: Part) -> Result<(), NormalizeError> {
        let units: Vec<&str> = self.0.values().map(|m| m.unit.as_str()).unique().collect();
        if units.len() > 1 {
            return Err(NormalizeError::InconsistentUnits {
                part: part.key(),
                units: units.join(", "),
            });
        }
        Ok(())
    }
}

impl Serialize for PartDimensions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len() * 2))?;
        for (dim, measure) in &self.0 {
            map.serialize_entry(dim.key(), &measure.value)?;
            map.serialize_entry(&format!("{}_unit", dim.key()), &measure.unit)?;
        }
        map.end()
    }
}

pub type MeasurementSet = BTreeMap<Part, PartDimensions>;

pub fn collect(raw: &Value) -> Result<MeasurementSet, NormalizeError> {
    let mut parts = MeasurementSet::new();

    for entry in as_list(raw)? {
        let category = str_field(entry, "category")?;
        let Some(part) = MEASURE_PARTS.lookup(category) else {
            warn!(table = MEASURE_PARTS.name, category, "unknown term, skipping entry");
            continue;
        };
        let kind = str_field(entry, "type")?;
        let Some(dim) = MEASURE_DIMENSIONS.lookup(kind) else {
            warn!(table = MEASURE_DIMENSIONS.name, dimension = kind, "unknown term, skipping entry");
            continue;
        };

        let value = entry
            .get("measure")
            .cloned()
            .ok_or_else(|| NormalizeError::shape("object with 'measure'", entry))?;
        let unit = str_field(entry, "unit")?.trim().to_string();

        parts
            .entry(part)
            .or_default()
            .0
            .insert(dim, Measure { value, unit });
    }

    for (part, dims) in &parts {
        dims.check_units(*part)?;
    }
    Ok(parts)
}

pub fn normalize(raw: &Value) -> Result<Value, NormalizeError> {
    let parts = collect(raw)?;
    serde_json::to_value(&parts).map_err(|_| NormalizeError::shape("measurement list", raw))
}
