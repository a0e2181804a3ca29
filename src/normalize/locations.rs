use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

use super::vocab::{PLACE_NAMES, PLACE_TYPES, ROLE_TYPES};
use super::{as_list, opt_str_field, sort_key, str_field};
use crate::error::NormalizeError;

/// How a place relates to the artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    DepictedLocation,
    ProducedAt,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceName {
    pub name: String,
    pub level: Value,
    pub place_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_accuracy: Option<String>,
    /// Coarse to fine, as sorted by the source.
    pub place_names: Vec<PlaceName>,
    /// Fine to coarse, e.g. "Slinde, Sogndal, Norway".
    pub human_name: String,
}

pub type LocationSet = BTreeMap<RoleType, Vec<Place>>;

pub fn collect(raw: &Value) -> Result<LocationSet, NormalizeError> {
    let mut out = LocationSet::new();

    for record in as_list(raw)? {
        let role = record
            .get("role")
            .ok_or_else(|| NormalizeError::shape("place with 'role'", record))?;
        let role_name = str_field(role, "name")?.trim().to_lowercase();
        let role_type = ROLE_TYPES
            .lookup(&role_name)
            .ok_or(NormalizeError::UnknownRoleType(role_name))?;

        let place = build_place(record, role)?;
        out.entry(role_type).or_default().push(place);
    }

    Ok(out)
}

pub fn normalize(raw: &Value) -> Result<Value, NormalizeError> {
    let locations = collect(raw)?;
    serde_json::to_value(&locations).map_err(|_| NormalizeError::shape("place list", raw))
}

fn build_place(record: &Value, role: &Value) -> Result<Place, NormalizeError> {
    let coordinates = record
        .get("coordinate")
        .filter(|c| is_present(c))
        .cloned();
    let place_accuracy = opt_str_field(role, "status")?
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let fields = record
        .get("fields")
        .map(as_list)
        .transpose()?
        .map(|f| f.as_slice())
        .unwrap_or_default();

    let keyed = fields
        .iter()
        .map(|f| -> Result<_, NormalizeError> { Ok((sort_key(f)?, f)) })
        .collect::<Result<Vec<_>, _>>()?;

    let place_names = keyed
        .into_iter()
        .sorted_by_key(|(sort, _)| *sort)
        .map(|(_, field)| place_name(field))
        .collect::<Result<Vec<_>, _>>()?;

    let human_name = place_names.iter().rev().map(|p| p.name.as_str()).join(", ");

    Ok(Place {
        coordinates,
        place_accuracy,
        place_names,
        human_name,
    })
}

fn place_name(field: &Value) -> Result<PlaceName, NormalizeError> {
    let place_type = str_field(field, "name")?.trim().to_lowercase();
    let value = str_field(field, "value")?.trim();
    Ok(PlaceName {
        name: PLACE_NAMES.translate(value),
        level: field.get("number").cloned().unwrap_or(Value::Null),
        place_type: PLACE_TYPES.translate(&place_type),
    })
}

fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(name: &str, number: u32, value: &str, sort: i64) -> Value {
        json!({ "name": name, "number": number, "value": value, "sort": sort })
    }

    #[test]
    fn human_name_runs_fine_to_coarse() {
        let raw = json!([{
            "role": { "name": "Avbildet sted" },
            "fields": [
                field("Område", 3, "Jotunheimen", 3),
                field("Land", 1, "Norge", 1),
                field("Kommune", 2, "Lom", 2)
            ]
        }]);
        let locations = collect(&raw).unwrap();
        let place = &locations[&RoleType::DepictedLocation][0];
        assert_eq!(place.human_name, "Jotunheimen, Lom, Norway");
        let types: Vec<&str> = place.place_names.iter().map(|p| p.place_type.as_str()).collect();
        assert_eq!(types, vec!["country", "municipality", "area"]);
    }

    #[test]
    fn full_output_shape() {
        let raw = json!([{
            "coordinate": "61.2127, 7.1406",
            "role": { "name": "Produksjonssted", "status": "Usikker" },
            "fields": [ field("Land", 1, "Norge", 1), field("Kommune", 2, "6859 Sogndal", 2) ]
        }]);
        assert_eq!(
            normalize(&raw).unwrap(),
            json!({
                "produced_at": [{
                    "coordinates": "61.2127, 7.1406",
                    "place_accuracy": "Usikker",
                    "place_names": [
                        { "name": "Norway", "level": 1, "place_type": "country" },
                        { "name": "Slinde", "level": 2, "place_type": "municipality" }
                    ],
                    "human_name": "Slinde, Norway"
                }]
            })
        );
    }

    #[test]
    fn same_role_appends() {
        let raw = json!([
            { "role": { "name": "avbildet sted" }, "fields": [field("Land", 1, "Sveits", 1)] },
            { "role": { "name": "avbildet sted" }, "fields": [field("Land", 1, "Tyskland", 1)] }
        ]);
        let locations = collect(&raw).unwrap();
        let names: Vec<&str> = locations[&RoleType::DepictedLocation]
            .iter()
            .map(|p| p.human_name.as_str())
            .collect();
        assert_eq!(names, vec!["Switzerland", "Germany"]);
    }

    #[test]
    fn unknown_names_pass_through() {
        let raw = json!([{
            "role": { "name": "avbildet sted" },
            "fields": [ field("Gård", 4, " Bakken ", 1) ]
        }]);
        let place = &collect(&raw).unwrap()[&RoleType::DepictedLocation][0];
        assert_eq!(place.place_names[0].place_type, "gård");
        assert_eq!(place.place_names[0].name, "Bakken");
        assert!(place.coordinates.is_none());
        assert!(place.place_accuracy.is_none());
    }

    #[test]
    fn unknown_role_is_fatal() {
        let raw = json!([{ "role": { "name": "Oppbevaringssted" }, "fields": [] }]);
        let err = collect(&raw).unwrap_err();
        assert_eq!(err, NormalizeError::UnknownRoleType("oppbevaringssted".into()));
        assert!(err.is_record_fatal());
    }

    #[test]
    fn place_without_fields_has_empty_name() {
        let raw = json!([{ "role": { "name": "avbildet sted" }, "coordinate": "59.9, 10.7" }]);
        let place = &collect(&raw).unwrap()[&RoleType::DepictedLocation][0];
        assert!(place.place_names.is_empty());
        assert_eq!(place.human_name, "");
        assert_eq!(place.coordinates, Some(json!("59.9, 10.7")));
    }
}
