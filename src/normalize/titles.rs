use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::vocab::TITLE_STATUS;
use super::{as_list, opt_str_field, str_field};
use crate::error::NormalizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStatus {
    Current,
    Original,
}

/// language code -> status -> titles, in source order.
pub type TitleSet = BTreeMap<String, BTreeMap<TitleStatus, Vec<String>>>;

pub fn collect(raw: &Value) -> Result<TitleSet, NormalizeError> {
    let mut out = TitleSet::new();

    for block in as_list(raw)? {
        if is_blank(block) {
            continue;
        }
        let language = str_field(block, "language")?.trim().to_lowercase();
        let status_raw = opt_str_field(block, "status")?
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|| "current".to_string());
        let status = TITLE_STATUS
            .lookup(&status_raw)
            .ok_or(NormalizeError::UnknownTitleStatus(status_raw))?;
        let title = str_field(block, "title")?.trim().to_string();

        out.entry(language)
            .or_default()
            .entry(status)
            .or_default()
            .push(title);
    }

    Ok(out)
}

pub fn normalize(raw: &Value) -> Result<Value, NormalizeError> {
    let titles = collect(raw)?;
    serde_json::to_value(&titles).map_err(|_| NormalizeError::shape("title list", raw))
}

fn is_blank(block: &Value) -> bool {
    match block {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_by_language_and_status() {
        let raw = json!([
            { "language": "NO", "status": "Anvendt", "title": "Hus ved veien [Tegning]" },
            { "language": "EN", "title": "House by the Road " },
            { "language": "NO", "status": "original", "title": "Hus ved Veien" },
            { "language": "no", "title": "Hus ved en vei" }
        ]);
        assert_eq!(
            normalize(&raw).unwrap(),
            json!({
                "en": { "current": ["House by the Road"] },
                "no": {
                    "current": ["Hus ved veien [Tegning]", "Hus ved en vei"],
                    "original": ["Hus ved Veien"]
                }
            })
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let raw = json!([
            { "language": "NO", "title": "Fjordlandskap" },
            { "language": "NO", "title": "Fjordlandskap" }
        ]);
        let titles = collect(&raw).unwrap();
        assert_eq!(titles["no"][&TitleStatus::Current].len(), 2);
    }

    #[test]
    fn skips_null_and_empty_blocks() {
        let raw = json!([null, {}, { "language": "NO", "title": "Vinter" }]);
        assert_eq!(normalize(&raw).unwrap(), json!({ "no": { "current": ["Vinter"] } }));
    }

    #[test]
    fn unknown_status_fails_the_field() {
        let raw = json!([{ "language": "NO", "status": "Tidligere", "title": "X" }]);
        assert_eq!(
            collect(&raw).unwrap_err(),
            NormalizeError::UnknownTitleStatus("tidligere".into())
        );
    }

    #[test]
    fn null_status_means_current() {
        let raw = json!([{ "language": "NO", "status": null, "title": "X" }]);
        assert_eq!(normalize(&raw).unwrap(), json!({ "no": { "current": ["X"] } }));
    }
}
