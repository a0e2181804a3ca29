use serde_json::Value;

pub fn digitaltmuseum_link(unique_id: &str) -> String {
    format!("https://digitaltmuseum.org/{}", unique_id)
}

pub fn uuid_link(uuid: &str) -> String {
    format!("https://api.dimu.org/artifact/uuid/{}", uuid)
}

/// The museum's own site spells "&" in inventory numbers as "_".
pub fn nasjonalmuseet_link(identifier_id: &str) -> String {
    format!(
        "https://www.nasjonalmuseet.no/en/collection/object/{}",
        identifier_id.replace('&', "_")
    )
}

/// Fill in the public links a search document lacks. Existing values win.
pub fn with_links(doc: &Value) -> Value {
    let mut out = doc.clone();
    let Some(map) = out.as_object_mut() else {
        return out;
    };

    let derived = [
        ("digitaltmuseum_link", "artifact.uniqueId", digitaltmuseum_link as fn(&str) -> String),
        ("nasjonalmuseet_link", "identifier.id", nasjonalmuseet_link),
        ("uuid_link", "artifact.uuid", uuid_link),
    ];
    for (link_key, source_key, build) in derived {
        if map.contains_key(link_key) {
            continue;
        }
        if let Some(id) = map.get(source_key).and_then(Value::as_str) {
            let link = build(id.trim());
            map.insert(link_key.to_string(), Value::String(link));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_links_from_identifiers() {
        let doc = json!({
            "identifier.id": "NG.K&H.B.06516-014",
            "artifact.uuid": "8F24C0CF-5D35-4916-B979-ECFF8BA19E99",
            "artifact.uniqueId": "011042536344"
        });
        let out = with_links(&doc);
        assert_eq!(out["digitaltmuseum_link"], "https://digitaltmuseum.org/011042536344");
        assert_eq!(
            out["nasjonalmuseet_link"],
            "https://www.nasjonalmuseet.no/en/collection/object/NG.K_H.B.06516-014"
        );
        assert_eq!(
            out["uuid_link"],
            "https://api.dimu.org/artifact/uuid/8F24C0CF-5D35-4916-B979-ECFF8BA19E99"
        );
        assert!(doc.get("uuid_link").is_none());
    }

    #[test]
    fn keeps_existing_links() {
        let doc = json!({
            "artifact.uniqueId": "011042536344",
            "digitaltmuseum_link": "https://example.org/kept"
        });
        let out = with_links(&doc);
        assert_eq!(out["digitaltmuseum_link"], "https://example.org/kept");
        assert!(out.get("nasjonalmuseet_link").is_none());
    }

    #[test]
    fn non_objects_untouched() {
        assert_eq!(with_links(&json!([1, 2])), json!([1, 2]));
    }
}
