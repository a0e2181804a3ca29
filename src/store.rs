use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::pipeline::NormalizedRecord;

/// Write each record to `<dir>/<uuid>.json`, replacing any earlier output.
pub fn save_records(dir: &Path, records: &[NormalizedRecord]) -> Result<usize> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    for record in records {
        save_record(dir, record)?;
    }
    Ok(records.len())
}

pub fn save_record(dir: &Path, record: &NormalizedRecord) -> Result<PathBuf> {
    let uuid = record.storage_key()?;
    let path = dir.join(format!("{}.json", uuid));
    // serde_json maps are sorted, so output is byte-stable
    let text = serde_json::to_string_pretty(record)?;
    fs::write(&path, text).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(path)
}

/// Stage-1 outputs in `dir`, sorted by file name.
pub fn list_records(dir: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {:?}", dir))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    if let Some(n) = limit {
        paths.truncate(n);
    }
    Ok(paths)
}

pub fn load_record(path: &Path) -> Result<NormalizedRecord> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let value = serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {:?}", path))?;
    NormalizedRecord::from_value(value).with_context(|| format!("Not a record: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> NormalizedRecord {
        NormalizedRecord::from_value(value).unwrap()
    }

    #[test]
    fn writes_one_file_per_uuid() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("raw");
        let n = save_records(
            &out,
            &[record(json!({ "uuid": "B", "z": 1, "a": 2 })), record(json!({ "uuid": "A" }))],
        )
        .unwrap();
        assert_eq!(n, 2);

        let listed = list_records(&out, None).unwrap();
        let names: Vec<_> = listed.iter().map(|p| p.file_name().unwrap().to_str().unwrap()).collect();
        assert_eq!(names, vec!["A.json", "B.json"]);

        let text = fs::read_to_string(out.join("B.json")).unwrap();
        assert_eq!(text, "{\n  \"a\": 2,\n  \"uuid\": \"B\",\n  \"z\": 1\n}");
        assert_eq!(load_record(&out.join("B.json")).unwrap().get("z"), Some(&json!(1)));
    }

    #[test]
    fn rewriting_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let r = record(json!({ "uuid": "A", "subjects": ["landscape"], "measurements": {} }));
        let path = save_record(dir.path(), &r).unwrap();
        let first = fs::read(&path).unwrap();
        save_record(dir.path(), &r).unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn rejects_unsafe_names() {
        let dir = tempfile::tempdir().unwrap();
        assert!(save_record(dir.path(), &record(json!({ "uuid": "../x" }))).is_err());
        assert!(save_record(dir.path(), &record(json!({ "title": "no uuid" }))).is_err());
    }

    #[test]
    fn listing_honours_limit_and_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.json", "a.json", "b.json"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::write(dir.path().join("README.md"), "# stage 1 output").unwrap();
        let listed = list_records(dir.path(), Some(2)).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].ends_with("a.json"));
        assert!(load_record(&dir.path().join("README.md")).is_err());
    }
}
