//! Raw search documents from disk.
//!
//! Accepts one document, a list of documents, a search-response page
//! (`{"response": {"docs": [...]}}`), or a directory of such files read in
//! filename order. Every document comes back with its public links filled in.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::links;

pub fn load(path: &Path) -> Result<Vec<Value>> {
    let docs = if path.is_dir() {
        load_dir(path)?
    } else {
        load_file(path)?
    };
    info!(path = %path.display(), docs = docs.len(), "loaded search documents");
    Ok(docs.iter().map(links::with_links).collect())
}

fn load_dir(dir: &Path) -> Result<Vec<Value>> {
    let mut pages: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {:?}", dir))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    pages.sort();

    let mut docs = Vec::new();
    for page in &pages {
        let page_docs = load_file(page)?;
        debug!(page = %page.display(), docs = page_docs.len(), "page read");
        docs.extend(page_docs);
    }
    Ok(docs)
}

fn load_file(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let value: Value =
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {:?}", path))?;
    docs_of(value).with_context(|| format!("Unrecognized layout in {:?}", path))
}

/// Unwrap whatever container the documents arrived in.
pub fn docs_of(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(docs) => Ok(docs),
        Value::Object(mut map) => match map.remove("response") {
            None => Ok(vec![Value::Object(map)]),
            Some(Value::Object(mut response)) => match response.remove("docs") {
                Some(Value::Array(docs)) => Ok(docs),
                _ => bail!("search response without a 'docs' list"),
            },
            Some(_) => bail!("'response' is not an object"),
        },
        _ => bail!("expected a document, a list of documents or a search response"),
    }
}
