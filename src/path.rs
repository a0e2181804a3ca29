use std::fmt;

use serde_json::Value;

/// One step into a JSON tree: a mapping key or a sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Key(&'static str),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Walk `tree` one segment at a time.
///
/// Returns `None` as soon as a segment cannot be applied: missing key, index
/// out of range, or indexing into a scalar. A key against a sequence (or an
/// index against a mapping) is simply "not found".
pub fn resolve<'a>(tree: &'a Value, path: &[Segment]) -> Option<&'a Value> {
    path.iter().try_fold(tree, |current, segment| match segment {
        Segment::Key(key) => current.as_object()?.get(*key),
        Segment::Index(idx) => current.as_array()?.get(*idx),
    })
}

pub fn display(path: &[Segment]) -> String {
    path.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("/")
}
