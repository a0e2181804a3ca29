//! Stage 1 turns a raw search document into a [`NormalizedRecord`]; stage 2
//! re-reads that record and attaches its `creation_date`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::dating;
use crate::error::{NormalizeError, RecordFailure};
use crate::path::{self, Segment};
use crate::registry::{self, FieldRule, CREATION_DATE, DESCRIPTIVE_DATE, FROM_DATE, TO_DATE, UUID};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Flat, key-sorted field set of one artwork, keyed for storage by `uuid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    fields: Map<String, Value>,
}

impl NormalizedRecord {
    pub fn from_value(value: Value) -> Result<Self, NormalizeError> {
        match value {
            Value::Object(fields) => Ok(NormalizedRecord { fields }),
            other => Err(NormalizeError::shape("object", &other)),
        }
    }

    pub fn uuid(&self) -> Option<&str> {
        self.get_str(UUID).filter(|u| !u.is_empty())
    }

    /// The uuid, checked for use as an output file name.
    pub fn storage_key(&self) -> Result<&str, NormalizeError> {
        let uuid = self.uuid().ok_or(NormalizeError::MissingUuid)?;
        if uuid.contains(['/', '\\']) || uuid.starts_with('.') {
            return Err(NormalizeError::UnusableUuid(uuid.to_string()));
        }
        Ok(uuid)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }
}

/// A field that was present in the source but could not be normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct OmittedField {
    pub field: &'static str,
    pub reason: NormalizeError,
}

#[derive(Debug, Clone)]
pub struct Extracted {
    pub record: NormalizedRecord,
    pub omitted: Vec<OmittedField>,
}

/// Best available label for log lines about a raw document.
pub fn record_label(doc: &Value) -> String {
    const CANDIDATES: [&[Segment]; 2] = [
        &[Segment::Key("artifact.uuid")],
        &[Segment::Key("identifier.id")],
    ];
    CANDIDATES
        .iter()
        .find_map(|p| path::resolve(doc, p).and_then(Value::as_str))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "<unidentified>".to_string())
}

/// Stage 1 over the default registry.
pub fn normalize_record(doc: &Value) -> Result<Extracted, RecordFailure> {
    normalize_with(registry::FIELDS, doc)
}

pub fn normalize_with(rules: &[FieldRule], doc: &Value) -> Result<Extracted, RecordFailure> {
    let fail = |reason| RecordFailure {
        record_id: record_label(doc),
        reason,
    };

    let mut fields = Map::new();
    let mut omitted = Vec::new();

    for rule in rules {
        let Some(raw) = path::resolve(doc, rule.path) else {
            debug!(field = rule.field, path = %path::display(rule.path), "not present");
            continue;
        };
        match (rule.normalizer)(raw) {
            Ok(value) => {
                fields.insert(rule.field.to_string(), value);
            }
            Err(e) if e.is_record_fatal() => return Err(fail(e)),
            Err(e) => {
                warn!(record = %record_label(doc), field = rule.field, error = %e, "field omitted");
                omitted.push(OmittedField {
                    field: rule.field,
                    reason: e,
                });
            }
        }
    }

    // half a timespan would be invented precision downstream
    let broken_date = omitted
        .iter()
        .filter(|o| o.field == FROM_DATE || o.field == TO_DATE)
        .any(|o| matches!(o.reason, NormalizeError::MalformedTimestamp(_)));
    if broken_date {
        for field in [FROM_DATE, TO_DATE] {
            if fields.remove(field).is_some() {
                warn!(record = %record_label(doc), field, "dropped with its malformed counterpart");
            }
        }
    }

    let record = NormalizedRecord { fields };
    if let Err(reason) = record.storage_key() {
        return Err(fail(reason));
    }
    Ok(Extracted { record, omitted })
}

/// Stage 2: attach `creation_date` resolved from the stage-1 date fields.
///
/// A record with nothing to date from is returned unchanged.
pub fn attach_creation_date(mut record: NormalizedRecord) -> Result<NormalizedRecord, RecordFailure> {
    let uuid = match record.storage_key() {
        Ok(uuid) => uuid.to_string(),
        Err(reason) => {
            return Err(RecordFailure {
                record_id: record.uuid().unwrap_or("<unidentified>").to_string(),
                reason,
            })
        }
    };

    let resolved = dating::resolve(
        record.get_str(FROM_DATE),
        record.get_str(TO_DATE),
        record.get_str(DESCRIPTIVE_DATE),
    );

    match resolved {
        Ok(Some(date)) => {
            let value = serde_json::to_value(&date).map_err(|_| RecordFailure {
                record_id: uuid.clone(),
                reason: NormalizeError::shape("creation date", &Value::Null),
            })?;
            record.fields.insert(CREATION_DATE.to_string(), value);
        }
        Ok(None) => debug!(record = %uuid, "no date information"),
        Err(e) if e.is_record_fatal() => {
            return Err(RecordFailure {
                record_id: uuid,
                reason: e,
            })
        }
        Err(e) => warn!(record = %uuid, error = %e, "creation_date omitted"),
    }
    Ok(record)
}

/// Both stages in memory.
pub fn normalize_and_date(doc: &Value) -> Result<Extracted, RecordFailure> {
    let Extracted { record, omitted } = normalize_record(doc)?;
    let record = attach_creation_date(record)?;
    Ok(Extracted { record, omitted })
}

/// Apply `f` to every item, in parallel when the `rayon` feature is on.
/// Output order matches input order.
#[cfg(feature = "rayon")]
pub fn map_records<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    items.par_iter().map(f).collect()
}

#[cfg(not(feature = "rayon"))]
pub fn map_records<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    F: Fn(&T) -> R,
{
    items.iter().map(f).collect()
}
