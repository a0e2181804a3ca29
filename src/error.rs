use thiserror::Error;

/// Everything that can go wrong while normalizing one record.
///
/// Field-level variants cost the record a single field; record-level variants
/// (see [`NormalizeError::is_record_fatal`]) reject the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("timestamp '{0}' does not match YYYYMMDD-HHMMSS-ffffff")]
    MalformedTimestamp(String),
    #[error("date '{0}' is not a YYYY-MM-DD calendar date")]
    MalformedDate(String),
    #[error("unknown title status '{0}'")]
    UnknownTitleStatus(String),
    #[error("unknown location role '{0}'")]
    UnknownRoleType(String),
    #[error("measurements for '{part}' mix units: {units}")]
    InconsistentUnits { part: &'static str, units: String },
    #[error("no precision rule covers from={from} to={to} (descriptive: {descriptive:?})")]
    AmbiguousDatePrecision {
        from: String,
        to: String,
        descriptive: String,
    },
    #[error("only one of from_date/to_date is present")]
    IncompleteDateRange,
    #[error("record has no uuid")]
    MissingUuid,
    #[error("uuid '{0}' is not usable as a file name")]
    UnusableUuid(String),
}

impl NormalizeError {
    pub fn is_record_fatal(&self) -> bool {
        matches!(
            self,
            NormalizeError::UnknownRoleType(_)
                | NormalizeError::InconsistentUnits { .. }
                | NormalizeError::AmbiguousDatePrecision { .. }
                | NormalizeError::IncompleteDateRange
                | NormalizeError::MissingUuid
                | NormalizeError::UnusableUuid(_)
        )
    }

    pub(crate) fn shape(expected: &'static str, found: &serde_json::Value) -> Self {
        let found = match found {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "list",
            serde_json::Value::Object(_) => "object",
        };
        NormalizeError::UnexpectedShape { expected, found }
    }
}

/// A rejected record, reported without stopping the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub record_id: String,
    pub reason: NormalizeError,
}

impl std::fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.record_id, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_level_classification() {
        assert!(NormalizeError::UnknownRoleType("x".into()).is_record_fatal());
        assert!(NormalizeError::MissingUuid.is_record_fatal());
        assert!(NormalizeError::UnusableUuid("a/b".into()).is_record_fatal());
        assert!(NormalizeError::InconsistentUnits {
            part: "frame",
            units: "cm, mm".into()
        }
        .is_record_fatal());
        assert!(!NormalizeError::MalformedTimestamp("x".into()).is_record_fatal());
        assert!(!NormalizeError::shape("list", &serde_json::json!(1)).is_record_fatal());
        assert!(!NormalizeError::UnknownTitleStatus("foo".into()).is_record_fatal());
    }

    #[test]
    fn shape_names_json_type() {
        let err = NormalizeError::shape("string", &serde_json::json!([1, 2]));
        assert_eq!(err.to_string(), "expected string, found list");
    }

    #[test]
    fn failure_display_names_record() {
        let f = RecordFailure {
            record_id: "ABC".into(),
            reason: NormalizeError::MissingUuid,
        };
        assert_eq!(f.to_string(), "ABC: record has no uuid");
    }
}
