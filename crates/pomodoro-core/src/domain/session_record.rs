// ============================================================================
// Pomodoro Core - Session Record
// File: crates/pomodoro-core/src/domain/session_record.rs
// Description: Persisted tuple of token, start time, and duration
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::repositories::Document;

/// One document of the `sessions` collection. All fields are stored as
/// strings: `time` is epoch milliseconds, `minutes` the requested duration
/// exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub time: String,
    pub minutes: String,
}

impl SessionRecord {
    pub fn new(token: impl Into<String>, time_millis: i64, minutes: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            time: time_millis.to_string(),
            minutes: minutes.into(),
        }
    }

    pub fn to_document(&self) -> Result<Document, StoreError> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(StoreError::Query(format!("session record serialized to {}", other))),
        }
    }

    /// Reads a record back, ignoring any extra fields the backend adds.
    pub fn from_document(doc: Document) -> Result<Self, StoreError> {
        Ok(serde_json::from_value(serde_json::Value::Object(doc))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_serializes_time_as_string() {
        let record = SessionRecord::new("tok", 1_700_000_000_000, "25");
        assert_eq!(record.time, "1700000000000");
        assert_eq!(record.minutes, "25");
    }

    #[test]
    fn test_document_shape() {
        let doc = SessionRecord::new("tok", 5, "45").to_document().unwrap();
        assert_eq!(doc.get("token"), Some(&json!("tok")));
        assert_eq!(doc.get("time"), Some(&json!("5")));
        assert_eq!(doc.get("minutes"), Some(&json!("45")));
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_from_document_ignores_extra_fields() {
        let mut doc = SessionRecord::new("tok", 5, "45").to_document().unwrap();
        doc.insert("_id".into(), json!(7));
        let record = SessionRecord::from_document(doc).unwrap();
        assert_eq!(record, SessionRecord::new("tok", 5, "45"));
    }

    #[test]
    fn test_from_document_missing_field_fails() {
        let mut doc = Document::new();
        doc.insert("token".into(), json!("tok"));
        assert!(matches!(
            SessionRecord::from_document(doc),
            Err(StoreError::Serialization(_))
        ));
    }
}
