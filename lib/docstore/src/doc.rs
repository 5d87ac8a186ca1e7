use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use thiserror::Error;

/// A stored document: a flat JSON object.
///
/// The store assigns each document an `_id` field at insert. Timestamp
/// fields are stored as `{"$date": <unix millis>}` objects so they stay
/// distinguishable from plain numbers; the wire layer renders them as
/// ISO-8601 strings.
pub type Document = serde_json::Map<String, Value>;

/// Name of the store-assigned identity field.
pub const ID_FIELD: &str = "_id";

/// A string that is not a well-formed document id.
#[derive(Error, Debug)]
#[error("invalid id: {0:?}")]
pub struct InvalidId(pub String);

/// Generate a new document id (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Validate an id string from the outside world.
///
/// Ids are exactly 32 lowercase hex chars — anything else is rejected
/// before it reaches the store.
pub fn parse_id(s: &str) -> Result<String, InvalidId> {
    if s.len() == 32 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        Ok(s.to_string())
    } else {
        Err(InvalidId(s.to_string()))
    }
}

/// Equality filter matching a single document by id.
pub fn id_filter(id: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    filter
}

/// The internal timestamp representation: `{"$date": <unix millis>}`.
pub fn date_value(t: DateTime<Utc>) -> Value {
    json!({ "$date": t.timestamp_millis() })
}

/// Read a timestamp field back. Returns None for anything that is not a
/// `$date` object — callers treat such fields as absent.
pub fn date_from_value(v: &Value) -> Option<DateTime<Utc>> {
    let ms = v.get("$date")?.as_i64()?;
    DateTime::from_timestamp_millis(ms)
}

/// Whether a document matches a field-equality filter.
pub fn doc_matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(k, v)| doc.get(k) == Some(v))
}

/// Apply a patch to a document: `null` removes a field, any other value
/// replaces it. Fields absent from the patch are untouched.
pub fn apply_patch(doc: &mut Document, patch: &Document) {
    for (key, value) in patch {
        if value.is_null() {
            doc.remove(key);
        } else {
            doc.insert(key.clone(), value.clone());
        }
    }
}

/// Ordering used by sorted finds. Absent fields sort first; `$date`
/// values compare as instants, numbers as f64, then strings and bools.
/// Values of unlike types compare equal (the sort is not total across
/// types, matching how schemaless collections behave in practice).
pub fn compare_field_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (date_from_value(a), date_from_value(b)) {
                return x.cmp(&y);
            }
            if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
                return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            }
            if let (Some(x), Some(y)) = (a.as_str(), b.as_str()) {
                return x.cmp(y);
            }
            if let (Some(x), Some(y)) = (a.as_bool(), b.as_bool()) {
                return x.cmp(&y);
            }
            Ordering::Equal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(v: Value) -> Document {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn id_roundtrip() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(!id.contains('-'));
        assert_eq!(parse_id(&id).unwrap(), id);
    }

    #[test]
    fn parse_id_rejects_malformed() {
        assert!(parse_id("not-an-id").is_err());
        assert!(parse_id("").is_err());
        assert!(parse_id("abc123").is_err());
        // right length, wrong alphabet
        assert!(parse_id("ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ").is_err());
        let err = parse_id("not-an-id").unwrap_err();
        assert!(err.to_string().contains("not-an-id"));
    }

    #[test]
    fn date_value_roundtrip() {
        let t = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let v = date_value(t);
        assert_eq!(date_from_value(&v), Some(t));
    }

    #[test]
    fn date_from_value_ignores_non_dates() {
        assert_eq!(date_from_value(&json!(42)), None);
        assert_eq!(date_from_value(&json!("2026-01-01T00:00:00Z")), None);
        assert_eq!(date_from_value(&json!({"other": 1})), None);
        assert_eq!(date_from_value(&Value::Null), None);
    }

    #[test]
    fn patch_sets_and_removes() {
        let mut d = doc(json!({"title": "a", "status": "pending", "due": 1}));
        let p = doc(json!({"status": "done", "due": null, "extra": true}));
        apply_patch(&mut d, &p);
        assert_eq!(d.get("title"), Some(&json!("a")));
        assert_eq!(d.get("status"), Some(&json!("done")));
        assert!(!d.contains_key("due"));
        assert_eq!(d.get("extra"), Some(&json!(true)));
    }

    #[test]
    fn filter_matching() {
        let d = doc(json!({"status": "done", "priority": "low"}));
        assert!(doc_matches(&d, &Document::new()));
        assert!(doc_matches(&d, &doc(json!({"status": "done"}))));
        assert!(!doc_matches(&d, &doc(json!({"status": "pending"}))));
        assert!(!doc_matches(&d, &doc(json!({"missing": "x"}))));
    }

    #[test]
    fn field_ordering() {
        let early = date_value(DateTime::from_timestamp_millis(1_000).unwrap());
        let late = date_value(DateTime::from_timestamp_millis(2_000).unwrap());
        assert_eq!(compare_field_values(Some(&early), Some(&late)), Ordering::Less);
        assert_eq!(compare_field_values(Some(&json!(2)), Some(&json!(1.5))), Ordering::Greater);
        assert_eq!(compare_field_values(Some(&json!("a")), Some(&json!("b"))), Ordering::Less);
        assert_eq!(compare_field_values(None, Some(&json!(1))), Ordering::Less);
    }
}
