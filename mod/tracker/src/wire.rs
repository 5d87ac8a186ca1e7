use daytrack_docstore::{Document, ID_FIELD, date_from_value};
use serde_json::Value;

/// Convert a stored document to its wire form: `_id` becomes `id`,
/// `$date` timestamps become ISO-8601 UTC strings. Everything else passes
/// through untouched. Absent documents are handled by `Option::map` at
/// the call site.
pub fn serialize(doc: Document) -> Value {
    let mut out = serde_json::Map::new();
    for (key, value) in doc {
        if key == ID_FIELD {
            out.insert("id".to_string(), value);
            continue;
        }
        match date_from_value(&value) {
            Some(t) => out.insert(key, Value::String(t.to_rfc3339())),
            None => out.insert(key, value),
        };
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use daytrack_docstore::date_value;
    use serde_json::json;

    #[test]
    fn renames_id_and_renders_dates() {
        let t = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let doc = json!({
            "_id": "abc123",
            "title": "hello",
            "due_date": date_value(t),
            "hours": 7.5,
        });
        let wire = serialize(doc.as_object().unwrap().clone());

        assert_eq!(wire.get("id"), Some(&json!("abc123")));
        assert!(wire.get("_id").is_none());
        assert_eq!(wire.get("due_date"), Some(&json!(t.to_rfc3339())));
        assert_eq!(wire.get("title"), Some(&json!("hello")));
        assert_eq!(wire.get("hours"), Some(&json!(7.5)));
    }

    #[test]
    fn passes_nulls_through() {
        let doc = json!({"_id": "x", "description": null});
        let wire = serialize(doc.as_object().unwrap().clone());
        assert_eq!(wire.get("description"), Some(&Value::Null));
    }
}
