use chrono::{DateTime, Utc};
use daytrack_core::ServiceError;
use daytrack_docstore::{Document, date_value};
use serde::Deserialize;
use serde_json::Value;

/// Collection names.
pub const COLL_TASK: &str = "task";
pub const COLL_WORKLOG: &str = "worklog";
pub const COLL_NOTE: &str = "note";
pub const COLL_ACTIVITY: &str = "activity";

// ---------------------------------------------------------------------------
// Create payloads
// ---------------------------------------------------------------------------

/// Body for `POST /api/tasks`.
///
/// `status` and `priority` are free-form strings: the documented values
/// are pending | in_progress | done and low | medium | high, but unknown
/// values are accepted so UIs can extend the vocabulary.
#[derive(Debug, Deserialize)]
pub struct NewTask {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_priority")]
    pub priority: String,

    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_status() -> String {
    "pending".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

impl NewTask {
    /// Build the stored document, stamping bookkeeping timestamps.
    pub fn into_doc(self, now: DateTime<Utc>) -> Document {
        let mut doc = Document::new();
        doc.insert("title".to_string(), Value::String(self.title));
        doc.insert("description".to_string(), opt_string(self.description));
        doc.insert("status".to_string(), Value::String(self.status));
        doc.insert("priority".to_string(), Value::String(self.priority));
        doc.insert(
            "due_date".to_string(),
            self.due_date.map(date_value).unwrap_or(Value::Null),
        );
        doc.insert(
            "tags".to_string(),
            Value::Array(self.tags.into_iter().map(Value::String).collect()),
        );
        doc.insert("created_at".to_string(), date_value(now));
        doc.insert("updated_at".to_string(), date_value(now));
        doc
    }
}

/// Body for `POST /api/worklogs`.
#[derive(Debug, Deserialize)]
pub struct NewWorklog {
    pub date: DateTime<Utc>,
    pub hours: f64,

    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl NewWorklog {
    /// Hours are bounded at the input boundary only.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !(0.0..=24.0).contains(&self.hours) {
            return Err(ServiceError::Validation(format!(
                "hours must be between 0 and 24, got {}",
                self.hours
            )));
        }
        Ok(())
    }

    pub fn into_doc(self, now: DateTime<Utc>) -> Document {
        let mut doc = Document::new();
        doc.insert("date".to_string(), date_value(self.date));
        doc.insert("hours".to_string(), Value::from(self.hours));
        doc.insert("project".to_string(), opt_string(self.project));
        doc.insert("notes".to_string(), opt_string(self.notes));
        doc.insert("created_at".to_string(), date_value(now));
        doc
    }
}

/// Body for `POST /api/notes`.
#[derive(Debug, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,

    #[serde(default)]
    pub pinned: bool,
}

impl NewNote {
    pub fn into_doc(self, now: DateTime<Utc>) -> Document {
        let mut doc = Document::new();
        doc.insert("title".to_string(), Value::String(self.title));
        doc.insert("content".to_string(), Value::String(self.content));
        doc.insert("pinned".to_string(), Value::Bool(self.pinned));
        doc.insert("created_at".to_string(), date_value(now));
        doc.insert("updated_at".to_string(), date_value(now));
        doc
    }
}

fn opt_string(v: Option<String>) -> Value {
    v.map(Value::String).unwrap_or(Value::Null)
}

// ---------------------------------------------------------------------------
// Update patches
// ---------------------------------------------------------------------------
//
// PUT bodies are partial patches: only supplied fields change, `null`
// clears an optional field, unknown fields are ignored. Each known field
// is type-checked before it reaches the store.

/// Sanitize a `PUT /api/tasks/{id}` body into a store patch.
pub fn task_patch(body: &Value) -> Result<Document, ServiceError> {
    let obj = patch_object(body)?;
    let mut patch = Document::new();
    for (key, value) in obj {
        match key.as_str() {
            "title" => patch_string(&mut patch, key, value, false)?,
            "description" => patch_string(&mut patch, key, value, true)?,
            "status" => patch_string(&mut patch, key, value, false)?,
            "priority" => patch_string(&mut patch, key, value, false)?,
            "due_date" => patch_date(&mut patch, key, value)?,
            "tags" => patch_tags(&mut patch, value)?,
            _ => {}
        }
    }
    Ok(patch)
}

/// Sanitize a `PUT /api/notes/{id}` body into a store patch.
pub fn note_patch(body: &Value) -> Result<Document, ServiceError> {
    let obj = patch_object(body)?;
    let mut patch = Document::new();
    for (key, value) in obj {
        match key.as_str() {
            "title" => patch_string(&mut patch, key, value, false)?,
            "content" => patch_string(&mut patch, key, value, false)?,
            "pinned" => match value {
                Value::Bool(_) => {
                    patch.insert(key.clone(), value.clone());
                }
                _ => {
                    return Err(ServiceError::Validation(
                        "field 'pinned' must be a boolean".to_string(),
                    ));
                }
            },
            _ => {}
        }
    }
    Ok(patch)
}

fn patch_object(body: &Value) -> Result<&serde_json::Map<String, Value>, ServiceError> {
    body.as_object()
        .ok_or_else(|| ServiceError::Validation("patch body must be a JSON object".to_string()))
}

fn patch_string(
    patch: &mut Document,
    key: &str,
    value: &Value,
    nullable: bool,
) -> Result<(), ServiceError> {
    match value {
        Value::Null if nullable => {
            patch.insert(key.to_string(), Value::Null);
        }
        Value::String(_) => {
            patch.insert(key.to_string(), value.clone());
        }
        _ => {
            return Err(ServiceError::Validation(format!(
                "field '{key}' must be a string"
            )));
        }
    }
    Ok(())
}

fn patch_date(patch: &mut Document, key: &str, value: &Value) -> Result<(), ServiceError> {
    match value {
        Value::Null => {
            patch.insert(key.to_string(), Value::Null);
        }
        Value::String(s) => {
            let t = DateTime::parse_from_rfc3339(s).map_err(|_| {
                ServiceError::Validation(format!("field '{key}' must be an ISO-8601 timestamp"))
            })?;
            patch.insert(key.to_string(), date_value(t.with_timezone(&Utc)));
        }
        _ => {
            return Err(ServiceError::Validation(format!(
                "field '{key}' must be an ISO-8601 timestamp"
            )));
        }
    }
    Ok(())
}

fn patch_tags(patch: &mut Document, value: &Value) -> Result<(), ServiceError> {
    let ok = value
        .as_array()
        .is_some_and(|tags| tags.iter().all(Value::is_string));
    if !ok {
        return Err(ServiceError::Validation(
            "field 'tags' must be an array of strings".to_string(),
        ));
    }
    patch.insert("tags".to_string(), value.clone());
    Ok(())
}
