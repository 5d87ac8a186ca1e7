use std::sync::Arc;

use chrono::Utc;
use daytrack_core::ServiceError;
use daytrack_docstore::{
    DocStore, Document, FindOptions, InvalidId, StoreError, date_value, id_filter, parse_id,
};
use serde_json::{Value, json};
use tracing::warn;

use crate::analytics::{self, MonthlyReport, WeeklyReport};
use crate::demo;
use crate::model::{self, NewNote, NewTask, NewWorklog};
use crate::wire::serialize;

/// The tracker service: all store access and the degrade-to-demo policy.
///
/// Reads fall back to demo payloads when the store is missing or failing,
/// so the service stays responsive without a database. Writes surface
/// errors — a silent fake success would be misleading.
#[derive(Clone)]
pub struct TrackerService {
    store: Option<Arc<dyn DocStore>>,
}

impl TrackerService {
    pub fn new(store: Option<Arc<dyn DocStore>>) -> Self {
        Self { store }
    }

    /// The store, or 503 for write paths.
    fn store(&self) -> Result<&dyn DocStore, ServiceError> {
        self.store
            .as_deref()
            .ok_or_else(|| ServiceError::Unavailable("database not configured".to_string()))
    }

    fn try_list(
        &self,
        collection: &str,
        filter: &Document,
        options: &FindOptions,
    ) -> Result<Vec<Value>, ServiceError> {
        let store = self.store()?;
        let docs = store.find(collection, filter, options).map_err(storage)?;
        Ok(docs.into_iter().map(serialize).collect())
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub fn list_tasks(&self, status: Option<&str>) -> Vec<Value> {
        let mut filter = Document::new();
        if let Some(status) = status {
            filter.insert("status".to_string(), json!(status));
        }
        match self.try_list(model::COLL_TASK, &filter, &FindOptions::default()) {
            Ok(items) => items,
            Err(e) => {
                warn!("task list unavailable, serving demo data: {e}");
                demo::tasks(Utc::now())
            }
        }
    }

    pub fn create_task(&self, input: NewTask) -> Result<String, ServiceError> {
        let store = self.store()?;
        let title = input.title.clone();
        let id = store
            .insert_one(model::COLL_TASK, input.into_doc(Utc::now()))
            .map_err(storage)?;
        self.log_activity("task_created", &format!("Created task: {title}"), Some(&id));
        Ok(id)
    }

    pub fn update_task(&self, id: &str, body: &Value) -> Result<Value, ServiceError> {
        let store = self.store()?;
        let id = parse_id(id).map_err(invalid_id)?;
        let mut patch = model::task_patch(body)?;
        patch.insert("updated_at".to_string(), date_value(Utc::now()));

        let updated = store
            .find_one_and_update(model::COLL_TASK, &id_filter(&id), &patch)
            .map_err(storage)?
            .ok_or_else(|| ServiceError::NotFound(format!("task {id} not found")))?;

        let title = doc_title(&updated);
        self.log_activity("task_updated", &format!("Updated task: {title}"), Some(&id));
        Ok(serialize(updated))
    }

    pub fn delete_task(&self, id: &str) -> Result<(), ServiceError> {
        let store = self.store()?;
        let id = parse_id(id).map_err(invalid_id)?;

        let removed = store
            .find_one_and_delete(model::COLL_TASK, &id_filter(&id))
            .map_err(storage)?
            .ok_or_else(|| ServiceError::NotFound(format!("task {id} not found")))?;

        let title = doc_title(&removed);
        self.log_activity("task_deleted", &format!("Deleted task: {title}"), Some(&id));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Worklogs
    // ------------------------------------------------------------------

    pub fn list_worklogs(&self) -> Vec<Value> {
        match self.try_list(model::COLL_WORKLOG, &Document::new(), &FindOptions::default()) {
            Ok(items) => items,
            Err(e) => {
                warn!("worklog list unavailable, serving demo data: {e}");
                demo::worklogs(Utc::now())
            }
        }
    }

    pub fn create_worklog(&self, input: NewWorklog) -> Result<String, ServiceError> {
        input.validate()?;
        let store = self.store()?;
        let hours = input.hours;
        let id = store
            .insert_one(model::COLL_WORKLOG, input.into_doc(Utc::now()))
            .map_err(storage)?;
        self.log_activity("work_logged", &format!("Logged {hours}h"), Some(&id));
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------

    pub fn list_notes(&self) -> Vec<Value> {
        match self.try_list(model::COLL_NOTE, &Document::new(), &FindOptions::default()) {
            Ok(items) => items,
            Err(e) => {
                warn!("note list unavailable, serving demo data: {e}");
                demo::notes()
            }
        }
    }

    pub fn create_note(&self, input: NewNote) -> Result<String, ServiceError> {
        let store = self.store()?;
        let id = store
            .insert_one(model::COLL_NOTE, input.into_doc(Utc::now()))
            .map_err(storage)?;
        Ok(id)
    }

    pub fn update_note(&self, id: &str, body: &Value) -> Result<Value, ServiceError> {
        let store = self.store()?;
        let id = parse_id(id).map_err(invalid_id)?;
        let mut patch = model::note_patch(body)?;
        patch.insert("updated_at".to_string(), date_value(Utc::now()));

        let updated = store
            .find_one_and_update(model::COLL_NOTE, &id_filter(&id), &patch)
            .map_err(storage)?
            .ok_or_else(|| ServiceError::NotFound(format!("note {id} not found")))?;

        Ok(serialize(updated))
    }

    pub fn delete_note(&self, id: &str) -> Result<(), ServiceError> {
        let store = self.store()?;
        let id = parse_id(id).map_err(invalid_id)?;

        store
            .find_one_and_delete(model::COLL_NOTE, &id_filter(&id))
            .map_err(storage)?
            .ok_or_else(|| ServiceError::NotFound(format!("note {id} not found")))?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Activity feed
    // ------------------------------------------------------------------

    pub fn list_activities(&self, limit: usize) -> Vec<Value> {
        let options = FindOptions::sorted_desc("created_at").with_limit(limit);
        match self.try_list(model::COLL_ACTIVITY, &Document::new(), &options) {
            Ok(items) => items,
            Err(e) => {
                warn!("activity list unavailable, serving demo data: {e}");
                demo::activities(Utc::now())
            }
        }
    }

    /// Append an audit entry. Best-effort: a failed write is logged and
    /// swallowed so it never fails the triggering request.
    fn log_activity(&self, kind: &str, message: &str, related_id: Option<&str>) {
        let Some(store) = &self.store else { return };

        let mut doc = Document::new();
        doc.insert("type".to_string(), json!(kind));
        doc.insert("message".to_string(), json!(message));
        if let Some(rid) = related_id {
            doc.insert("related_id".to_string(), json!(rid));
        }
        doc.insert("created_at".to_string(), date_value(Utc::now()));

        if let Err(e) = store.insert_one(model::COLL_ACTIVITY, doc) {
            warn!("activity log write failed ({kind}): {e}");
        }
    }

    // ------------------------------------------------------------------
    // Analytics
    // ------------------------------------------------------------------

    pub fn weekly_analytics(&self) -> WeeklyReport {
        let now = Utc::now();
        match self.fetch_analytics_docs() {
            Ok((worklogs, tasks)) => analytics::weekly(now, &worklogs, &tasks),
            Err(e) => {
                warn!("analytics unavailable, serving demo series: {e}");
                analytics::weekly_demo(now)
            }
        }
    }

    pub fn monthly_analytics(&self) -> MonthlyReport {
        let now = Utc::now();
        match self.fetch_analytics_docs() {
            Ok((worklogs, tasks)) => analytics::monthly(now, &worklogs, &tasks),
            Err(e) => {
                warn!("analytics unavailable, serving demo series: {e}");
                analytics::monthly_demo()
            }
        }
    }

    fn fetch_analytics_docs(&self) -> Result<(Vec<Document>, Vec<Document>), ServiceError> {
        let store = self.store()?;
        let worklogs = store
            .find(model::COLL_WORKLOG, &Document::new(), &FindOptions::default())
            .map_err(storage)?;
        let tasks = store
            .find(model::COLL_TASK, &Document::new(), &FindOptions::default())
            .map_err(storage)?;
        Ok((worklogs, tasks))
    }

    // ------------------------------------------------------------------
    // Seed
    // ------------------------------------------------------------------

    pub fn seed_dummy(&self) -> Result<(), ServiceError> {
        let store = self.store()?;
        let now = Utc::now();
        store
            .insert_many(model::COLL_TASK, demo::seed_tasks(now))
            .map_err(storage)?;
        store
            .insert_many(model::COLL_WORKLOG, demo::seed_worklogs(now))
            .map_err(storage)?;
        store
            .insert_many(model::COLL_NOTE, demo::seed_notes(now))
            .map_err(storage)?;
        Ok(())
    }
}

fn doc_title(doc: &Document) -> String {
    doc.get("title")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

fn storage(e: StoreError) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

fn invalid_id(e: InvalidId) -> ServiceError {
    ServiceError::InvalidId(e.to_string())
}
