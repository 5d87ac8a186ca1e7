use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::doc::{Document, ID_FIELD, apply_patch, compare_field_values, doc_matches, new_id};
use crate::error::StoreError;
use crate::traits::{DocStore, FindOptions, SortOrder};

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");

/// RedbStore is a DocStore implementation backed by redb — a pure-Rust
/// embedded key-value database. Documents are stored as JSON bytes under
/// `{collection}:{id}` keys, so a collection is a contiguous key range.
/// Collection names must not contain `:`.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = Database::create(path).map_err(|e| StoreError::Storage(e.to_string()))?;

        // Ensure the table exists by doing a write transaction.
        let write_txn = db
            .begin_write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        {
            let _table = write_txn
                .open_table(TABLE)
                .map_err(|e| StoreError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        debug!("document store opened at {}", path.display());
        Ok(Self {
            db: Arc::new(db),
        })
    }
}

/// Take the document's id, assigning a fresh one if absent.
fn doc_id(doc: &mut Document) -> String {
    match doc.get(ID_FIELD).and_then(|v| v.as_str()) {
        Some(id) => id.to_string(),
        None => {
            let id = new_id();
            doc.insert(ID_FIELD.to_string(), serde_json::Value::String(id.clone()));
            id
        }
    }
}

fn decode(bytes: &[u8]) -> Result<Document, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn encode(doc: &Document) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(doc).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Collect every document in a collection matching the filter.
fn collect_matching<T>(
    table: &T,
    collection: &str,
    filter: &Document,
) -> Result<Vec<Document>, StoreError>
where
    T: ReadableTable<&'static str, &'static [u8]>,
{
    let prefix = format!("{collection}:");
    let mut results = Vec::new();
    let iter = table
        .range(prefix.as_str()..)
        .map_err(|e| StoreError::Storage(e.to_string()))?;

    for entry in iter {
        let entry = entry.map_err(|e| StoreError::Storage(e.to_string()))?;
        let key = entry.0.value().to_string();
        if !key.starts_with(&prefix) {
            break;
        }
        let doc = decode(entry.1.value())?;
        if doc_matches(&doc, filter) {
            results.push(doc);
        }
    }

    Ok(results)
}

/// Find the first matching document and its key, scanning in key order.
fn first_matching<T>(
    table: &T,
    collection: &str,
    filter: &Document,
) -> Result<Option<(String, Document)>, StoreError>
where
    T: ReadableTable<&'static str, &'static [u8]>,
{
    let prefix = format!("{collection}:");
    let iter = table
        .range(prefix.as_str()..)
        .map_err(|e| StoreError::Storage(e.to_string()))?;

    for entry in iter {
        let entry = entry.map_err(|e| StoreError::Storage(e.to_string()))?;
        let key = entry.0.value().to_string();
        if !key.starts_with(&prefix) {
            break;
        }
        let doc = decode(entry.1.value())?;
        if doc_matches(&doc, filter) {
            return Ok(Some((key, doc)));
        }
    }

    Ok(None)
}

impl DocStore for RedbStore {
    fn insert_one(&self, collection: &str, mut doc: Document) -> Result<String, StoreError> {
        let id = doc_id(&mut doc);
        let bytes = encode(&doc)?;
        let key = format!("{collection}:{id}");

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            table
                .insert(key.as_str(), bytes.as_slice())
                .map_err(|e| StoreError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(id)
    }

    fn insert_many(
        &self,
        collection: &str,
        docs: Vec<Document>,
    ) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::with_capacity(docs.len());

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            for mut doc in docs {
                let id = doc_id(&mut doc);
                let bytes = encode(&doc)?;
                let key = format!("{collection}:{id}");
                table
                    .insert(key.as_str(), bytes.as_slice())
                    .map_err(|e| StoreError::Storage(e.to_string()))?;
                ids.push(id);
            }
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(ids)
    }

    fn find(
        &self,
        collection: &str,
        filter: &Document,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        let mut docs = collect_matching(&table, collection, filter)?;

        if let Some((field, order)) = &options.sort {
            docs.sort_by(|a, b| {
                let ord = compare_field_values(a.get(field), b.get(field));
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }
        if let Some(limit) = options.limit {
            docs.truncate(limit);
        }

        Ok(docs)
    }

    fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Document,
        patch: &Document,
    ) -> Result<Option<Document>, StoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        let updated = {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| StoreError::Storage(e.to_string()))?;

            match first_matching(&table, collection, filter)? {
                None => None,
                Some((key, mut doc)) => {
                    apply_patch(&mut doc, patch);
                    let bytes = encode(&doc)?;
                    table
                        .insert(key.as_str(), bytes.as_slice())
                        .map_err(|e| StoreError::Storage(e.to_string()))?;
                    Some(doc)
                }
            }
        };

        write_txn
            .commit()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(updated)
    }

    fn find_one_and_delete(
        &self,
        collection: &str,
        filter: &Document,
    ) -> Result<Option<Document>, StoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        let removed = {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| StoreError::Storage(e.to_string()))?;

            match first_matching(&table, collection, filter)? {
                None => None,
                Some((key, doc)) => {
                    table
                        .remove(key.as_str())
                        .map_err(|e| StoreError::Storage(e.to_string()))?;
                    Some(doc)
                }
            }
        };

        write_txn
            .commit()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(removed)
    }

    fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        let mut names = BTreeSet::new();
        let iter = table
            .iter()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        for entry in iter {
            let entry = entry.map_err(|e| StoreError::Storage(e.to_string()))?;
            if let Some((collection, _)) = entry.0.value().split_once(':') {
                names.insert(collection.to_string());
            }
        }

        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{date_value, id_filter, parse_id};
    use chrono::DateTime;
    use serde_json::{Value, json};

    fn open_store() -> (tempfile::TempDir, RedbStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("test.redb")).unwrap();
        (dir, store)
    }

    fn doc(v: Value) -> Document {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn insert_assigns_valid_id() {
        let (_dir, store) = open_store();
        let id = store
            .insert_one("task", doc(json!({"title": "write tests"})))
            .unwrap();
        assert!(parse_id(&id).is_ok());

        let found = store
            .find("task", &id_filter(&id), &FindOptions::default())
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("title"), Some(&json!("write tests")));
        assert_eq!(found[0].get(ID_FIELD), Some(&json!(id)));
    }

    #[test]
    fn insert_keeps_provided_id() {
        let (_dir, store) = open_store();
        let fixed = new_id();
        let id = store
            .insert_one("task", doc(json!({"_id": fixed.clone(), "title": "x"})))
            .unwrap();
        assert_eq!(id, fixed);
    }

    #[test]
    fn find_with_filter_and_limit() {
        let (_dir, store) = open_store();
        for status in ["pending", "done", "done"] {
            store
                .insert_one("task", doc(json!({"title": "t", "status": status})))
                .unwrap();
        }

        let done = store
            .find("task", &doc(json!({"status": "done"})), &FindOptions::default())
            .unwrap();
        assert_eq!(done.len(), 2);

        let limited = store
            .find("task", &Document::new(), &FindOptions::default().with_limit(1))
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn find_sorted_by_date_desc() {
        let (_dir, store) = open_store();
        for ms in [3_000, 1_000, 2_000] {
            let t = DateTime::from_timestamp_millis(ms).unwrap();
            store
                .insert_one("activity", doc(json!({"created_at": date_value(t), "ms": ms})))
                .unwrap();
        }

        let docs = store
            .find(
                "activity",
                &Document::new(),
                &FindOptions::sorted_desc("created_at").with_limit(2),
            )
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].get("ms"), Some(&json!(3_000)));
        assert_eq!(docs[1].get("ms"), Some(&json!(2_000)));
    }

    #[test]
    fn collections_are_isolated() {
        let (_dir, store) = open_store();
        store.insert_one("task", doc(json!({"title": "a"}))).unwrap();
        store.insert_one("note", doc(json!({"title": "b"}))).unwrap();

        let tasks = store
            .find("task", &Document::new(), &FindOptions::default())
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].get("title"), Some(&json!("a")));
    }

    #[test]
    fn update_patches_and_clears_fields() {
        let (_dir, store) = open_store();
        let t = DateTime::from_timestamp_millis(1_000).unwrap();
        let id = store
            .insert_one(
                "task",
                doc(json!({"title": "a", "status": "pending", "due_date": date_value(t)})),
            )
            .unwrap();

        let updated = store
            .find_one_and_update(
                "task",
                &id_filter(&id),
                &doc(json!({"status": "done", "due_date": null})),
            )
            .unwrap()
            .expect("document should match");
        assert_eq!(updated.get("status"), Some(&json!("done")));
        assert_eq!(updated.get("title"), Some(&json!("a")));
        assert!(!updated.contains_key("due_date"));

        // The patch persisted.
        let found = store
            .find("task", &id_filter(&id), &FindOptions::default())
            .unwrap();
        assert_eq!(found[0].get("status"), Some(&json!("done")));
    }

    #[test]
    fn update_without_match_is_none() {
        let (_dir, store) = open_store();
        let missing = new_id();
        let res = store
            .find_one_and_update("task", &id_filter(&missing), &doc(json!({"status": "done"})))
            .unwrap();
        assert!(res.is_none());
    }

    #[test]
    fn delete_removes_document() {
        let (_dir, store) = open_store();
        let id = store
            .insert_one("note", doc(json!({"title": "gone soon"})))
            .unwrap();

        let removed = store
            .find_one_and_delete("note", &id_filter(&id))
            .unwrap()
            .expect("document should match");
        assert_eq!(removed.get("title"), Some(&json!("gone soon")));

        assert!(
            store
                .find("note", &id_filter(&id), &FindOptions::default())
                .unwrap()
                .is_empty()
        );
        assert!(store.find_one_and_delete("note", &id_filter(&id)).unwrap().is_none());
    }

    #[test]
    fn insert_many_and_list_collections() {
        let (_dir, store) = open_store();
        let ids = store
            .insert_many(
                "worklog",
                vec![doc(json!({"hours": 4.0})), doc(json!({"hours": 7.5}))],
            )
            .unwrap();
        assert_eq!(ids.len(), 2);
        store.insert_one("task", doc(json!({"title": "x"}))).unwrap();

        assert_eq!(store.list_collections().unwrap(), vec!["task", "worklog"]);
    }
}
