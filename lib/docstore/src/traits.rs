use crate::doc::Document;
use crate::error::StoreError;

/// Sort direction for [`FindOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Options for find queries.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Sort by a field before applying the limit.
    pub sort: Option<(String, SortOrder)>,

    /// Maximum number of documents to return.
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn sorted_desc(field: &str) -> Self {
        Self {
            sort: Some((field.to_string(), SortOrder::Desc)),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// DocStore provides document storage grouped into named collections.
///
/// Documents are flat JSON objects identified by a store-assigned `_id`
/// string. Filters are field-equality only. The adapter does not retry:
/// any backend failure surfaces as [`StoreError::Storage`] and the caller
/// decides whether to degrade.
pub trait DocStore: Send + Sync {
    /// Insert one document, assigning `_id` if absent. Returns the id.
    fn insert_one(&self, collection: &str, doc: Document) -> Result<String, StoreError>;

    /// Insert several documents in one transaction. Returns their ids.
    fn insert_many(&self, collection: &str, docs: Vec<Document>) -> Result<Vec<String>, StoreError>;

    /// Find documents matching a field-equality filter, optionally sorted
    /// and limited. An empty filter matches everything.
    fn find(
        &self,
        collection: &str,
        filter: &Document,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError>;

    /// Atomically patch the first document matching the filter (`null`
    /// removes a field). Returns the updated document, or None if nothing
    /// matched.
    fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Document,
        patch: &Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Atomically remove the first document matching the filter. Returns
    /// the removed document, or None if nothing matched.
    fn find_one_and_delete(
        &self,
        collection: &str,
        filter: &Document,
    ) -> Result<Option<Document>, StoreError>;

    /// List the collections that currently hold documents. Doubles as the
    /// liveness probe.
    fn list_collections(&self) -> Result<Vec<String>, StoreError>;
}
