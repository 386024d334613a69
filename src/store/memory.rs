//! In-memory record store.
//!
//! Backs the test-suite and is good enough for small installations that load
//! their catalog at startup. Keeps records in insertion order so search
//! results are deterministic, and counts search / children calls so callers
//! can assert on cache behavior.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

use super::{Filter, ModelSchema, PolymorphicRef, Record, RecordId, RecordStore, StoreError};

/// Plain data record for the in-memory store.
#[derive(Debug, Clone)]
pub struct RecordData {
    id: RecordId,
    model: String,
    text_fields: HashMap<String, String>,
    child_fields: HashMap<String, Vec<RecordId>>,
    reference: Option<PolymorphicRef>,
}

impl RecordData {
    pub fn new(model: impl Into<String>, id: RecordId) -> Self {
        Self {
            id,
            model: model.into(),
            text_fields: HashMap::new(),
            child_fields: HashMap::new(),
            reference: None,
        }
    }

    pub fn text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.text_fields.insert(field.into(), value.into());
        self
    }

    pub fn children(mut self, field: impl Into<String>, ids: Vec<RecordId>) -> Self {
        self.child_fields.insert(field.into(), ids);
        self
    }

    pub fn reference(mut self, model: impl Into<String>, record_id: Option<RecordId>) -> Self {
        self.reference = Some(PolymorphicRef::new(model, record_id));
        self
    }
}

impl Record for RecordData {
    fn id(&self) -> RecordId {
        self.id
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn text(&self, field: &str) -> Option<&str> {
        self.text_fields.get(field).map(String::as_str)
    }

    fn children_ids(&self, field: &str) -> Option<Vec<RecordId>> {
        self.child_fields.get(field).cloned()
    }

    fn reference(&self) -> Option<&PolymorphicRef> {
        self.reference.as_ref()
    }
}

#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<Arc<RecordData>>>,
    by_id: DashMap<(String, RecordId), Arc<RecordData>>,
    schemas: DashMap<String, ModelSchema>,
    search_calls: AtomicUsize,
    children_calls: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_model(&self, model: impl Into<String>, schema: ModelSchema) {
        self.schemas.insert(model.into(), schema);
    }

    pub fn insert(&self, record: RecordData) {
        let record = Arc::new(record);
        self.by_id
            .insert((record.model.clone(), record.id), record.clone());
        self.records.write().push(record);
    }

    /// Number of `search` calls served so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of `children` calls served so far.
    pub fn children_calls(&self) -> usize {
        self.children_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn search(
        &self,
        model: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Arc<dyn Record>>, StoreError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let records = self.records.read();
        let mut matches: Vec<Arc<dyn Record>> = Vec::new();
        for record in records.iter() {
            if record.model == model && filter.matches(|field| Record::text(record.as_ref(), field)) {
                matches.push(record.clone());
                if limit.is_some_and(|limit| matches.len() >= limit) {
                    break;
                }
            }
        }
        Ok(matches)
    }

    async fn get(
        &self,
        model: &str,
        id: RecordId,
    ) -> Result<Option<Arc<dyn Record>>, StoreError> {
        Ok(self
            .by_id
            .get(&(model.to_string(), id))
            .map(|entry| entry.value().clone() as Arc<dyn Record>))
    }

    async fn children(
        &self,
        record: &dyn Record,
        field: &str,
    ) -> Result<Vec<Arc<dyn Record>>, StoreError> {
        self.children_calls.fetch_add(1, Ordering::SeqCst);
        let Some(ids) = record.children_ids(field) else {
            return Ok(Vec::new());
        };
        let mut children = Vec::with_capacity(ids.len());
        for id in ids {
            match self.by_id.get(&(record.model().to_string(), id)) {
                Some(entry) => children.push(entry.value().clone() as Arc<dyn Record>),
                None => {
                    return Err(StoreError::RecordMissing {
                        model: record.model().to_string(),
                        id,
                    })
                }
            }
        }
        Ok(children)
    }

    fn schema(&self, model: &str) -> Option<ModelSchema> {
        self.schemas.get(model).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_filters_by_model_and_fields() {
        let store = InMemoryRecordStore::new();
        store.insert(RecordData::new("category", 1).text("slug", "root"));
        store.insert(RecordData::new("category", 2).text("slug", "child"));
        store.insert(RecordData::new("article", 3).text("slug", "root"));

        let filter = Filter::new().eq("slug", "root");
        let found = store.search("category", &filter, None).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), 1);
        assert_eq!(store.search_calls(), 1);
    }

    #[tokio::test]
    async fn children_preserve_collection_order() {
        let store = InMemoryRecordStore::new();
        store.insert(RecordData::new("category", 1).children("subcategories", vec![3, 2]));
        store.insert(RecordData::new("category", 2));
        store.insert(RecordData::new("category", 3));

        let root = store.get("category", 1).await.unwrap().unwrap();
        let children = store.children(root.as_ref(), "subcategories").await.unwrap();
        let ids: Vec<RecordId> = children.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn dangling_child_id_is_an_error() {
        let store = InMemoryRecordStore::new();
        store.insert(RecordData::new("category", 1).children("subcategories", vec![99]));

        let root = store.get("category", 1).await.unwrap().unwrap();
        let err = store
            .children(root.as_ref(), "subcategories")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::RecordMissing { id: 99, .. }));
    }

    #[tokio::test]
    async fn record_without_children_field_is_a_leaf() {
        let store = InMemoryRecordStore::new();
        store.insert(RecordData::new("category", 1));

        let root = store.get("category", 1).await.unwrap().unwrap();
        let children = store.children(root.as_ref(), "subcategories").await.unwrap();
        assert!(children.is_empty());
    }
}
