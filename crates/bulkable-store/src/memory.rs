use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use bulkable_types::{Document, DocumentId, ModelName};
use tracing::debug;

use crate::document::StoredDocument;
use crate::error::{StoreError, StoreResult};
use crate::traits::DocumentStore;

#[derive(Default)]
struct Collection {
    documents: Vec<StoredDocument>,
    by_id: HashMap<DocumentId, usize>,
}

/// In-memory, HashMap-based document store.
///
/// Intended for tests and embedding. Collections are created on first
/// insert and keep documents in insertion order. Every successful
/// `insert_many` is counted so callers can check round trips.
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<ModelName, Collection>>,
    insert_calls: AtomicUsize,
    read_only: AtomicBool,
}

impl InMemoryDocumentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            insert_calls: AtomicUsize::new(0),
            read_only: AtomicBool::new(false),
        }
    }

    /// Number of successful insert-many calls so far.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Reject all further inserts with [`StoreError::ReadOnly`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Total number of documents across all collections.
    pub fn len(&self) -> usize {
        self.collections
            .read()
            .expect("lock poisoned")
            .values()
            .map(|c| c.documents.len())
            .sum()
    }

    /// Returns `true` if no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All documents of `model` in insertion order.
    pub fn all(&self, model: &ModelName) -> Vec<StoredDocument> {
        self.collections
            .read()
            .expect("lock poisoned")
            .get(model)
            .map(|c| c.documents.clone())
            .unwrap_or_default()
    }

    /// Remove all documents and reset the insert counter.
    pub fn clear(&self) {
        self.collections.write().expect("lock poisoned").clear();
        self.insert_calls.store(0, Ordering::SeqCst);
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert_many(
        &self,
        model: &ModelName,
        documents: Vec<Document>,
    ) -> StoreResult<Vec<DocumentId>> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::ReadOnly);
        }
        if documents.is_empty() {
            return Err(StoreError::EmptyBatch(model.clone()));
        }

        let mut map = self.collections.write().expect("lock poisoned");
        let collection = map.entry(model.clone()).or_default();
        let mut ids = Vec::with_capacity(documents.len());
        for fields in documents {
            let id = DocumentId::new();
            collection.by_id.insert(id, collection.documents.len());
            collection
                .documents
                .push(StoredDocument::new(model.clone(), id, fields));
            ids.push(id);
        }
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        debug!(%model, count = ids.len(), "insert_many");
        Ok(ids)
    }

    fn find_by_ids(
        &self,
        model: &ModelName,
        ids: &[DocumentId],
    ) -> StoreResult<Vec<StoredDocument>> {
        let map = self.collections.read().expect("lock poisoned");
        let Some(collection) = map.get(model) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| collection.by_id.get(id))
            .map(|&idx| collection.documents[idx].clone())
            .collect())
    }

    fn count(&self, model: &ModelName) -> StoreResult<usize> {
        let map = self.collections.read().expect("lock poisoned");
        Ok(map.get(model).map_or(0, |c| c.documents.len()))
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("document_count", &self.len())
            .field("insert_calls", &self.insert_calls())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(name: &str) -> ModelName {
        ModelName::new(name).unwrap()
    }

    fn doc(name: &str) -> Document {
        let mut d = Document::new();
        d.insert("name".into(), json!(name));
        d
    }

    // -----------------------------------------------------------------------
    // insert_many
    // -----------------------------------------------------------------------

    #[test]
    fn insert_many_returns_ids_in_submission_order() {
        let store = InMemoryDocumentStore::new();
        let stand = model("Stand");
        let ids = store
            .insert_many(&stand, vec![doc("a"), doc("b"), doc("c")])
            .unwrap();
        assert_eq!(ids.len(), 3);

        let all = store.all(&stand);
        let names: Vec<_> = all.iter().map(|d| d.get("name").cloned().unwrap()).collect();
        assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
        for (stored, id) in all.iter().zip(&ids) {
            assert_eq!(stored.id, *id);
        }
    }

    #[test]
    fn insert_many_counts_calls() {
        let store = InMemoryDocumentStore::new();
        store.insert_many(&model("Stand"), vec![doc("a")]).unwrap();
        store.insert_many(&model("Fruit"), vec![doc("b"), doc("c")]).unwrap();
        assert_eq!(store.insert_calls(), 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn empty_insert_is_rejected() {
        let store = InMemoryDocumentStore::new();
        let err = store.insert_many(&model("Stand"), Vec::new()).unwrap_err();
        assert!(matches!(err, StoreError::EmptyBatch(_)));
        assert_eq!(store.insert_calls(), 0);
    }

    #[test]
    fn same_document_twice_gets_two_ids() {
        let store = InMemoryDocumentStore::new();
        let stand = model("Stand");
        let first = store.insert_many(&stand, vec![doc("a")]).unwrap();
        let second = store.insert_many(&stand, vec![doc("a")]).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.count(&stand).unwrap(), 2);
    }

    #[test]
    fn read_only_rejects_inserts() {
        let store = InMemoryDocumentStore::new();
        store.set_read_only(true);
        let err = store.insert_many(&model("Stand"), vec![doc("a")]).unwrap_err();
        assert!(matches!(err, StoreError::ReadOnly));
        assert!(store.is_empty());

        store.set_read_only(false);
        assert!(store.insert_many(&model("Stand"), vec![doc("a")]).is_ok());
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    #[test]
    fn find_by_ids_skips_missing() {
        let store = InMemoryDocumentStore::new();
        let stand = model("Stand");
        let ids = store.insert_many(&stand, vec![doc("a"), doc("b")]).unwrap();
        let missing = DocumentId::new();

        let found = store.find_by_ids(&stand, &[ids[1], missing]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ids[1]);
        assert_eq!(found[0].model, stand);
    }

    #[test]
    fn find_by_ids_is_scoped_to_collection() {
        let store = InMemoryDocumentStore::new();
        let ids = store.insert_many(&model("Stand"), vec![doc("a")]).unwrap();
        assert!(store.find_by_ids(&model("Fruit"), &ids).unwrap().is_empty());
    }

    #[test]
    fn find_single_document() {
        let store = InMemoryDocumentStore::new();
        let stand = model("Stand");
        let ids = store.insert_many(&stand, vec![doc("a")]).unwrap();
        let found = store.find(&stand, &ids[0]).unwrap().expect("should exist");
        assert_eq!(found.get("name"), Some(&json!("a")));
        assert!(store.find(&stand, &DocumentId::new()).unwrap().is_none());
    }

    #[test]
    fn count_unknown_collection_is_zero() {
        let store = InMemoryDocumentStore::new();
        assert_eq!(store.count(&model("Market")).unwrap(), 0);
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn clear_resets_everything() {
        let store = InMemoryDocumentStore::new();
        store.insert_many(&model("Stand"), vec![doc("a")]).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.insert_calls(), 0);
    }

    #[test]
    fn debug_format() {
        let store = InMemoryDocumentStore::default();
        store.insert_many(&model("Stand"), vec![doc("x")]).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryDocumentStore"));
        assert!(debug.contains("document_count"));
    }
}
