use bulkable_types::{Document, DocumentId, ModelName};

use crate::document::StoredDocument;
use crate::error::StoreResult;

/// Document store boundary used by bulk insertion.
///
/// All implementations must satisfy these invariants:
/// - `insert_many` is a single write call; the returned ids correspond
///   one-to-one, in order, to the submitted documents.
/// - Every insert assigns fresh ids. There is no dedup or upsert.
/// - Errors are propagated, never silently ignored. A failed call may have
///   written nothing; earlier successful calls stay written.
pub trait DocumentStore: Send + Sync {
    /// Insert `documents` into `model`'s collection in one call and return
    /// the assigned ids in submission order.
    ///
    /// Returns `Err(StoreError::EmptyBatch)` when `documents` is empty.
    fn insert_many(&self, model: &ModelName, documents: Vec<Document>)
        -> StoreResult<Vec<DocumentId>>;

    /// Fetch the documents of `model` whose ids are in `ids`.
    ///
    /// Missing ids are skipped. The result contains the same set of
    /// documents as were found, in no guaranteed order.
    fn find_by_ids(&self, model: &ModelName, ids: &[DocumentId])
        -> StoreResult<Vec<StoredDocument>>;

    /// Number of documents in `model`'s collection.
    fn count(&self, model: &ModelName) -> StoreResult<usize>;

    /// Fetch a single document.
    ///
    /// Default implementation calls `find_by_ids()` with one id.
    fn find(&self, model: &ModelName, id: &DocumentId) -> StoreResult<Option<StoredDocument>> {
        Ok(self.find_by_ids(model, std::slice::from_ref(id))?.pop())
    }
}
