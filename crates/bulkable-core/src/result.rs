use bulkable_store::StoredDocument;
use bulkable_types::{DocumentId, ModelName, RecordRef};
use serde::Serialize;

use crate::options::ReturnMode;

/// An id assigned to a record inserted by a bulk create call.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct InsertedId {
    pub model: ModelName,
    pub id: DocumentId,
}

/// Successfully inserted records, in the form selected by [`ReturnMode`].
#[derive(Clone, Debug, PartialEq)]
pub enum Created {
    InsertedIds(Vec<InsertedId>),
    Objects(Vec<StoredDocument>),
}

impl Created {
    fn empty(mode: ReturnMode) -> Self {
        match mode {
            ReturnMode::InsertedIds => Self::InsertedIds(Vec::new()),
            ReturnMode::CreatedObjects => Self::Objects(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::InsertedIds(ids) => ids.len(),
            Self::Objects(docs) => docs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn extend(&mut self, other: Created) {
        match (self, other) {
            (Self::InsertedIds(ids), Self::InsertedIds(more)) => ids.extend(more),
            (Self::Objects(docs), Self::Objects(more)) => docs.extend(more),
            // Mixed modes only arise from merging results of different
            // calls; fall back to ids, which both forms carry.
            (this, other) => {
                let mut ids = this.ids();
                ids.extend(other.ids());
                *this = Self::InsertedIds(ids);
            }
        }
    }

    fn ids(&self) -> Vec<InsertedId> {
        match self {
            Self::InsertedIds(ids) => ids.clone(),
            Self::Objects(docs) => docs
                .iter()
                .map(|d| InsertedId {
                    model: d.model.clone(),
                    id: d.id,
                })
                .collect(),
        }
    }
}

/// Outcome of a bulk create call, aggregated over every chunk and every
/// model reached through relations.
///
/// Invalid records are listed in the order they were checked. Created
/// entries are listed in insertion order: for each batch, the owned-by
/// parents it requested, then the batch itself, then the records it owns.
#[derive(Clone, Debug)]
pub struct BulkCreateResult {
    invalid_objects: Vec<RecordRef>,
    created: Created,
    insert_calls: usize,
}

impl BulkCreateResult {
    pub(crate) fn empty(mode: ReturnMode) -> Self {
        Self {
            invalid_objects: Vec::new(),
            created: Created::empty(mode),
            insert_calls: 0,
        }
    }

    // ---- Accumulation ----

    pub(crate) fn push_invalid(&mut self, record: RecordRef) {
        self.invalid_objects.push(record);
    }

    pub(crate) fn push_inserted(&mut self, model: &ModelName, ids: &[DocumentId]) {
        self.insert_calls += 1;
        let entries = ids.iter().map(|&id| InsertedId {
            model: model.clone(),
            id,
        });
        match &mut self.created {
            Created::InsertedIds(out) => out.extend(entries),
            created => created.extend(Created::InsertedIds(entries.collect())),
        }
    }

    pub(crate) fn push_objects(&mut self, documents: Vec<StoredDocument>) {
        self.insert_calls += 1;
        self.created.extend(Created::Objects(documents));
    }

    /// Append `other` after everything already in `self`.
    pub fn merge(&mut self, other: BulkCreateResult) {
        self.invalid_objects.extend(other.invalid_objects);
        self.created.extend(other.created);
        self.insert_calls += other.insert_calls;
    }

    // ---- Read access ----

    /// Records rejected by validation, at any level of the graph.
    pub fn invalid_objects(&self) -> &[RecordRef] {
        &self.invalid_objects
    }

    pub fn created(&self) -> &Created {
        &self.created
    }

    /// Ids of every inserted record, whatever the return mode.
    pub fn inserted_ids(&self) -> Vec<InsertedId> {
        self.created.ids()
    }

    /// Ids inserted into `model`'s collection, in insertion order.
    pub fn ids_for(&self, model: &ModelName) -> Vec<DocumentId> {
        self.created
            .ids()
            .into_iter()
            .filter(|entry| &entry.model == model)
            .map(|entry| entry.id)
            .collect()
    }

    /// The inserted documents, when the call used [`ReturnMode::CreatedObjects`].
    pub fn created_objects(&self) -> Option<&[StoredDocument]> {
        match &self.created {
            Created::Objects(docs) => Some(docs),
            Created::InsertedIds(_) => None,
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_objects.len()
    }

    /// Number of insert-many calls issued.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls
    }

    /// Returns `true` if nothing was inserted and nothing was rejected.
    pub fn is_empty(&self) -> bool {
        self.invalid_objects.is_empty() && self.created.is_empty()
    }
}
