//! Shared test fixtures: the market / stand / fruit schema.

use std::collections::HashSet;

use bulkable_schema::{FieldDef, ModelDef, RelationDescriptor, Schema};
use bulkable_store::{DocumentStore, InMemoryDocumentStore, StoreError, StoreResult, StoredDocument};
use bulkable_types::{Document, DocumentId, ModelName, Record, RecordRef};

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub(crate) fn model(name: &str) -> ModelName {
    ModelName::new(name).unwrap()
}

/// Market owns stands; a stand requires a name, belongs to a market
/// (optional) and owns fruits; a fruit belongs to a stand.
pub(crate) fn market_schema() -> Schema {
    Schema::new(vec![
        ModelDef::new(model("Market"))
            .field(FieldDef::new("city"))
            .relation(RelationDescriptor::owns_many("stands", model("Stand")).with_inverse("market")),
        ModelDef::new(model("Stand"))
            .field(FieldDef::required("name"))
            .relation(RelationDescriptor::owned_by("market", model("Market")))
            .relation(RelationDescriptor::owns_many("fruits", model("Fruit")).with_inverse("stand")),
        ModelDef::new(model("Fruit"))
            .field(FieldDef::required("name"))
            .relation(RelationDescriptor::owned_by("stand", model("Stand"))),
    ])
    .unwrap()
}

pub(crate) fn stand(name: Option<&str>) -> Record {
    let record = Record::new(model("Stand"));
    match name {
        Some(name) => record.with_field("name", name),
        None => record,
    }
}

pub(crate) fn fruit(name: &str) -> RecordRef {
    Record::new(model("Fruit")).with_field("name", name).into_ref()
}

pub(crate) fn market(city: &str) -> Record {
    Record::new(model("Market")).with_field("city", city)
}

/// In-memory store that fails every insert into the listed collections.
pub(crate) struct FailingStore {
    pub(crate) inner: InMemoryDocumentStore,
    pub(crate) failing: HashSet<ModelName>,
}

impl FailingStore {
    pub(crate) fn failing_on(name: &str) -> Self {
        Self {
            inner: InMemoryDocumentStore::new(),
            failing: HashSet::from([model(name)]),
        }
    }
}

impl DocumentStore for FailingStore {
    fn insert_many(&self, model: &ModelName, documents: Vec<Document>) -> StoreResult<Vec<DocumentId>> {
        if self.failing.contains(model) {
            return Err(StoreError::Backend {
                model: model.clone(),
                message: "connection reset".into(),
            });
        }
        self.inner.insert_many(model, documents)
    }

    fn find_by_ids(&self, model: &ModelName, ids: &[DocumentId]) -> StoreResult<Vec<StoredDocument>> {
        self.inner.find_by_ids(model, ids)
    }

    fn count(&self, model: &ModelName) -> StoreResult<usize> {
        self.inner.count(model)
    }
}

/// Store that drops the last id of every insert.
pub(crate) struct ShortIdStore(pub(crate) InMemoryDocumentStore);

impl DocumentStore for ShortIdStore {
    fn insert_many(&self, model: &ModelName, documents: Vec<Document>) -> StoreResult<Vec<DocumentId>> {
        let mut ids = self.0.insert_many(model, documents)?;
        ids.pop();
        Ok(ids)
    }

    fn find_by_ids(&self, model: &ModelName, ids: &[DocumentId]) -> StoreResult<Vec<StoredDocument>> {
        self.0.find_by_ids(model, ids)
    }

    fn count(&self, model: &ModelName) -> StoreResult<usize> {
        self.0.count(model)
    }
}
