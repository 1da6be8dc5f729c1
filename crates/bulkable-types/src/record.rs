use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::document::Document;
use crate::id::DocumentId;
use crate::model::ModelName;

/// Shared handle to a candidate record.
///
/// The caller keeps its own handles; bulk insertion only reads records and
/// attaches ids, and hands back clones of the handles it rejected.
pub type RecordRef = Arc<Record>;

/// An in-memory candidate object of one model type.
///
/// A record carries its field values and named relation slots pointing at
/// other records. Records are assembled with the builder methods and then
/// frozen behind a [`RecordRef`]; the only state that changes afterwards is
/// the store-assigned id.
pub struct Record {
    model: ModelName,
    fields: Document,
    relations: BTreeMap<String, Vec<RecordRef>>,
    id: RwLock<Option<DocumentId>>,
}

impl Record {
    /// Start a record of the given model with no fields or relations.
    pub fn new(model: ModelName) -> Self {
        Self {
            model,
            fields: Document::new(),
            relations: BTreeMap::new(),
            id: RwLock::new(None),
        }
    }

    /// Set a field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Populate a to-many relation slot. Appends to any targets already set.
    pub fn with_many(
        mut self,
        relation: impl Into<String>,
        targets: impl IntoIterator<Item = RecordRef>,
    ) -> Self {
        self.relations
            .entry(relation.into())
            .or_default()
            .extend(targets);
        self
    }

    /// Populate a to-one relation slot, replacing any previous target.
    pub fn with_one(mut self, relation: impl Into<String>, target: RecordRef) -> Self {
        self.relations.insert(relation.into(), vec![target]);
        self
    }

    /// Freeze the record behind a shared handle.
    pub fn into_ref(self) -> RecordRef {
        Arc::new(self)
    }

    /// The concrete model of this record.
    pub fn model(&self) -> &ModelName {
        &self.model
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    /// Records held in the named relation slot (empty if unset).
    pub fn related(&self, relation: &str) -> &[RecordRef] {
        self.relations
            .get(relation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Names of the populated relation slots.
    pub fn relation_names(&self) -> impl Iterator<Item = &str> {
        self.relations.keys().map(String::as_str)
    }

    /// Snapshot of the persistable fields.
    pub fn to_document(&self) -> Document {
        self.fields.clone()
    }

    /// The id assigned by the most recent insert, if any.
    pub fn id(&self) -> Option<DocumentId> {
        *self.id.read().expect("lock poisoned")
    }

    /// Returns `true` once the record has been inserted.
    pub fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    /// Attach the id assigned by the store. Inserting a record again
    /// replaces the previous id.
    pub fn assign_id(&self, id: DocumentId) {
        *self.id.write().expect("lock poisoned") = Some(id);
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Relation targets are summarised by count; the graph can be large.
        let relations: BTreeMap<&str, usize> = self
            .relations
            .iter()
            .map(|(name, targets)| (name.as_str(), targets.len()))
            .collect();
        f.debug_struct("Record")
            .field("model", &self.model)
            .field("id", &self.id())
            .field("fields", &self.fields)
            .field("relations", &relations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str) -> ModelName {
        ModelName::new(name).unwrap()
    }

    #[test]
    fn builder_sets_fields_and_relations() {
        let fruit = Record::new(model("Fruit")).with_field("name", "Apple").into_ref();
        let stand = Record::new(model("Stand"))
            .with_field("name", "Stand 1")
            .with_many("fruits", vec![fruit.clone()])
            .into_ref();

        assert_eq!(stand.model(), "Stand");
        assert_eq!(stand.field("name"), Some(&Value::from("Stand 1")));
        assert_eq!(stand.related("fruits").len(), 1);
        assert!(Arc::ptr_eq(&stand.related("fruits")[0], &fruit));
        assert_eq!(stand.relation_names().collect::<Vec<_>>(), vec!["fruits"]);
    }

    #[test]
    fn unset_relation_is_empty() {
        let stand = Record::new(model("Stand")).into_ref();
        assert!(stand.related("fruits").is_empty());
    }

    #[test]
    fn with_many_appends() {
        let a = Record::new(model("Fruit")).into_ref();
        let b = Record::new(model("Fruit")).into_ref();
        let stand = Record::new(model("Stand"))
            .with_many("fruits", vec![a])
            .with_many("fruits", vec![b]);
        assert_eq!(stand.related("fruits").len(), 2);
    }

    #[test]
    fn with_one_replaces() {
        let first = Record::new(model("Stand")).with_field("name", "first").into_ref();
        let second = Record::new(model("Stand")).with_field("name", "second").into_ref();
        let fruit = Record::new(model("Fruit"))
            .with_one("stand", first)
            .with_one("stand", second);
        assert_eq!(fruit.related("stand").len(), 1);
        assert_eq!(fruit.related("stand")[0].field("name"), Some(&Value::from("second")));
    }

    #[test]
    fn assign_id_marks_persisted_and_can_be_replaced() {
        let record = Record::new(model("Stand")).into_ref();
        assert!(!record.is_persisted());

        let first = DocumentId::new();
        record.assign_id(first);
        assert_eq!(record.id(), Some(first));

        let second = DocumentId::new();
        record.assign_id(second);
        assert_eq!(record.id(), Some(second));
    }

    #[test]
    fn to_document_excludes_relations() {
        let fruit = Record::new(model("Fruit")).into_ref();
        let stand = Record::new(model("Stand"))
            .with_field("name", "Stand 1")
            .with_many("fruits", vec![fruit]);
        let doc = stand.to_document();
        assert_eq!(doc.len(), 1);
        assert!(doc.contains_key("name"));
    }

    #[test]
    fn debug_summarises_relations() {
        let fruit = Record::new(model("Fruit")).into_ref();
        let stand = Record::new(model("Stand")).with_many("fruits", vec![fruit]);
        let debug = format!("{stand:?}");
        assert!(debug.contains("Record"));
        assert!(debug.contains("\"fruits\": 1"));
    }
}
