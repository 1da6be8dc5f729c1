use bulkable_types::{Document, DocumentId, ModelName};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document as held by the store: its collection, assigned id and fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub model: ModelName,
    pub id: DocumentId,
    pub fields: Document,
}

impl StoredDocument {
    pub fn new(model: ModelName, id: DocumentId, fields: Document) -> Self {
        Self { model, id, fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}
