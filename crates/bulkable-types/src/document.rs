use serde_json::{Map, Value};

use crate::id::DocumentId;

/// A persistable field snapshot: field name to JSON value, in declaration order.
pub type Document = Map<String, Value>;

/// Name of the field that stores the id of the record behind `relation`.
///
/// `foreign_key_field("stand")` is `"stand_id"`.
pub fn foreign_key_field(relation: &str) -> String {
    format!("{relation}_id")
}

/// Write `relation`'s foreign key into `document`, replacing any previous value.
pub fn set_foreign_key(document: &mut Document, relation: &str, id: DocumentId) {
    document.insert(foreign_key_field(relation), Value::String(id.to_string()));
}
