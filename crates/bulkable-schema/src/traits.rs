use std::collections::HashMap;

use bulkable_types::{ModelName, Record};

use crate::relation::RelationDescriptor;

/// Relation metadata lookup.
///
/// Returns the relations declared on `model` in declaration order. Unknown
/// models have no relations.
pub trait RelationLookup {
    fn relations_of(&self, model: &ModelName) -> &[RelationDescriptor];
}

impl RelationLookup for HashMap<ModelName, Vec<RelationDescriptor>> {
    fn relations_of(&self, model: &ModelName) -> &[RelationDescriptor] {
        self.get(model).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Per-record validity check.
///
/// Implementations must be deterministic and free of side effects visible to
/// the caller; a record may be checked more than once.
pub trait Validator {
    fn is_valid(&self, record: &Record) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&Record) -> bool,
{
    fn is_valid(&self, record: &Record) -> bool {
        self(record)
    }
}
