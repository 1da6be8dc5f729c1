use bulkable_schema::{RelationLookup, Schema, Validator};
use bulkable_store::DocumentStore;
use bulkable_types::{ModelName, RecordRef};
use tracing::info;

use crate::error::BulkResult;
use crate::inserter::{ensure_homogeneous, Inserter};
use crate::options::BulkCreateOptions;
use crate::result::BulkCreateResult;
use crate::splitter::split;

/// Entry point for bulk creation.
///
/// Holds the collaborators a bulk create call needs: relation metadata, the
/// validity check, and the store. The creator itself is stateless; one
/// instance can serve any number of calls.
pub struct BulkCreator<'a> {
    relations: &'a dyn RelationLookup,
    validator: &'a dyn Validator,
    store: &'a dyn DocumentStore,
}

impl<'a> BulkCreator<'a> {
    /// Use `schema` for relation metadata and validation.
    pub fn new(schema: &'a Schema, store: &'a dyn DocumentStore) -> Self {
        Self::from_parts(schema, schema, store)
    }

    /// Assemble a creator from independent collaborators.
    pub fn from_parts(
        relations: &'a dyn RelationLookup,
        validator: &'a dyn Validator,
        store: &'a dyn DocumentStore,
    ) -> Self {
        Self {
            relations,
            validator,
            store,
        }
    }

    /// Replace the validity check.
    pub fn with_validator(mut self, validator: &'a dyn Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Validate and insert `objects` of `model`, together with the records
    /// reachable through their owning relations and requested owned-by
    /// relations.
    ///
    /// Caller errors (zero batch size, a record of another model anywhere
    /// in `objects`) are reported before anything is written. A store
    /// failure aborts the call; records inserted before it stay inserted.
    pub fn bulk_create(
        &self,
        model: &ModelName,
        objects: &[RecordRef],
        options: &BulkCreateOptions,
    ) -> BulkResult<BulkCreateResult> {
        let chunks = split(objects, options.batch_size)?;
        ensure_homogeneous(model, objects)?;

        let mut inserter = Inserter::new(self.relations, self.validator, self.store, options);
        inserter.claim_roots(objects);

        let mut result = BulkCreateResult::empty(options.return_mode);
        for chunk in chunks {
            result.merge(inserter.run(model, chunk)?);
        }

        info!(
            %model,
            roots = objects.len(),
            created = result.created_count(),
            invalid = result.invalid_count(),
            insert_calls = result.insert_calls(),
            "bulk create finished"
        );
        Ok(result)
    }
}
