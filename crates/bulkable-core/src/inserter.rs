use std::collections::HashSet;
use std::sync::Arc;

use bulkable_schema::{RelationDescriptor, RelationLookup, Validator};
use bulkable_store::DocumentStore;
use bulkable_types::{set_foreign_key, Document, DocumentId, ModelName, Record, RecordRef};
use tracing::{debug, warn};

use crate::error::{BulkError, BulkResult};
use crate::grouping::TypeGroups;
use crate::options::{BulkCreateOptions, ReturnMode};
use crate::result::BulkCreateResult;

// ---------------------------------------------------------------------------
// Work items
// ---------------------------------------------------------------------------

/// The owner a record was reached from through an owning relation with a
/// declared inverse. Its id is written into the record's `<relation>_id`.
struct Owner {
    relation: String,
    id: DocumentId,
}

struct Member {
    record: RecordRef,
    owner: Option<Owner>,
}

impl Member {
    fn root(record: RecordRef) -> Self {
        Self {
            record,
            owner: None,
        }
    }

    /// Field snapshot plus foreign keys for every owned-by target that
    /// already has an id. The owner's id wins over the record's own slot.
    fn document(&self, relations: &[RelationDescriptor]) -> Document {
        let mut doc = self.record.to_document();
        for rel in relations.iter().filter(|r| r.kind.is_owned_by()) {
            if let Some(id) = self.record.related(&rel.name).first().and_then(|p| p.id()) {
                set_foreign_key(&mut doc, &rel.name, id);
            }
        }
        if let Some(owner) = &self.owner {
            set_foreign_key(&mut doc, &owner.relation, owner.id);
        }
        doc
    }
}

/// Records of one model processed together.
struct Batch {
    model: ModelName,
    members: Vec<Member>,
    /// Whether owning relations are followed. Off for owned-by parents so
    /// that creating a parent never descends into its other children.
    include_owned: bool,
}

enum Frame {
    /// Validate the batch and queue its owned-by parents ahead of its insert.
    Expand(Batch),
    /// Insert the (already validated) batch and queue what it owns.
    Insert(Batch),
}

// ---------------------------------------------------------------------------
// Homogeneity
// ---------------------------------------------------------------------------

/// Fail with [`BulkError::TypeMismatch`] if any record is not a `model`.
pub(crate) fn ensure_homogeneous<'r>(
    model: &ModelName,
    records: impl IntoIterator<Item = &'r RecordRef>,
) -> BulkResult<()> {
    for (index, record) in records.into_iter().enumerate() {
        if record.model() != model {
            return Err(BulkError::TypeMismatch {
                expected: model.clone(),
                found: record.model().clone(),
                index,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Inserter
// ---------------------------------------------------------------------------

/// Relation-aware inserter for one top-level call.
///
/// Recursion over the record graph is driven by an explicit stack of
/// frames, so graph depth never grows the call stack. Frames are popped in
/// the same order plain depth-first recursion would visit them:
///
/// 1. validate the batch; invalid records are reported and not traversed;
/// 2. process each requested owned-by parent group (`include_owned = false`);
/// 3. insert the valid records in one call;
/// 4. process each owned group (`include_owned = true`).
///
/// A record reached through relations is queued at most once per call.
pub(crate) struct Inserter<'a> {
    relations: &'a dyn RelationLookup,
    validator: &'a dyn Validator,
    store: &'a dyn DocumentStore,
    options: &'a BulkCreateOptions,
    seen: HashSet<*const Record>,
}

impl<'a> Inserter<'a> {
    pub(crate) fn new(
        relations: &'a dyn RelationLookup,
        validator: &'a dyn Validator,
        store: &'a dyn DocumentStore,
        options: &'a BulkCreateOptions,
    ) -> Self {
        Self {
            relations,
            validator,
            store,
            options,
            seen: HashSet::new(),
        }
    }

    /// Mark root records so relation traversal never queues them again.
    pub(crate) fn claim_roots(&mut self, records: &[RecordRef]) {
        self.seen.extend(records.iter().map(Arc::as_ptr));
    }

    /// Process one chunk of root records of `model`.
    pub(crate) fn run(
        &mut self,
        model: &ModelName,
        chunk: &[RecordRef],
    ) -> BulkResult<BulkCreateResult> {
        let mut out = BulkCreateResult::empty(self.options.return_mode);
        let mut stack = vec![Frame::Expand(Batch {
            model: model.clone(),
            members: chunk.iter().cloned().map(Member::root).collect(),
            include_owned: true,
        })];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Expand(batch) => self.expand(batch, &mut stack, &mut out)?,
                Frame::Insert(batch) => self.insert(batch, &mut stack, &mut out)?,
            }
        }
        Ok(out)
    }

    fn expand(
        &mut self,
        batch: Batch,
        stack: &mut Vec<Frame>,
        out: &mut BulkCreateResult,
    ) -> BulkResult<()> {
        ensure_homogeneous(&batch.model, batch.members.iter().map(|m| &m.record))?;

        let mut valid = Vec::with_capacity(batch.members.len());
        for member in batch.members {
            if self.options.validate && !self.validator.is_valid(&member.record) {
                out.push_invalid(member.record);
            } else {
                valid.push(member);
            }
        }
        if valid.is_empty() {
            debug!(model = %batch.model, "no valid records; nothing to insert");
            return Ok(());
        }

        let lookup = self.relations;
        let wanted = &self.options.owned_by_to_create;
        let requested: Vec<&RelationDescriptor> = lookup
            .relations_of(&batch.model)
            .iter()
            .filter(|r| r.kind.is_owned_by() && wanted.contains(&r.name))
            .collect();

        let mut parents = TypeGroups::new();
        for member in &valid {
            for rel in &requested {
                for target in member.record.related(&rel.name) {
                    if self.seen.insert(Arc::as_ptr(target)) {
                        parents.push(target.model(), Member::root(Arc::clone(target)));
                    }
                }
            }
        }

        stack.push(Frame::Insert(Batch {
            model: batch.model,
            members: valid,
            include_owned: batch.include_owned,
        }));
        // Reversed so the first group is popped first.
        for (model, members) in parents.into_groups().into_iter().rev() {
            debug!(%model, count = members.len(), "queued owned-by parents");
            stack.push(Frame::Expand(Batch {
                model,
                members,
                include_owned: false,
            }));
        }
        Ok(())
    }

    fn insert(
        &mut self,
        batch: Batch,
        stack: &mut Vec<Frame>,
        out: &mut BulkCreateResult,
    ) -> BulkResult<()> {
        let lookup = self.relations;
        let relations = lookup.relations_of(&batch.model);
        let documents: Vec<Document> = batch
            .members
            .iter()
            .map(|m| m.document(relations))
            .collect();
        let submitted = documents.len();

        let ids = self.store.insert_many(&batch.model, documents).map_err(|e| {
            warn!(model = %batch.model, error = %e, "insert_many failed; earlier inserts are kept");
            e
        })?;
        if ids.len() != submitted {
            return Err(BulkError::IdCountMismatch {
                model: batch.model,
                submitted,
                returned: ids.len(),
            });
        }
        debug!(model = %batch.model, count = submitted, "inserted batch");

        for (member, id) in batch.members.iter().zip(&ids) {
            member.record.assign_id(*id);
        }
        match self.options.return_mode {
            ReturnMode::InsertedIds => out.push_inserted(&batch.model, &ids),
            ReturnMode::CreatedObjects => {
                let created = self.store.find_by_ids(&batch.model, &ids)?;
                out.push_objects(created);
            }
        }

        if !batch.include_owned {
            return Ok(());
        }

        let mut children = TypeGroups::new();
        for (member, id) in batch.members.iter().zip(&ids) {
            for rel in relations.iter().filter(|r| r.kind.is_owning()) {
                for target in member.record.related(&rel.name) {
                    if !self.seen.insert(Arc::as_ptr(target)) {
                        continue;
                    }
                    let owner = rel.inverse.as_ref().map(|inverse| Owner {
                        relation: inverse.clone(),
                        id: *id,
                    });
                    children.push(
                        target.model(),
                        Member {
                            record: Arc::clone(target),
                            owner,
                        },
                    );
                }
            }
        }
        for (model, members) in children.into_groups().into_iter().rev() {
            debug!(%model, count = members.len(), "queued owned records");
            stack.push(Frame::Expand(Batch {
                model,
                members,
                include_owned: true,
            }));
        }
        Ok(())
    }
}
