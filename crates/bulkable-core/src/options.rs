use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// What a bulk create call reports for successfully inserted records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnMode {
    /// The ids assigned by the store. Costs no extra queries.
    #[default]
    InsertedIds,
    /// The inserted documents as read back from the store. Costs one
    /// `find_by_ids` query per insert call.
    CreatedObjects,
}

/// Options for a bulk create call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkCreateOptions {
    /// Maximum number of root records per chunk. `None` puts every root
    /// record in a single chunk.
    pub batch_size: Option<usize>,
    /// Whether records are run through the validator before insertion.
    pub validate: bool,
    /// Owned-by relations whose targets are created alongside the records
    /// that point at them. Applies at every level of the graph.
    pub owned_by_to_create: BTreeSet<String>,
    pub return_mode: ReturnMode,
}

impl Default for BulkCreateOptions {
    fn default() -> Self {
        Self {
            batch_size: None,
            validate: true,
            owned_by_to_create: BTreeSet::new(),
            return_mode: ReturnMode::InsertedIds,
        }
    }
}

impl BulkCreateOptions {
    /// Options that skip validation entirely; every record is inserted.
    pub fn unvalidated() -> Self {
        Self {
            validate: false,
            ..Default::default()
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Also create the targets of the named owned-by relation.
    pub fn create_owned_by(mut self, relation: impl Into<String>) -> Self {
        self.owned_by_to_create.insert(relation.into());
        self
    }

    pub fn returning(mut self, mode: ReturnMode) -> Self {
        self.return_mode = mode;
        self
    }
}
