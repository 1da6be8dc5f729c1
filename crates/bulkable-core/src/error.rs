use bulkable_store::StoreError;
use bulkable_types::ModelName;
use thiserror::Error;

/// Errors that abort a bulk create call.
///
/// Validation failures are not errors; they are reported through
/// [`BulkCreateResult::invalid_objects`](crate::BulkCreateResult::invalid_objects).
#[derive(Debug, Error)]
pub enum BulkError {
    /// A batch mixes records of different models.
    #[error("batch of {expected} contains a {found} record at index {index}")]
    TypeMismatch {
        expected: ModelName,
        found: ModelName,
        index: usize,
    },

    /// The requested batch size is zero.
    #[error("batch size must be at least 1, got {0}")]
    InvalidBatchSize(usize),

    /// The store returned a different number of ids than documents submitted.
    #[error("insert into {model} submitted {submitted} documents but got {returned} ids")]
    IdCountMismatch {
        model: ModelName,
        submitted: usize,
        returned: usize,
    },

    /// An insert or lookup failed at the store. Earlier inserts are kept.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl BulkError {
    /// Returns `true` for errors caused by how the call was made rather than
    /// by the store.
    pub fn is_caller_misuse(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. } | Self::InvalidBatchSize(_))
    }
}

pub type BulkResult<T> = Result<T, BulkError>;
