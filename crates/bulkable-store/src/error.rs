use bulkable_types::ModelName;

/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An insert-many call was issued with no documents.
    #[error("insert into {0} must contain at least one document")]
    EmptyBatch(ModelName),

    /// Storage backend is read-only or otherwise unavailable.
    #[error("store is read-only")]
    ReadOnly,

    /// Failure reported by a backend (driver error, network error, ...).
    #[error("backend error on {model}: {message}")]
    Backend { model: ModelName, message: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
