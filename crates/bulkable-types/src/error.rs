use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid model name {0:?}: {1}")]
    InvalidModelName(String, &'static str),

    #[error("invalid document id: {0}")]
    InvalidDocumentId(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
