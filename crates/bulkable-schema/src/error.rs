use std::fmt;

use bulkable_types::ModelName;

/// Errors raised while assembling or loading a [`Schema`](crate::Schema).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The same model was declared twice.
    #[error("model declared twice: {0}")]
    DuplicateModel(ModelName),

    /// A model declares two relations with the same name.
    #[error("relation '{relation}' declared twice on {model}")]
    DuplicateRelation { model: ModelName, relation: String },

    /// A relation points at a model that is not part of the schema.
    #[error("relation '{relation}' on {model} targets undeclared model {target}")]
    UnknownTarget {
        model: ModelName,
        relation: String,
        target: ModelName,
    },

    /// A relation names an inverse that the target does not declare as owned-by.
    #[error("relation '{relation}' on {model} names inverse '{inverse}', which {target} does not declare as owned-by")]
    InvalidInverse {
        model: ModelName,
        relation: String,
        target: ModelName,
        inverse: String,
    },

    /// The JSON schema document could not be parsed.
    #[error("schema JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PartialEq for SchemaError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        fmt::format(format_args!("{self}")) == fmt::format(format_args!("{other}"))
    }
}

impl Eq for SchemaError {}

/// Result alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
