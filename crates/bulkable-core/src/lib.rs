//! Relation-aware, validated bulk insertion for Bulkable.
//!
//! Given root records of one model, [`BulkCreator::bulk_create`] validates
//! them, inserts the valid ones with as few insert-many calls as possible,
//! follows owning relations (and, on request, owned-by relations) to insert
//! the connected records model by model, and reports what was created and
//! what was rejected across the whole graph.
//!
//! # Quick Start
//!
//! ```rust
//! use bulkable_core::{BulkCreateOptions, BulkCreator};
//! use bulkable_schema::Schema;
//! use bulkable_store::InMemoryDocumentStore;
//! use bulkable_types::{ModelName, Record};
//!
//! let schema = Schema::from_json(r#"{"models": [
//!     {"name": "Stand", "fields": [{"name": "name", "rules": ["presence"]}]}
//! ]}"#).unwrap();
//! let store = InMemoryDocumentStore::new();
//! let stand: ModelName = "Stand".parse().unwrap();
//!
//! let stands = vec![
//!     Record::new(stand.clone()).with_field("name", "Stand 1").into_ref(),
//!     Record::new(stand.clone()).into_ref(),
//! ];
//! let result = BulkCreator::new(&schema, &store)
//!     .bulk_create(&stand, &stands, &BulkCreateOptions::default())
//!     .unwrap();
//! assert_eq!(result.created_count(), 1);
//! assert_eq!(result.invalid_count(), 1);
//! ```
//!
//! # Guarantees
//!
//! - One insert-many call per model batch; calls are issued one at a time.
//! - Invalid records are never inserted and their relations are never
//!   followed.
//! - No atomicity: a store failure leaves earlier inserts in place.

pub mod creator;
pub mod error;
mod grouping;
mod inserter;
pub mod options;
pub mod result;
pub mod splitter;

#[cfg(test)]
mod fixtures;

pub use creator::BulkCreator;
pub use error::{BulkError, BulkResult};
pub use options::{BulkCreateOptions, ReturnMode};
pub use result::{BulkCreateResult, Created, InsertedId};
pub use splitter::split;
