//! Model metadata for Bulkable.
//!
//! Bulk insertion needs two things from the model layer: which relations a
//! model declares (and of which kind), and whether a given record is valid.
//! This crate provides both as capability traits, plus a [`Schema`] registry
//! that implements them from declarative model definitions.
//!
//! # Quick Start
//!
//! ```rust
//! use bulkable_schema::{RelationLookup, Schema, Validator};
//! use bulkable_types::{ModelName, Record};
//!
//! let schema = Schema::from_json(r#"{
//!     "models": [
//!         {"name": "Stand",
//!          "fields": [{"name": "name", "rules": ["presence"]}],
//!          "relations": [{"name": "fruits", "kind": "owns_many", "target": "Fruit"}]},
//!         {"name": "Fruit"}
//!     ]
//! }"#).unwrap();
//!
//! let stand: ModelName = "Stand".parse().unwrap();
//! assert_eq!(schema.relations_of(&stand).len(), 1);
//! assert!(!schema.is_valid(&Record::new(stand)));
//! ```

pub mod error;
pub mod field;
pub mod relation;
pub mod schema;
pub mod traits;

pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDef, FieldRule, Violation};
pub use relation::{RelationDescriptor, RelationKind};
pub use schema::{ModelDef, Schema};
pub use traits::{RelationLookup, Validator};
