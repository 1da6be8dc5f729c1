//! Foundation types for Bulkable.
//!
//! This crate provides the identifier and record types shared by every other
//! Bulkable crate.
//!
//! # Key Types
//!
//! - [`ModelName`] -- Name of a declared model type (and of its collection)
//! - [`DocumentId`] -- Store-assigned identifier (UUID v7)
//! - [`Document`] -- Persistable field snapshot
//! - [`Record`] / [`RecordRef`] -- In-memory candidate object with relation slots

pub mod document;
pub mod error;
pub mod id;
pub mod model;
pub mod record;

pub use document::{foreign_key_field, set_foreign_key, Document};
pub use error::TypeError;
pub use id::DocumentId;
pub use model::ModelName;
pub use record::{Record, RecordRef};
