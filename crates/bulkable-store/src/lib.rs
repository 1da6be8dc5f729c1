//! Document store boundary for Bulkable.
//!
//! Bulk insertion talks to storage through one narrow contract: insert many
//! documents of one model in a single call and get their ids back in order,
//! and fetch documents by id. Everything else about the store (connection
//! handling, timeouts, retries) belongs to the backend.
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`InMemoryDocumentStore`] -- `HashMap`-based store for tests and embedding

pub mod document;
pub mod error;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use document::StoredDocument;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDocumentStore;
pub use traits::DocumentStore;
