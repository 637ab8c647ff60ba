//! Document store abstraction for the catalog service.
//!
//! Records are schemaless JSON objects grouped into named collections.
//! Queries are expressed as a storage-agnostic [`Filter`] tree which each
//! backend evaluates natively.

pub mod document;
pub mod error;
pub mod filter;
pub mod memory;
pub mod postgres;
pub mod store;

pub use common::DocumentId;
pub use document::{Document, DocumentBody};
pub use error::{Result, StoreError};
pub use filter::Filter;
pub use memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use store::{DocumentStore, DocumentStoreExt, FindOptions};
