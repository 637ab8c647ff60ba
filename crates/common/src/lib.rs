//! Shared types for the catalog service.

pub mod types;

pub use types::{DocumentId, InvalidDocumentId};
