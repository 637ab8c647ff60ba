use async_trait::async_trait;

use crate::{Document, DocumentBody, DocumentId, Filter, Result};

/// Options for `find` queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    /// Maximum number of documents to return. `None` means no cap.
    pub limit: Option<usize>,
}

impl FindOptions {
    /// Creates options with no limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options returning at most `limit` documents.
    pub fn limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

/// Core trait for document store implementations.
///
/// A document store persists schemaless JSON objects grouped into
/// collections and owns the identifiers of everything it stores.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a body into a collection and returns the id it was assigned.
    ///
    /// The body must not carry its own id.
    async fn insert(&self, collection: &str, body: DocumentBody) -> Result<DocumentId>;

    /// Retrieves documents of a collection matching `filter`.
    ///
    /// Documents are returned in insertion order, capped at `options.limit`.
    /// Callers should not rely on the order.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>>;

    /// Retrieves a single document by id.
    ///
    /// Returns None if no document in the collection has this id.
    async fn find_by_id(&self, collection: &str, id: DocumentId) -> Result<Option<Document>>;

    /// Lists the names of collections holding at least one document.
    async fn list_collections(&self) -> Result<Vec<String>>;
}

/// Extension trait providing convenience methods for document stores.
#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    /// Returns the first document matching `filter`.
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        Ok(self
            .find(collection, filter, FindOptions::limit(1))
            .await?
            .into_iter()
            .next())
    }

    /// Checks if any document matches `filter`.
    async fn exists(&self, collection: &str, filter: &Filter) -> Result<bool> {
        Ok(self.find_one(collection, filter).await?.is_some())
    }
}

// Blanket implementation for all DocumentStore implementations
impl<T: DocumentStore + ?Sized> DocumentStoreExt for T {}
