use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::validate_document_for_insert;
use crate::{
    Document, DocumentBody, DocumentId, Filter, Result,
    store::{DocumentStore, FindOptions},
};

/// In-memory document store implementation for testing.
///
/// This implementation keeps every collection in memory and provides
/// the same interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<BTreeMap<String, Vec<Document>>>>,
}

impl InMemoryDocumentStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents stored in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Stores a body as-is, bypassing insert validation.
    ///
    /// Lets tests plant records with shapes the service itself would never
    /// write (missing fields, string prices).
    pub async fn insert_raw(&self, collection: &str, body: DocumentBody) -> DocumentId {
        let document = Document::new(collection, body);
        let id = document.id;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        id
    }

    /// Clears all collections.
    pub async fn clear(&self) {
        self.collections.write().await.clear();
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: &str, body: DocumentBody) -> Result<DocumentId> {
        validate_document_for_insert(collection, &body)?;
        Ok(self.insert_raw(collection, body).await)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>> {
        let store = self.collections.read().await;
        let Some(documents) = store.get(collection) else {
            return Ok(Vec::new());
        };

        let matching = documents.iter().filter(|d| filter.matches(&d.body)).cloned();
        let documents = match options.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        };

        Ok(documents)
    }

    async fn find_by_id(&self, collection: &str, id: DocumentId) -> Result<Option<Document>> {
        let store = self.collections.read().await;
        Ok(store
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let store = self.collections.read().await;
        Ok(store
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }
}
