//! Catalog service providing the product operations over a document store.

use std::future::Future;
use std::time::Duration;

use common::DocumentId;
use document_store::{DocumentStore, DocumentStoreExt, Filter, FindOptions};

use crate::error::CatalogError;
use crate::product::Product;
use crate::samples::sample_products;
use crate::search::ProductSearch;
use crate::validation::NewProduct;

/// Collection holding catalog products.
pub const PRODUCT_COLLECTION: &str = "product";

/// Budget for a single store call unless configured otherwise.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Service for querying and creating products.
///
/// Holds no state of its own besides the store handle; every call is a
/// single store operation bounded by the configured timeout.
#[derive(Clone)]
pub struct CatalogService<S: DocumentStore> {
    store: S,
    timeout: Duration,
}

impl<S: DocumentStore> CatalogService<S> {
    /// Creates a new catalog service with the default store timeout.
    pub fn new(store: S) -> Self {
        Self::with_timeout(store, DEFAULT_STORE_TIMEOUT)
    }

    /// Creates a new catalog service with a custom store timeout.
    pub fn with_timeout(store: S, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Searches products matching every supplied criterion.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, search: &ProductSearch) -> Result<Vec<Product>, CatalogError> {
        metrics::counter!("catalog_searches_total").increment(1);

        let filter = search.to_filter();
        let documents = self
            .bounded(self.store.find(
                PRODUCT_COLLECTION,
                &filter,
                FindOptions::limit(search.limit()),
            ))
            .await??;

        Ok(documents.iter().map(Product::from_document).collect())
    }

    /// Looks up a product by its id string.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Product, CatalogError> {
        let document_id: DocumentId = id
            .parse()
            .map_err(|_| CatalogError::InvalidId(id.to_string()))?;

        let document = self
            .bounded(self.store.find_by_id(PRODUCT_COLLECTION, document_id))
            .await??
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        Ok(Product::from_document(&document))
    }

    /// Inserts a validated product and returns its new id.
    #[tracing::instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: NewProduct) -> Result<DocumentId, CatalogError> {
        let id = self
            .bounded(self.store.insert(PRODUCT_COLLECTION, product.into_body()))
            .await?
            .map_err(|e| {
                if e.is_rejection() {
                    CatalogError::rejected(e.to_string())
                } else {
                    CatalogError::Store(e)
                }
            })?;

        metrics::counter!("catalog_products_created_total").increment(1);
        tracing::info!(%id, "product created");
        Ok(id)
    }

    /// Inserts every sample product whose name is not already present.
    ///
    /// Returns how many were inserted. The name check and the insert are two
    /// separate store calls, so concurrent seeds can still both insert.
    #[tracing::instrument(skip(self))]
    pub async fn seed(&self) -> Result<usize, CatalogError> {
        let mut inserted = 0;
        for product in sample_products() {
            let by_name = Filter::eq("name", product.name.as_str());
            if self
                .bounded(self.store.exists(PRODUCT_COLLECTION, &by_name))
                .await??
            {
                tracing::debug!(name = %product.name, "sample already present");
                continue;
            }
            self.create(product).await?;
            inserted += 1;
        }

        metrics::counter!("catalog_seed_inserted_total").increment(inserted as u64);
        tracing::info!(inserted, "seed complete");
        Ok(inserted)
    }

    /// Lists the store's collection names.
    pub async fn collections(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.bounded(self.store.list_collections()).await??)
    }

    /// Applies the store timeout to a single store call.
    async fn bounded<T>(&self, call: impl Future<Output = T>) -> Result<T, CatalogError> {
        tokio::time::timeout(self.timeout, call).await.map_err(|_| {
            metrics::counter!("catalog_store_timeouts_total").increment(1);
            tracing::warn!(timeout = ?self.timeout, "store call timed out");
            CatalogError::Timeout(self.timeout)
        })
    }
}
