//! Shared application state.

use std::sync::Arc;

use catalog::CatalogService;
use document_store::DocumentStore;

use crate::config::Config;
use crate::error::ApiError;

/// Shared application state accessible from all handlers.
///
/// `catalog` is `None` when no store was configured or the connection
/// failed at start-up. Every store-backed handler checks it through
/// [`AppState::catalog`].
pub struct AppState<S: DocumentStore> {
    pub catalog: Option<CatalogService<S>>,
    pub config: Config,
}

impl<S: DocumentStore> AppState<S> {
    /// Builds state around an optional store, applying the configured timeout.
    pub fn new(store: Option<S>, config: Config) -> Arc<Self> {
        let catalog = store.map(|s| CatalogService::with_timeout(s, config.store_timeout));
        Arc::new(Self { catalog, config })
    }

    /// Returns the catalog, or `ApiError::Unavailable` if there is no store.
    pub fn catalog(&self) -> Result<&CatalogService<S>, ApiError> {
        self.catalog.as_ref().ok_or(ApiError::Unavailable)
    }
}
