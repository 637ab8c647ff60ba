//! Sample data seeding endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use document_store::DocumentStore;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/seed: inserts the sample products not already present by name.
///
/// Responds with the number of products inserted.
#[tracing::instrument(skip(state))]
pub async fn seed<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<usize>, ApiError> {
    let inserted = state.catalog()?.seed().await?;
    Ok(Json(inserted))
}
