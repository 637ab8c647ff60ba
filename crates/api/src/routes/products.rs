//! Product search, lookup and creation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use catalog::{NewProduct, Product, ProductSearch, SearchParams};
use document_store::DocumentStore;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/products: search products by text, category and price range.
#[tracing::instrument(skip(state, params))]
pub async fn list<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let search = ProductSearch::from_params(params)?;

    let catalog = state.catalog()?;
    let products = catalog.search(&search).await?;
    Ok(Json(products))
}

/// GET /api/products/{id}: load a single product.
#[tracing::instrument(skip(state))]
pub async fn get<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.catalog()?.get(&id).await?;
    Ok(Json(product))
}

/// POST /api/products: create a product and return its new id.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<String>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let product = NewProduct::from_json(&payload)?;

    let id = state.catalog()?.create(product).await?;
    Ok((StatusCode::CREATED, Json(id.to_string())))
}
