//! Store diagnostics endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use document_store::DocumentStore;
use serde::Serialize;

use crate::state::AppState;

/// How many collection names the report lists.
const MAX_COLLECTIONS: usize = 10;

/// How much of a store error message the report keeps.
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// GET /test: reports store connectivity.
///
/// Never fails: problems are described in the body instead.
#[tracing::instrument(skip(state))]
pub async fn report<S: DocumentStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<DiagnosticsResponse> {
    let (database, connection_status, collections) = match &state.catalog {
        None => (
            "Not initialized".to_string(),
            "Not Connected".to_string(),
            Vec::new(),
        ),
        Some(catalog) => match catalog.collections().await {
            Ok(mut names) => {
                names.truncate(MAX_COLLECTIONS);
                (
                    "Connected & Working".to_string(),
                    "Connected".to_string(),
                    names,
                )
            }
            Err(err) => {
                tracing::warn!(error = %err, "diagnostics could not list collections");
                let message: String = err.to_string().chars().take(MAX_ERROR_CHARS).collect();
                (
                    format!("Connected but Error: {message}"),
                    "Connected".to_string(),
                    Vec::new(),
                )
            }
        },
    };

    Json(DiagnosticsResponse {
        backend: "Running".to_string(),
        database,
        database_url: set_or_not(state.config.database_url.is_some()),
        database_name: set_or_not(state.config.database_name.is_some()),
        connection_status,
        collections,
    })
}

fn set_or_not(set: bool) -> String {
    if set { "Set" } else { "Not Set" }.to_string()
}
