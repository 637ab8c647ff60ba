//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::{CatalogError, ValidationErrors};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Input failed field-level validation.
    Validation(ValidationErrors),
    /// No document store is configured or reachable.
    Unavailable,
    /// Catalog operation error.
    Catalog(CatalogError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, errors.to_string(), Some(errors))
            }
            ApiError::Unavailable => {
                tracing::error!("request needs the database but none is available");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database not available".to_string(),
                    None,
                )
            }
            ApiError::Catalog(CatalogError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, errors.to_string(), Some(errors))
            }
            ApiError::Catalog(err) => {
                let (status, message) = catalog_error_to_response(err);
                (status, message, None)
            }
        };

        let body = match details {
            Some(errors) => serde_json::json!({ "error": message, "details": errors }),
            None => serde_json::json!({ "error": message }),
        };
        (status, axum::Json(body)).into_response()
    }
}

fn catalog_error_to_response(err: CatalogError) -> (StatusCode, String) {
    match &err {
        CatalogError::InvalidId(_) | CatalogError::Rejected(_) | CatalogError::Validation(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        CatalogError::Timeout(_) | CatalogError::Store(_) => {
            tracing::error!(error = %err, "internal server error");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}
