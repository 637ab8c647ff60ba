//! Liveness placeholders.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /: reports that the API is up.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Crafty API is running",
    })
}

/// GET /api/hello: static greeting for frontend wiring checks.
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!",
    })
}
