//! Catalog error types.

use std::time::Duration;

use document_store::StoreError;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Longest store message carried back to clients on a rejected write.
pub const MAX_REJECTION_MESSAGE: usize = 200;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The id string is not a syntactically valid document id.
    #[error("Invalid product id")]
    InvalidId(String),

    /// No product has this id.
    #[error("Product not found")]
    NotFound(String),

    /// Search criteria or create payload failed validation.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// The store refused to insert the payload.
    #[error("{0}")]
    Rejected(String),

    /// The store did not answer within the configured budget.
    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    /// An error occurred in the document store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors)
    }
}

impl CatalogError {
    /// Builds a `Rejected` error from a store message, cut to
    /// [`MAX_REJECTION_MESSAGE`] characters.
    pub fn rejected(message: impl Into<String>) -> Self {
        let message = message.into();
        match message.char_indices().nth(MAX_REJECTION_MESSAGE) {
            Some((cut, _)) => CatalogError::Rejected(format!("{}...", &message[..cut])),
            None => CatalogError::Rejected(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_rejections_are_kept_whole() {
        let err = CatalogError::rejected("duplicate key");
        assert_eq!(err.to_string(), "duplicate key");
    }

    #[test]
    fn long_rejections_are_truncated_on_char_boundary() {
        let long = "é".repeat(MAX_REJECTION_MESSAGE + 10);
        let CatalogError::Rejected(message) = CatalogError::rejected(long) else {
            panic!("expected Rejected");
        };
        assert_eq!(message.chars().count(), MAX_REJECTION_MESSAGE + 3);
        assert!(message.ends_with("..."));
    }
}
