use thiserror::Error;

/// Errors that can occur when interacting with the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document was refused before reaching storage.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl StoreError {
    /// Returns true when the store refused the payload itself, as opposed to
    /// being unreachable or failing internally.
    pub fn is_rejection(&self) -> bool {
        match self {
            StoreError::InvalidDocument(_) | StoreError::Serialization(_) => true,
            StoreError::Database(sqlx::Error::Database(_)) => true,
            StoreError::Database(_) | StoreError::Migration(_) => false,
        }
    }
}

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
