use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DocumentId;

/// The schemaless JSON object stored for a record.
pub type DocumentBody = serde_json::Map<String, serde_json::Value>;

/// A stored record together with its store-assigned metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier assigned at insert time. Never part of `body`.
    pub id: DocumentId,

    /// Collection the document belongs to (e.g., "product").
    pub collection: String,

    /// The raw stored fields.
    pub body: DocumentBody,

    /// When the document was inserted.
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Creates a freshly inserted document with a new id.
    pub fn new(collection: impl Into<String>, body: DocumentBody) -> Self {
        Self {
            id: DocumentId::new(),
            collection: collection.into(),
            body,
            created_at: Utc::now(),
        }
    }

    /// Returns a field of the stored body, if present.
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.body.get(field)
    }
}

/// Reserved keys that callers may not set on a body.
pub const RESERVED_KEYS: [&str; 2] = ["_id", "id"];

/// Validates a body before insert.
pub fn validate_document_for_insert(collection: &str, body: &DocumentBody) -> crate::Result<()> {
    if collection.trim().is_empty() {
        return Err(crate::StoreError::InvalidDocument(
            "collection name must not be empty".to_string(),
        ));
    }
    if let Some(key) = RESERVED_KEYS.iter().find(|k| body.contains_key(**k)) {
        return Err(crate::StoreError::InvalidDocument(format!(
            "field '{key}' is assigned by the store"
        )));
    }
    Ok(())
}
