//! The canonical product shape and its projection from stored documents.

use document_store::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A catalog product as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub location: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl Product {
    /// Projects a raw stored document into a `Product`.
    ///
    /// Never fails: absent or oddly-typed fields fall back to their defaults
    /// (`price` 0, `category` and `name` empty, `in_stock` true, optional
    /// text fields absent).
    pub fn from_document(document: &Document) -> Self {
        let field = |name: &str| document.get(name).filter(|v| !v.is_null());

        Self {
            id: document.id.to_string(),
            name: field("name").map(coerce_text).unwrap_or_default(),
            description: field("description").map(coerce_text),
            price: field("price").map_or(0.0, coerce_price),
            category: field("category").map(coerce_text).unwrap_or_default(),
            location: field("location").map(coerce_text),
            image: field("image").map(coerce_text),
            in_stock: field("in_stock").is_none_or(coerce_bool),
        }
    }
}

impl From<&Document> for Product {
    fn from(document: &Document) -> Self {
        Self::from_document(document)
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_price(value: &Value) -> f64 {
    let price = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if price.is_finite() { price } else { 0.0 }
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Null => true,
    }
}
