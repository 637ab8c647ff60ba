//! Product catalog for the Crafty marketplace.
//!
//! This crate provides:
//! - `Product`, the canonical read shape, and its projection from raw documents
//! - `NewProduct`, the validated create payload
//! - `ProductSearch`, validated search criteria and their filter translation
//! - `CatalogService`, which runs every operation against a `DocumentStore`

pub mod error;
pub mod product;
pub mod samples;
pub mod search;
pub mod service;
pub mod validation;

pub use error::CatalogError;
pub use product::Product;
pub use samples::sample_products;
pub use search::{DEFAULT_LIMIT, MAX_LIMIT, ProductSearch, SearchParams};
pub use service::{CatalogService, DEFAULT_STORE_TIMEOUT, PRODUCT_COLLECTION};
pub use validation::{FieldError, NewProduct, ValidationErrors};
