//! Explicit validation of create payloads.

use document_store::DocumentBody;
use serde::Serialize;
use serde_json::{Map, Value};

/// A single problem found while validating input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every problem found in one piece of input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a problem with `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns `Ok(value)` if nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed")?;
        for (i, err) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A validated product payload, ready to be inserted.
///
/// Has no id: ids are always assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub location: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl NewProduct {
    /// Creates a product with only the required fields set.
    pub fn new(name: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            category: category.into(),
            location: None,
            image: None,
            in_stock: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Validates an untyped JSON payload, collecting every problem.
    pub fn from_json(payload: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let Some(object) = payload.as_object() else {
            errors.add("body", "must be a JSON object");
            return Err(errors);
        };

        // `id` and `_id` are ignored along with any other unknown key.
        let name = required_string(object, "name", &mut errors);
        let price = required_price(object, &mut errors);
        let category = required_string(object, "category", &mut errors);
        let description = optional_string(object, "description", &mut errors);
        let location = optional_string(object, "location", &mut errors);
        let image = optional_string(object, "image", &mut errors);
        let in_stock = match object.get("in_stock") {
            None | Some(Value::Null) => true,
            Some(value) => parse_bool(value).unwrap_or_else(|| {
                errors.add("in_stock", "must be a boolean");
                true
            }),
        };

        match (name, price, category) {
            (Some(name), Some(price), Some(category)) => errors.into_result(Self {
                name,
                description,
                price,
                category,
                location,
                image,
                in_stock,
            }),
            _ => Err(errors),
        }
    }

    /// Converts the payload into the body stored for it.
    ///
    /// Absent optional fields are left out rather than stored as null.
    pub fn into_body(self) -> DocumentBody {
        let mut body = Map::new();
        body.insert("name".into(), Value::from(self.name));
        if let Some(description) = self.description {
            body.insert("description".into(), Value::from(description));
        }
        body.insert("price".into(), Value::from(self.price));
        body.insert("category".into(), Value::from(self.category));
        if let Some(location) = self.location {
            body.insert("location".into(), Value::from(location));
        }
        if let Some(image) = self.image {
            body.insert("image".into(), Value::from(image));
        }
        body.insert("in_stock".into(), Value::from(self.in_stock));
        body
    }
}

fn required_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match object.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) => {
            errors.add(field, "is required");
            None
        }
        Some(_) => {
            errors.add(field, "must be a string");
            None
        }
    }
}

fn optional_string(
    object: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match object.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) => None,
        Some(_) => {
            errors.add(field, "must be a string");
            None
        }
    }
}

/// Accepts JSON numbers and numeric strings.
fn required_price(object: &Map<String, Value>, errors: &mut ValidationErrors) -> Option<f64> {
    let parsed = match object.get("price") {
        None | Some(Value::Null) => {
            errors.add("price", "is required");
            return None;
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(price) => Some(price),
            Err(_) => {
                errors.add("price", "must be a number");
                return None;
            }
        },
        Some(_) => {
            errors.add("price", "must be a number");
            return None;
        }
    };

    match parsed {
        Some(price) if price.is_finite() && price >= 0.0 => Some(price),
        _ => {
            errors.add("price", "must be a non-negative number");
            None
        }
    }
}

/// Reads booleans the way form-style clients send them.
fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
