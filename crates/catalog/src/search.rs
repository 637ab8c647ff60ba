//! Product search criteria and their translation into a store filter.

use document_store::Filter;
use serde::Deserialize;

use crate::validation::ValidationErrors;

/// Number of results returned when no limit is given.
pub const DEFAULT_LIMIT: usize = 40;

/// Largest accepted limit.
pub const MAX_LIMIT: usize = 100;

/// Fields searched by the free-text term.
pub const TEXT_SEARCH_FIELDS: [&str; 4] = ["name", "description", "category", "location"];

/// Raw search parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<i64>,
}

/// Validated search criteria.
///
/// Every criterion is optional and they combine with AND. Results come back
/// in whatever order the store yields them, capped at `limit`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSearch {
    q: Option<String>,
    category: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    limit: usize,
}

impl Default for ProductSearch {
    fn default() -> Self {
        Self {
            q: None,
            category: None,
            min_price: None,
            max_price: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ProductSearch {
    /// Creates a search matching everything, capped at [`DEFAULT_LIMIT`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates raw parameters.
    ///
    /// Empty `q` and `category` strings are treated as absent.
    pub fn from_params(params: SearchParams) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let min_price = check_price("min_price", params.min_price, &mut errors);
        let max_price = check_price("max_price", params.max_price, &mut errors);

        let limit = match params.limit {
            None => DEFAULT_LIMIT,
            Some(limit) if (1..=MAX_LIMIT as i64).contains(&limit) => limit as usize,
            Some(_) => {
                errors.add("limit", format!("must be between 1 and {MAX_LIMIT}"));
                DEFAULT_LIMIT
            }
        };

        errors.into_result(Self {
            q: params.q.filter(|q| !q.is_empty()),
            category: params.category.filter(|c| !c.is_empty()),
            min_price,
            max_price,
            limit,
        })
    }

    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into()).filter(|q| !q.is_empty());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into()).filter(|c| !c.is_empty());
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Builds the store filter for these criteria.
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();

        if let Some(q) = &self.q {
            filter = filter.and(Filter::Or(
                TEXT_SEARCH_FIELDS
                    .iter()
                    .map(|field| Filter::contains_ignore_case(*field, q.clone()))
                    .collect(),
            ));
        }
        if let Some(category) = &self.category {
            filter = filter.and(Filter::eq_ignore_case("category", category.clone()));
        }
        if let Some(min) = self.min_price {
            filter = filter.and(Filter::gte("price", min));
        }
        if let Some(max) = self.max_price {
            filter = filter.and(Filter::lte("price", max));
        }

        filter
    }
}

fn check_price(field: &str, value: Option<f64>, errors: &mut ValidationErrors) -> Option<f64> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            errors.add(field, "must be a non-negative number");
            None
        }
        other => other,
    }
}
