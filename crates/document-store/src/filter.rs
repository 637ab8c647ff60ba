use serde_json::Value;

use crate::DocumentBody;

/// A storage-agnostic predicate over document fields.
///
/// Text predicates only match fields holding a JSON string and numeric
/// predicates only match fields holding a JSON number, the same way a
/// document database compares typed values. Backends must agree on this so
/// a query returns the same records whichever store runs it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// Matches every document.
    #[default]
    All,

    /// Field equals the given JSON value (numbers compare by value).
    Eq { field: String, value: Value },

    /// Field is a string equal to `value`, ignoring case.
    EqIgnoreCase { field: String, value: String },

    /// Field is a string containing `value` as a substring, ignoring case.
    ContainsIgnoreCase { field: String, value: String },

    /// Field is a number greater than or equal to `value`.
    Gte { field: String, value: f64 },

    /// Field is a number less than or equal to `value`.
    Lte { field: String, value: f64 },

    /// Every sub-filter matches. An empty list matches everything.
    And(Vec<Filter>),

    /// At least one sub-filter matches. An empty list matches nothing.
    Or(Vec<Filter>),
}

impl Filter {
    /// Creates an empty filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn eq_ignore_case(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::EqIgnoreCase {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains_ignore_case(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::ContainsIgnoreCase {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn gte(field: impl Into<String>, value: f64) -> Self {
        Filter::Gte {
            field: field.into(),
            value,
        }
    }

    pub fn lte(field: impl Into<String>, value: f64) -> Self {
        Filter::Lte {
            field: field.into(),
            value,
        }
    }

    /// Combines two filters so both must match, flattening nested `And`s
    /// and dropping `All`.
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), f) => {
                left.push(f);
                Filter::And(left)
            }
            (f, Filter::And(mut right)) => {
                right.insert(0, f);
                Filter::And(right)
            }
            (left, right) => Filter::And(vec![left, right]),
        }
    }

    /// Evaluates the filter against a stored body.
    pub fn matches(&self, body: &DocumentBody) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => body.get(field).is_some_and(|v| json_eq(v, value)),
            Filter::EqIgnoreCase { field, value } => string_field(body, field)
                .is_some_and(|s| s.to_lowercase() == value.to_lowercase()),
            Filter::ContainsIgnoreCase { field, value } => string_field(body, field)
                .is_some_and(|s| s.to_lowercase().contains(&value.to_lowercase())),
            Filter::Gte { field, value } => number_field(body, field).is_some_and(|n| n >= *value),
            Filter::Lte { field, value } => number_field(body, field).is_some_and(|n| n <= *value),
            Filter::And(filters) => filters.iter().all(|f| f.matches(body)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(body)),
        }
    }
}

fn string_field<'a>(body: &'a DocumentBody, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str)
}

fn number_field(body: &DocumentBody, field: &str) -> Option<f64> {
    body.get(field).and_then(Value::as_f64)
}

fn json_eq(stored: &Value, expected: &Value) -> bool {
    match (stored, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => stored == expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> DocumentBody {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn all_matches_anything() {
        assert!(Filter::new().matches(&DocumentBody::new()));
    }

    #[test]
    fn eq_compares_numbers_by_value() {
        let doc = body(json!({"name": "Vase", "price": 1299}));
        assert!(Filter::eq("price", 1299.0).matches(&doc));
        assert!(Filter::eq("name", "Vase").matches(&doc));
        assert!(!Filter::eq("name", "vase").matches(&doc));
        assert!(!Filter::eq("missing", "Vase").matches(&doc));
    }

    #[test]
    fn contains_ignore_case_is_a_literal_substring() {
        let doc = body(json!({"name": "Blue Pottery Bowl"}));
        assert!(Filter::contains_ignore_case("name", "POTTERY").matches(&doc));
        assert!(!Filter::contains_ignore_case("name", "pot.ery").matches(&doc));
        assert!(!Filter::contains_ignore_case("description", "pottery").matches(&doc));
    }

    #[test]
    fn eq_ignore_case_requires_whole_value() {
        let doc = body(json!({"category": "Ceramics"}));
        assert!(Filter::eq_ignore_case("category", "ceramics").matches(&doc));
        assert!(!Filter::eq_ignore_case("category", "ceram").matches(&doc));
    }

    #[test]
    fn text_predicates_skip_non_strings() {
        let doc = body(json!({"location": 42}));
        assert!(!Filter::contains_ignore_case("location", "4").matches(&doc));
    }

    #[test]
    fn range_predicates_only_match_numbers() {
        let numeric = body(json!({"price": 899}));
        let textual = body(json!({"price": "899"}));
        let range = Filter::gte("price", 800.0).and(Filter::lte("price", 900.0));

        assert!(range.matches(&numeric));
        assert!(!range.matches(&textual));
        assert!(Filter::gte("price", 899.0).matches(&numeric));
        assert!(Filter::lte("price", 899.0).matches(&numeric));
        assert!(!Filter::gte("price", 899.5).matches(&numeric));
    }

    #[test]
    fn empty_or_matches_nothing() {
        assert!(!Filter::Or(vec![]).matches(&DocumentBody::new()));
        assert!(Filter::And(vec![]).matches(&DocumentBody::new()));
    }

    #[test]
    fn and_flattens_and_drops_all() {
        let f = Filter::new()
            .and(Filter::eq("a", 1))
            .and(Filter::eq("b", 2))
            .and(Filter::All);
        assert_eq!(f, Filter::And(vec![Filter::eq("a", 1), Filter::eq("b", 2)]));

        assert_eq!(Filter::All.and(Filter::eq("a", 1)), Filter::eq("a", 1));
    }
}
