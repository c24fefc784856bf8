//! Schema value representation
//!
//! A [`SchemaValue`] is one node of a schema tree: the six JSON shapes, a
//! compiled regular expression, and the three function-valued members a
//! schema may carry (required predicate, conform predicate, filter
//! transform). Every `serde_json::Value` converts into the declarative
//! subset, which is how schemas loaded from JSON files are built.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Number, Value};

use super::Schema;

/// Required predicate: called with the owning document and property name,
/// only when the property is absent.
pub type RequiredFn = Arc<dyn Fn(&Value, &str) -> bool + Send + Sync>;

/// Conform predicate: called with the value, the owning document, and the
/// property name.
pub type ConformFn = Arc<dyn Fn(&Value, &Value, &str) -> bool + Send + Sync>;

/// Filter transform: maps a value to its replacement, or fails with a
/// description that becomes the `filter` violation's actual payload.
pub type FilterFn = Arc<dyn Fn(&Value) -> std::result::Result<Value, String> + Send + Sync>;

/// One node of a schema tree.
#[derive(Clone)]
pub enum SchemaValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<SchemaValue>),
    Mapping(Schema),
    /// A pre-compiled `pattern` constraint.
    Regex(Regex),
    RequiredPredicate(RequiredFn),
    ConformPredicate(ConformFn),
    FilterTransform(FilterFn),
}

impl SchemaValue {
    /// Wrap a required predicate.
    pub fn required_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, &str) -> bool + Send + Sync + 'static,
    {
        SchemaValue::RequiredPredicate(Arc::new(f))
    }

    /// Wrap a conform predicate.
    pub fn conform_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value, &str) -> bool + Send + Sync + 'static,
    {
        SchemaValue::ConformPredicate(Arc::new(f))
    }

    /// Wrap a filter transform.
    pub fn filter_fn<F>(f: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        SchemaValue::FilterTransform(Arc::new(f))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SchemaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SchemaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SchemaValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[SchemaValue]> {
        match self {
            SchemaValue::Sequence(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Schema> {
        match self {
            SchemaValue::Mapping(schema) => Some(schema),
            _ => None,
        }
    }

    /// Lossy projection onto plain JSON: a compiled regex becomes its source
    /// string, function values become null. Used for `expected` payloads and
    /// for writing `default` values into documents.
    pub fn to_json(&self) -> Value {
        match self {
            SchemaValue::Null => Value::Null,
            SchemaValue::Bool(b) => Value::Bool(*b),
            SchemaValue::Number(n) => Value::Number(n.clone()),
            SchemaValue::String(s) => Value::String(s.clone()),
            SchemaValue::Sequence(values) => {
                Value::Array(values.iter().map(SchemaValue::to_json).collect())
            }
            SchemaValue::Mapping(schema) => schema.to_json(),
            SchemaValue::Regex(re) => Value::String(re.as_str().to_string()),
            SchemaValue::RequiredPredicate(_)
            | SchemaValue::ConformPredicate(_)
            | SchemaValue::FilterTransform(_) => Value::Null,
        }
    }
}

impl fmt::Debug for SchemaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaValue::Null => write!(f, "Null"),
            SchemaValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            SchemaValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            SchemaValue::String(s) => f.debug_tuple("String").field(s).finish(),
            SchemaValue::Sequence(values) => f.debug_tuple("Sequence").field(values).finish(),
            SchemaValue::Mapping(schema) => f.debug_tuple("Mapping").field(schema).finish(),
            SchemaValue::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            SchemaValue::RequiredPredicate(_) => write!(f, "RequiredPredicate(..)"),
            SchemaValue::ConformPredicate(_) => write!(f, "ConformPredicate(..)"),
            SchemaValue::FilterTransform(_) => write!(f, "FilterTransform(..)"),
        }
    }
}

impl From<Value> for SchemaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SchemaValue::Null,
            Value::Bool(b) => SchemaValue::Bool(b),
            Value::Number(n) => SchemaValue::Number(n),
            Value::String(s) => SchemaValue::String(s),
            Value::Array(values) => {
                SchemaValue::Sequence(values.into_iter().map(SchemaValue::from).collect())
            }
            Value::Object(map) => SchemaValue::Mapping(Schema::from_object(map)),
        }
    }
}

impl From<&Value> for SchemaValue {
    fn from(value: &Value) -> Self {
        SchemaValue::from(value.clone())
    }
}

impl From<bool> for SchemaValue {
    fn from(value: bool) -> Self {
        SchemaValue::Bool(value)
    }
}

impl From<i64> for SchemaValue {
    fn from(value: i64) -> Self {
        SchemaValue::Number(Number::from(value))
    }
}

impl From<u64> for SchemaValue {
    fn from(value: u64) -> Self {
        SchemaValue::Number(Number::from(value))
    }
}

impl From<f64> for SchemaValue {
    fn from(value: f64) -> Self {
        // Non-finite numbers have no JSON form; fold them to null like
        // serde_json's own lossy conversions do.
        Number::from_f64(value).map_or(SchemaValue::Null, SchemaValue::Number)
    }
}

impl From<&str> for SchemaValue {
    fn from(value: &str) -> Self {
        SchemaValue::String(value.to_string())
    }
}

impl From<String> for SchemaValue {
    fn from(value: String) -> Self {
        SchemaValue::String(value)
    }
}

impl From<Regex> for SchemaValue {
    fn from(value: Regex) -> Self {
        SchemaValue::Regex(value)
    }
}

impl From<Schema> for SchemaValue {
    fn from(value: Schema) -> Self {
        SchemaValue::Mapping(value)
    }
}

impl<T: Into<SchemaValue>> From<Vec<T>> for SchemaValue {
    fn from(values: Vec<T>) -> Self {
        SchemaValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

/// Build a `Schema` out of a JSON object's entries, in their stored order.
impl Schema {
    pub(crate) fn from_object(map: Map<String, Value>) -> Self {
        let mut schema = Schema::new();
        for (key, value) in map {
            schema.insert(key, SchemaValue::from(value));
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip_declarative_subset() {
        let value = json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "minLength": 2}
            }
        });
        let schema_value = SchemaValue::from(value.clone());
        assert_eq!(schema_value.to_json(), value);
    }

    #[test]
    fn test_regex_projects_to_source() {
        let sv = SchemaValue::from(Regex::new("^a+$").unwrap());
        assert_eq!(sv.to_json(), json!("^a+$"));
    }

    #[test]
    fn test_function_values_project_to_null() {
        let sv = SchemaValue::conform_fn(|_, _, _| true);
        assert_eq!(sv.to_json(), Value::Null);
        assert_eq!(format!("{:?}", sv), "ConformPredicate(..)");
    }
}
