//! Schema model
//!
//! A [`Schema`] is a declaration-ordered mapping from constraint names to
//! [`SchemaValue`]s, with typed accessors for every recognized constraint.
//! Unrecognized keys are preserved opaquely, so custom attributes and
//! `messages` entries survive untouched.
//!
//! The module is organized as:
//! - `mod.rs`: the `Schema` mapping, typed accessors, and accessor views
//! - [`value`]: the recursive `SchemaValue` sum type and conversions
//! - [`build`]: the fluent `SchemaBuilder`
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

pub mod build;
pub mod value;

pub use build::SchemaBuilder;
pub use value::{ConformFn, FilterFn, RequiredFn, SchemaValue};

use regex::Regex;
use serde_json::{Map, Value};

/// A declarative description of a value's expected shape and constraints.
///
/// Entries keep their declaration order; properties are walked in the order
/// the schema author wrote them, and violation order follows.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    entries: Vec<(String, SchemaValue)>,
}

/// The `required` constraint: a plain flag, or a predicate the engine calls
/// lazily with `(document, property)` when the value is absent.
pub enum Required<'a> {
    Always(bool),
    Computed(&'a RequiredFn),
}

/// The `dependencies` constraint in its three declared forms.
pub enum Dependencies<'a> {
    /// A single sibling property that must be present.
    Property(&'a str),
    /// Every named sibling must be present.
    Properties(Vec<&'a str>),
    /// The whole document level must satisfy this schema.
    Schema(&'a Schema),
}

/// The effective `additionalProperties` policy of a schema level.
pub enum AdditionalProperties<'a> {
    Allowed(bool),
    Schema(&'a Schema),
}

/// The `pattern` constraint: pre-compiled, or a source string compiled at
/// check time.
pub enum PatternSpec<'a> {
    Compiled(&'a Regex),
    Source(&'a str),
}

impl Schema {
    /// An empty schema; validates every document.
    pub fn new() -> Self {
        Schema::default()
    }

    /// Start a fluent builder.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Build the declarative subset from parsed JSON. Non-object input
    /// yields the empty schema.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Schema::from_object(map.clone()),
            _ => Schema::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Look up a raw entry. Schemas are small, so lookup is a linear scan
    /// over the ordered entries.
    pub fn get(&self, key: &str) -> Option<&SchemaValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Insert or replace an entry, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SchemaValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Project the declarative subset back onto JSON (function-valued
    /// members become null, compiled regexes their source).
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.entries {
            map.insert(name.clone(), value.to_json());
        }
        Value::Object(map)
    }

    // ---- typed accessors -------------------------------------------------

    /// Declared type candidates in order: a single name, or each string of
    /// a list. Absent or non-string-shaped declarations yield `None`.
    pub fn type_names(&self) -> Option<Vec<&str>> {
        match self.get("type")? {
            SchemaValue::String(name) => Some(vec![name.as_str()]),
            SchemaValue::Sequence(values) => {
                Some(values.iter().filter_map(SchemaValue::as_str).collect())
            }
            _ => None,
        }
    }

    /// The declared type only when it is a single name. Candidate lists do
    /// not coerce and do not exempt `required`, so those paths use this.
    pub fn single_type_name(&self) -> Option<&str> {
        match self.get("type")? {
            SchemaValue::String(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// `properties` entries whose value is a schema, in declaration order.
    pub fn properties(&self) -> Option<impl Iterator<Item = (&str, &Schema)>> {
        let mapping = self.get("properties")?.as_mapping()?;
        Some(mapping.iter().filter_map(|(name, value)| {
            value.as_mapping().map(|schema| (name, schema))
        }))
    }

    /// `patternProperties` entries, keyed by regular-expression source.
    pub fn pattern_properties(&self) -> Option<impl Iterator<Item = (&str, &Schema)>> {
        let mapping = self.get("patternProperties")?.as_mapping()?;
        Some(mapping.iter().filter_map(|(source, value)| {
            value.as_mapping().map(|schema| (source, schema))
        }))
    }

    /// The schema's own `additionalProperties` declaration, if present.
    pub fn additional_properties(&self) -> Option<AdditionalProperties<'_>> {
        match self.get("additionalProperties")? {
            SchemaValue::Bool(allowed) => Some(AdditionalProperties::Allowed(*allowed)),
            SchemaValue::Mapping(schema) => Some(AdditionalProperties::Schema(schema)),
            _ => None,
        }
    }

    /// Whether this level declares any of the keys that drive an object
    /// walk. Presence counts, whatever the value.
    pub fn walks_objects(&self) -> bool {
        self.contains_key("properties")
            || self.contains_key("patternProperties")
            || self.contains_key("additionalProperties")
    }

    /// Element schema applied to every item of an array value.
    pub fn items(&self) -> Option<&Schema> {
        self.get("items")?.as_mapping()
    }

    pub fn required(&self) -> Option<Required<'_>> {
        match self.get("required")? {
            SchemaValue::Bool(flag) => Some(Required::Always(*flag)),
            SchemaValue::RequiredPredicate(f) => Some(Required::Computed(f)),
            _ => None,
        }
    }

    pub fn default_value(&self) -> Option<&SchemaValue> {
        self.get("default")
    }

    pub fn enum_values(&self) -> Option<&[SchemaValue]> {
        self.get("enum")?.as_sequence()
    }

    pub fn pattern(&self) -> Option<PatternSpec<'_>> {
        match self.get("pattern")? {
            SchemaValue::Regex(re) => Some(PatternSpec::Compiled(re)),
            SchemaValue::String(source) => Some(PatternSpec::Source(source)),
            _ => None,
        }
    }

    pub fn format(&self) -> Option<&str> {
        self.get("format")?.as_str()
    }

    /// The raw `filter` declaration; the engine interprets name / transform /
    /// list forms itself.
    pub fn filter_spec(&self) -> Option<&SchemaValue> {
        self.get("filter")
    }

    pub fn conform(&self) -> Option<&ConformFn> {
        match self.get("conform")? {
            SchemaValue::ConformPredicate(f) => Some(f),
            _ => None,
        }
    }

    pub fn dependencies(&self) -> Option<Dependencies<'_>> {
        match self.get("dependencies")? {
            SchemaValue::String(name) => Some(Dependencies::Property(name)),
            SchemaValue::Sequence(values) => Some(Dependencies::Properties(
                values.iter().filter_map(SchemaValue::as_str).collect(),
            )),
            SchemaValue::Mapping(schema) => Some(Dependencies::Schema(schema)),
            _ => None,
        }
    }

    fn numeric_bound(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64()
    }

    pub fn min_length(&self) -> Option<f64> {
        self.numeric_bound("minLength")
    }

    pub fn max_length(&self) -> Option<f64> {
        self.numeric_bound("maxLength")
    }

    pub fn minimum(&self) -> Option<f64> {
        self.numeric_bound("minimum")
    }

    pub fn maximum(&self) -> Option<f64> {
        self.numeric_bound("maximum")
    }

    pub fn exclusive_minimum(&self) -> Option<f64> {
        self.numeric_bound("exclusiveMinimum")
    }

    pub fn exclusive_maximum(&self) -> Option<f64> {
        self.numeric_bound("exclusiveMaximum")
    }

    pub fn divisible_by(&self) -> Option<f64> {
        self.numeric_bound("divisibleBy")
    }

    pub fn min_items(&self) -> Option<f64> {
        self.numeric_bound("minItems")
    }

    pub fn max_items(&self) -> Option<f64> {
        self.numeric_bound("maxItems")
    }

    pub fn unique_items(&self) -> bool {
        self.get("uniqueItems")
            .and_then(SchemaValue::as_bool)
            .unwrap_or(false)
    }

    /// Per-attribute message overrides.
    pub fn messages(&self) -> Option<&Schema> {
        self.get("messages")?.as_mapping()
    }

    /// Schema-wide message override.
    pub fn message(&self) -> Option<&str> {
        self.get("message")?.as_str()
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Schema::from_object(map),
            _ => Schema::new(),
        }
    }
}

impl From<&Value> for Schema {
    fn from(value: &Value) -> Self {
        Schema::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_declaration_order_preserved() {
        let mut schema = Schema::new();
        schema.insert("zeta", 1i64);
        schema.insert("alpha", 2i64);
        schema.insert("mid", 3i64);
        let keys: Vec<&str> = schema.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        // Replacing keeps the slot.
        schema.insert("alpha", 9i64);
        let keys: Vec<&str> = schema.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_type_accessors() {
        let single = Schema::from_json(&json!({"type": "string"}));
        assert_eq!(single.type_names(), Some(vec!["string"]));
        assert_eq!(single.single_type_name(), Some("string"));

        let multi = Schema::from_json(&json!({"type": ["boolean", "number"]}));
        assert_eq!(multi.type_names(), Some(vec!["boolean", "number"]));
        assert_eq!(multi.single_type_name(), None);
    }

    #[test]
    fn test_dependencies_forms() {
        let by_name = Schema::from_json(&json!({"dependencies": "country"}));
        assert!(matches!(
            by_name.dependencies(),
            Some(Dependencies::Property("country"))
        ));

        let by_list = Schema::from_json(&json!({"dependencies": ["a", "b"]}));
        match by_list.dependencies() {
            Some(Dependencies::Properties(names)) => assert_eq!(names, vec!["a", "b"]),
            _ => panic!("expected list form"),
        }

        let by_schema = Schema::from_json(&json!({"dependencies": {"properties": {}}}));
        assert!(matches!(
            by_schema.dependencies(),
            Some(Dependencies::Schema(_))
        ));
    }

    #[test]
    fn test_required_predicate_survives() {
        let mut schema = Schema::new();
        schema.insert(
            "required",
            SchemaValue::required_fn(|doc, _| doc.get("mode").is_some()),
        );
        match schema.required() {
            Some(Required::Computed(f)) => {
                assert!(f(&json!({"mode": "strict"}), "x"));
                assert!(!f(&json!({}), "x"));
            }
            _ => panic!("expected computed required"),
        }
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let schema = Schema::from_json(&json!({
            "type": "string",
            "x-notes": {"audience": "internal"}
        }));
        assert!(schema.contains_key("x-notes"));
        assert_eq!(
            schema.to_json()["x-notes"],
            json!({"audience": "internal"})
        );
    }

    #[test]
    fn test_walks_objects_on_presence() {
        assert!(Schema::from_json(&json!({"additionalProperties": false})).walks_objects());
        assert!(Schema::from_json(&json!({"properties": {}})).walks_objects());
        assert!(!Schema::from_json(&json!({"type": "object"})).walks_objects());
    }
}
