//! Builder for constructing schemas programmatically
//!
//! This module provides a fluent builder API for schemas whose members
//! include function values (required predicates, conform predicates, filter
//! transforms) that the declarative JSON subset cannot express.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

use super::{Schema, SchemaValue};

/// Fluent builder for [`Schema`] values.
///
/// ```
/// use conforma_core::schema::Schema;
///
/// let schema = Schema::builder()
///     .property(
///         "town",
///         Schema::builder()
///             .type_name("string")
///             .required(true)
///             .min_length(2)
///             .build(),
///     )
///     .build();
/// assert!(schema.properties().is_some());
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Create a new, empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the declared type to a single name
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.schema.insert("type", name.into());
        self
    }

    /// Set the declared type to an ordered candidate list
    pub fn type_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: Vec<SchemaValue> =
            names.into_iter().map(|n| SchemaValue::String(n.into())).collect();
        self.schema.insert("type", SchemaValue::Sequence(candidates));
        self
    }

    /// Declare a named property's schema
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let properties = match self.schema.get("properties") {
            Some(SchemaValue::Mapping(existing)) => {
                let mut map = existing.clone();
                map.insert(name, schema);
                map
            }
            _ => {
                let mut map = Schema::new();
                map.insert(name, schema);
                map
            }
        };
        self.schema.insert("properties", properties);
        self
    }

    /// Declare a pattern property keyed by its regular-expression source
    pub fn pattern_property(mut self, source: impl Into<String>, schema: Schema) -> Self {
        let patterns = match self.schema.get("patternProperties") {
            Some(SchemaValue::Mapping(existing)) => {
                let mut map = existing.clone();
                map.insert(source, schema);
                map
            }
            _ => {
                let mut map = Schema::new();
                map.insert(source, schema);
                map
            }
        };
        self.schema.insert("patternProperties", patterns);
        self
    }

    /// Set the additional-properties policy (a bool or a schema)
    pub fn additional_properties(mut self, policy: impl Into<SchemaValue>) -> Self {
        self.schema.insert("additionalProperties", policy);
        self
    }

    /// Set the element schema applied to every array item
    pub fn items(mut self, schema: Schema) -> Self {
        self.schema.insert("items", schema);
        self
    }

    /// Mark the property required (or explicitly optional)
    pub fn required(mut self, flag: bool) -> Self {
        self.schema.insert("required", flag);
        self
    }

    /// Make requiredness computed from the owning document
    pub fn required_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value, &str) -> bool + Send + Sync + 'static,
    {
        self.schema.insert("required", SchemaValue::required_fn(predicate));
        self
    }

    /// Set the default value applied under `applyDefaultValue`
    pub fn default_value(mut self, value: impl Into<SchemaValue>) -> Self {
        self.schema.insert("default", value);
        self
    }

    /// Set the allowed value set
    pub fn enum_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SchemaValue>,
    {
        let values: Vec<SchemaValue> = values.into_iter().map(Into::into).collect();
        self.schema.insert("enum", SchemaValue::Sequence(values));
        self
    }

    /// Set the pattern constraint (a source string or a compiled regex)
    pub fn pattern(mut self, pattern: impl Into<SchemaValue>) -> Self {
        self.schema.insert("pattern", pattern);
        self
    }

    /// Set the named format constraint
    pub fn format(mut self, name: impl Into<String>) -> Self {
        self.schema.insert("format", name.into());
        self
    }

    /// Set the filter declaration: a registry name, a transform built with
    /// [`SchemaValue::filter_fn`], or a sequence of either
    pub fn filter(mut self, filter: impl Into<SchemaValue>) -> Self {
        self.schema.insert("filter", filter);
        self
    }

    /// Set an inline filter transform
    pub fn filter_fn<F>(mut self, transform: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.schema.insert("filter", SchemaValue::filter_fn(transform));
        self
    }

    /// Set the conform predicate
    pub fn conform<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value, &Value, &str) -> bool + Send + Sync + 'static,
    {
        self.schema.insert("conform", SchemaValue::conform_fn(predicate));
        self
    }

    /// Set the dependencies declaration (name, list of names, or schema)
    pub fn dependencies(mut self, dependencies: impl Into<SchemaValue>) -> Self {
        self.schema.insert("dependencies", dependencies);
        self
    }

    pub fn min_length(mut self, bound: u64) -> Self {
        self.schema.insert("minLength", bound);
        self
    }

    pub fn max_length(mut self, bound: u64) -> Self {
        self.schema.insert("maxLength", bound);
        self
    }

    pub fn minimum(mut self, bound: f64) -> Self {
        self.schema.insert("minimum", bound);
        self
    }

    pub fn maximum(mut self, bound: f64) -> Self {
        self.schema.insert("maximum", bound);
        self
    }

    pub fn exclusive_minimum(mut self, bound: f64) -> Self {
        self.schema.insert("exclusiveMinimum", bound);
        self
    }

    pub fn exclusive_maximum(mut self, bound: f64) -> Self {
        self.schema.insert("exclusiveMaximum", bound);
        self
    }

    pub fn divisible_by(mut self, divisor: f64) -> Self {
        self.schema.insert("divisibleBy", divisor);
        self
    }

    pub fn min_items(mut self, bound: u64) -> Self {
        self.schema.insert("minItems", bound);
        self
    }

    pub fn max_items(mut self, bound: u64) -> Self {
        self.schema.insert("maxItems", bound);
        self
    }

    pub fn unique_items(mut self, flag: bool) -> Self {
        self.schema.insert("uniqueItems", flag);
        self
    }

    /// Set the schema-wide message override
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.schema.insert("message", template.into());
        self
    }

    /// Set a per-attribute message override
    pub fn message_for(mut self, attribute: impl Into<String>, template: impl Into<String>) -> Self {
        let messages = match self.schema.get("messages") {
            Some(SchemaValue::Mapping(existing)) => {
                let mut map = existing.clone();
                map.insert(attribute, template.into());
                map
            }
            _ => {
                let mut map = Schema::new();
                map.insert(attribute, template.into());
                map
            }
        };
        self.schema.insert("messages", messages);
        self
    }

    /// Escape hatch: set any attribute by name
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<SchemaValue>) -> Self {
        self.schema.insert(name, value);
        self
    }

    /// Finish and return the schema
    pub fn build(self) -> Schema {
        self.schema
    }
}
