//! JSONPath mapping engine for field translation
//!
//! This module will implement the JSONPath mapping engine in issue #10.
//! Currently provides a minimal placeholder implementation.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::Result;
use super::TranslationContext;
use serde_json::Value;

/// JSONPath mapper for translating fields between uniform and provider formats
///
/// The JSONPathMapper handles the translation of fields from the uniform
/// PromptSpec format to provider-specific JSON structures using JSONPath
/// expressions defined in the provider specification.
pub struct JSONPathMapper<'a> {
    context: &'a TranslationContext,
}

impl<'a> JSONPathMapper<'a> {
    /// Create a new JSONPath mapper
    pub fn new(context: &'a TranslationContext) -> Self {
        Self { context }
    }

    /// Map a value from a source path to a target path
    ///
    /// This is a placeholder implementation. The full JSONPath mapping logic
    /// will be implemented in issue #10.
    pub fn map_field(
        &self,
        _source_path: &str,
        _target_path: &str,
        value: &Value,
    ) -> Result<Value> {
        // TODO: Implement JSONPath mapping logic (issue #10)
        // For now, just return the value as-is
        Ok(value.clone())
    }

    /// Apply all mappings from the provider spec
    ///
    /// This method will iterate through all mapping rules defined in the
    /// provider specification and apply them to transform the uniform
    /// format to the provider-specific format.
    pub fn apply_mappings(&self, input: &Value) -> Result<Value> {
        // TODO: Implement full mapping application (issue #10)
        // For now, return a clone of the input
        let output = input.clone();

        // Apply basic path mappings if they exist
        for (source_path, target_path) in &self.context.model_spec.mappings.paths {
            // Placeholder: In the real implementation, we would:
            // 1. Extract value at source_path from input
            // 2. Set value at target_path in output
            // 3. Handle nested paths and array indices
            _ = (source_path, target_path); // Suppress unused warning
        }

        Ok(output)
    }

    /// Map a single value using the provider's mapping rules
    pub fn map_value(&self, path: &str, value: &Value) -> Result<Value> {
        // Check if there's a specific mapping for this path
        if let Some(target_path) = self.context.model_spec.mappings.paths.get(path) {
            return self.map_field(path, target_path, value);
        }

        // No mapping found, return value as-is
        Ok(value.clone())
    }

    /// Check if a path has a mapping defined
    pub fn has_mapping(&self, path: &str) -> bool {
        self.context.model_spec.mappings.paths.contains_key(path)
    }

    /// Get the target path for a source path
    pub fn get_target_path(&self, source_path: &str) -> Option<&String> {
        self.context.model_spec.mappings.paths.get(source_path)
    }

    /// Apply flag mappings (boolean transformations)
    pub fn apply_flags(&self, _output: &mut Value) -> Result<()> {
        // Apply flag mappings from the provider spec
        for (flag_name, flag_value) in &self.context.model_spec.mappings.flags {
            // TODO: Implement flag application logic (issue #10)
            // Flags typically control boolean behaviors or feature toggles
            _ = (flag_name, flag_value); // Suppress unused warning
        }
        
        Ok(())
    }

    /// Extract value at a JSONPath
    ///
    /// This will be replaced with a proper JSONPath library in issue #10
    fn extract_at_path(&self, data: &Value, path: &str) -> Option<Value> {
        // Placeholder implementation
        // Real implementation will use a JSONPath library
        if path == "$" {
            return Some(data.clone());
        }
        
        // Simple dot notation support for testing
        let parts: Vec<&str> = path.trim_start_matches("$.").split('.').collect();
        let mut current = data;
        
        for part in parts {
            if let Some(obj) = current.as_object() {
                if let Some(value) = obj.get(part) {
                    current = value;
                } else {
                    return None;
                }
            } else {
                return None;
            }
        }
        
        Some(current.clone())
    }

    /// Set value at a JSONPath
    ///
    /// This will be replaced with a proper JSONPath library in issue #10
    fn set_at_path(&self, data: &mut Value, path: &str, value: Value) -> Result<()> {
        // Placeholder implementation
        // Real implementation will use a JSONPath library
        if path == "$" {
            *data = value;
            return Ok(());
        }
        
        // Simple dot notation support for testing
        let parts: Vec<&str> = path.trim_start_matches("$.").split('.').collect();
        if parts.is_empty() {
            return Ok(());
        }
        
        let last = parts.len() - 1;
        let mut current = data;
        
        for (i, part) in parts.iter().enumerate() {
            if i == last {
                if let Some(obj) = current.as_object_mut() {
                    obj.insert(part.to_string(), value);
                    return Ok(());
                }
            } else {
                if !current.is_object() {
                    *current = Value::Object(Default::default());
                }
                let obj = current.as_object_mut().unwrap();
                current = obj.entry(part.to_string()).or_insert(Value::Object(Default::default()));
            }
        }
        
        Ok(())
    }
}
