//! High-performance JSONPath mapping engine for field translation
//!
//! This module provides a comprehensive JSONPath implementation for mapping
//! data between uniform and provider-specific formats with minimal allocations
//! and maximum performance.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod ast;
pub mod error;
pub mod executor;
pub mod filter;
pub mod optimizer;
pub mod parser;
pub mod selector;

pub use ast::{Expression, CompiledExpression, ExpressionMetadata, Selector, CompiledSelector, ArrayIndex};
pub use error::{JSONPathError, ErrorSeverity};
pub use executor::{Executor, ExecutionContext, ExecutionMetrics};
pub use filter::{FilterExecutor, FilterContext};
pub use optimizer::{Optimizer, OptimizerConfig};
pub use parser::Parser;

use crate::Result;
use serde_json::Value;

/// High-level JSONPath expression for convenient API usage
#[derive(Debug, Clone)]
pub struct JSONPath {
    expression: CompiledExpression,
}

impl JSONPath {
    /// Parse and compile a JSONPath expression
    pub fn parse(path: &str) -> Result<Self> {
        let expression = Parser::new(path)?.parse()?;
        let compiled = Optimizer::new().optimize(expression)?;
        Ok(Self {
            expression: compiled,
        })
    }

    /// Execute the JSONPath against the given data
    pub fn execute<'a>(&self, data: &'a Value) -> Result<Vec<&'a Value>> {
        Executor::new().execute(&self.expression, data)
    }

    /// Execute and return the first match, if any
    pub fn execute_single<'a>(&self, data: &'a Value) -> Result<Option<&'a Value>> {
        let results = self.execute(data)?;
        Ok(results.into_iter().next())
    }

    /// Execute and collect results into owned values
    pub fn execute_owned(&self, data: &Value) -> Result<Vec<Value>> {
        let results = self.execute(data)?;
        Ok(results.into_iter().cloned().collect())
    }

    /// Check if the path exists in the data
    pub fn exists(&self, data: &Value) -> Result<bool> {
        let results = self.execute(data)?;
        Ok(!results.is_empty())
    }

    /// Get the raw expression for inspection
    pub fn expression(&self) -> &CompiledExpression {
        &self.expression
    }
}

impl std::fmt::Display for JSONPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// Convenient functions for direct JSONPath operations
pub fn select<'a>(path: &str, data: &'a Value) -> Result<Vec<&'a Value>> {
    let jsonpath = JSONPath::parse(path)?;
    jsonpath.execute(data)
}

pub fn select_single<'a>(path: &str, data: &'a Value) -> Result<Option<&'a Value>> {
    let jsonpath = JSONPath::parse(path)?;
    jsonpath.execute_single(data)
}

pub fn exists(path: &str, data: &Value) -> Result<bool> {
    let jsonpath = JSONPath::parse(path)?;
    jsonpath.exists(data)
}
