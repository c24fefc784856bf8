//! Format, filter, and message registries
//!
//! A [`Registry`] bundles the four caller-extensible tables the engine
//! consults: core formats, extension formats, named filters, and default
//! message templates. Each [`Validator`] owns its registry explicitly; a
//! process-wide default instance behind a read-write lock backs the
//! top-level convenience API. Registration is additive and intended for a
//! quiescent setup phase before validation traffic starts.
//!
//! [`Validator`]: crate::validator::Validator
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use serde_json::Value;

use crate::formats::{self, Format};
use crate::schema::FilterFn;
use crate::validator::Attr;

/// The named tables a validation pass resolves against.
#[derive(Clone)]
pub struct Registry {
    formats: HashMap<String, Format>,
    format_extensions: HashMap<String, Format>,
    filters: HashMap<String, FilterFn>,
    messages: HashMap<String, String>,
}

impl Registry {
    /// A registry seeded with the core and extension format tables, the
    /// default message templates, and no filters.
    pub fn new() -> Self {
        seed().clone()
    }

    /// Add or replace a core format.
    pub fn register_format(&mut self, name: impl Into<String>, format: impl Into<Format>) {
        self.formats.insert(name.into(), format.into());
    }

    /// Add or replace an extension format.
    pub fn register_format_extension(&mut self, name: impl Into<String>, format: impl Into<Format>) {
        self.format_extensions.insert(name.into(), format.into());
    }

    /// Add or replace a named filter.
    pub fn register_filter<F>(&mut self, name: impl Into<String>, filter: F)
    where
        F: Fn(&Value) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        self.filters.insert(name.into(), Arc::new(filter));
    }

    /// Replace the default message template for an attribute.
    pub fn set_default_message(&mut self, attribute: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(attribute.into(), template.into());
    }

    /// Resolve a format name: the extension table first when enabled, the
    /// core table otherwise or on miss.
    pub fn resolve_format(&self, name: &str, consult_extensions: bool) -> Option<&Format> {
        if consult_extensions {
            if let Some(format) = self.format_extensions.get(name) {
                return Some(format);
            }
        }
        self.formats.get(name)
    }

    pub fn filter(&self, name: &str) -> Option<&FilterFn> {
        self.filters.get(name)
    }

    pub fn default_message(&self, attribute: &str) -> Option<&str> {
        self.messages.get(attribute).map(String::as_str)
    }

    /// Core format names, sorted.
    pub fn format_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Extension format names, sorted.
    pub fn format_extension_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.format_extensions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("formats", &self.formats.len())
            .field("format_extensions", &self.format_extensions.len())
            .field("filters", &self.filters.len())
            .field("messages", &self.messages.len())
            .finish()
    }
}

fn seed() -> &'static Registry {
    static SEED: OnceLock<Registry> = OnceLock::new();
    SEED.get_or_init(|| {
        let mut messages = HashMap::new();
        for attr in Attr::ALL {
            if let Some(template) = attr.default_message() {
                messages.insert(attr.as_str().to_string(), template.to_string());
            }
        }
        Registry {
            formats: formats::core_formats()
                .into_iter()
                .map(|(name, format)| (name.to_string(), format))
                .collect(),
            format_extensions: formats::extension_formats()
                .into_iter()
                .map(|(name, format)| (name.to_string(), format))
                .collect(),
            filters: HashMap::new(),
            messages,
        }
    })
}

pub(crate) fn global() -> &'static RwLock<Registry> {
    static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(Registry::new()))
}

/// Clone the current process-wide registry.
pub fn snapshot() -> Registry {
    global().read().expect("registry lock poisoned").clone()
}

/// Add or replace a core format in the process-wide registry.
pub fn register_format(name: impl Into<String>, format: impl Into<Format>) {
    global()
        .write()
        .expect("registry lock poisoned")
        .register_format(name, format);
}

/// Add or replace an extension format in the process-wide registry.
pub fn register_format_extension(name: impl Into<String>, format: impl Into<Format>) {
    global()
        .write()
        .expect("registry lock poisoned")
        .register_format_extension(name, format);
}

/// Add or replace a named filter in the process-wide registry.
pub fn register_filter<F>(name: impl Into<String>, filter: F)
where
    F: Fn(&Value) -> std::result::Result<Value, String> + Send + Sync + 'static,
{
    global()
        .write()
        .expect("registry lock poisoned")
        .register_filter(name, filter);
}

/// Replace a default message template in the process-wide registry.
pub fn set_default_message(attribute: impl Into<String>, template: impl Into<String>) {
    global()
        .write()
        .expect("registry lock poisoned")
        .set_default_message(attribute, template);
}
