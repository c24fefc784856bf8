//! Validation options
//!
//! All ten switches of the validation pass, each independently toggleable.
//! The struct is `Copy` so traversal layers can take a locally adjusted copy
//! (dependency-schema recursion forces `additional_properties` permissive)
//! without touching the caller's record.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// Options controlling a validation pass.
///
/// Serde uses camelCase field names and fills missing fields from
/// [`Options::default`], so a partial options document overlays the
/// documented defaults:
///
/// ```
/// use conforma_core::Options;
///
/// let options: Options = serde_json::from_str(r#"{"cast": true}"#).unwrap();
/// assert!(options.cast);
/// assert!(options.validate_formats); // untouched default
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Enforce `format` constraints.
    pub validate_formats: bool,

    /// When `validate_formats` is on, treat unrecognized format names as
    /// validation errors.
    pub validate_formats_strict: bool,

    /// When `validate_formats` is on, consult the extension-format table
    /// before the core table.
    pub validate_format_extensions: bool,

    /// Enable best-effort type coercion before constraint checking.
    pub cast: bool,

    /// Fallback policy for document keys no schema entry matched, used when
    /// a schema level does not declare `additionalProperties` itself.
    pub additional_properties: bool,

    /// Write coerced values back into the source document.
    pub cast_source: bool,

    /// Write a schema's `default` into the document when the property is
    /// absent.
    pub apply_default_value: bool,

    /// Validate each schema's `default` value against its own schema.
    pub validate_default_value: bool,

    /// Stop after the first violation; the single-element error list is
    /// still returned normally.
    pub exit_on_first_error: bool,

    /// Stop after the first violation and surface it as [`Error::FailFast`].
    ///
    /// [`Error::FailFast`]: crate::Error::FailFast
    pub fail_on_first_error: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            validate_formats: true,
            validate_formats_strict: false,
            validate_format_extensions: true,
            cast: false,
            additional_properties: true,
            cast_source: false,
            apply_default_value: false,
            validate_default_value: false,
            exit_on_first_error: false,
            fail_on_first_error: false,
        }
    }
}
