//! Conforma core library
//!
//! Structural validation for JSON documents: declarative schemas,
//! accumulated violations, optional in-place coercion / defaulting /
//! filtering.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod formats;
pub mod options;
pub mod registry;
pub mod schema;

pub use error::{Error, Result};
pub use options::Options;
