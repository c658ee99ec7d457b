//! A boolean JSON Schema validator for Draft 2020-12.
//!
//! Schemas are compiled once into a [`Validator`], which answers a single question about any
//! JSON instance: is it valid?
//!
//! ```rust
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"price": {"type": "number", "multipleOf": 0.01}},
//!     "required": ["price"]
//! });
//! assert!(verdict::validate_schema(&json!({"price": 9.99}), &schema));
//! assert!(!verdict::validate_schema(&json!({"price": 9.999}), &schema));
//! ```
//!
//! # Configuration
//!
//! [`options`] returns a builder for non-default settings:
//!
//! ```rust
//! use serde_json::json;
//!
//! let validator = verdict::options()
//!     .with_max_ref_depth(16)
//!     .with_pattern_options(verdict::PatternOptions::regex())
//!     .build(&json!({"pattern": "^[a-z]+$"}))?;
//! assert!(validator.is_valid(&json!("abc")));
//! # Ok::<(), verdict::SchemaError>(())
//! ```
//!
//! # Semantics
//!
//! - Numbers are compared exactly: `1` equals `1.0`, and `0.0075` is a multiple of `0.0001`.
//! - String lengths count Unicode code points.
//! - Regular expressions follow ECMA-262 where it matters (`\d` is ASCII-only).
//! - `format`, `content*` and other annotation-only keywords never affect the result.
//! - A schema that can not be compiled makes [`validate_schema`] return `false`.
pub(crate) mod compiler;
mod error;
mod evaluation;
mod ext;
pub(crate) mod keywords;
pub mod meta;
pub(crate) mod node;
pub(crate) mod number;
mod options;
mod paths;
pub(crate) mod regex;
pub(crate) mod types;
mod validator;

pub use error::SchemaError;
pub use options::{Config, PatternOptions, ValidationOptions};
pub use paths::Location;
pub use validator::Validator;

use serde_json::Value;

/// Validate `instance` against `schema`.
///
/// Malformed schemas never raise an error here: they make every instance invalid.
///
/// ```rust
/// use serde_json::json;
///
/// assert!(verdict::validate_schema(&json!("foo"), &json!({"maxLength": 5})));
/// assert!(!verdict::validate_schema(&json!(1), &json!({"type": "invalid"})));
/// ```
#[must_use]
pub fn validate_schema(instance: &Value, schema: &Value) -> bool {
    match validator_for(schema) {
        Ok(validator) => validator.is_valid(instance),
        Err(error) => {
            tracing::debug!(%error, "Failed to build a validator");
            false
        }
    }
}

/// Build a validator with the default options.
///
/// # Errors
///
/// Returns an error if the schema is invalid against its meta-schema or can not be compiled.
pub fn validator_for(schema: &Value) -> Result<Validator, SchemaError> {
    options().build(schema)
}

/// Options for building a [`Validator`].
#[must_use]
pub fn options() -> ValidationOptions {
    ValidationOptions::default()
}
