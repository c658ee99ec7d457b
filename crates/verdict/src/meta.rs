//! Validating schemas against their meta-schemas.
use std::sync::LazyLock;

use serde_json::{json, Value};
use verdict_referencing::meta::{self as bundled, DRAFT202012, DRAFT202012_URI};

use crate::{SchemaError, ValidationOptions, Validator};

static DRAFT202012_VALIDATOR: LazyLock<Validator> = LazyLock::new(|| {
    ValidationOptions::default()
        .should_validate_schema(false)
        .build(&DRAFT202012)
        .expect("The 2020-12 meta-schema is a valid schema")
});

/// Whether `schema` is valid against the meta-schema named by its `$schema`.
///
/// ```rust
/// use serde_json::json;
///
/// assert!(verdict::meta::is_valid(&json!({"type": "string"})));
/// assert!(!verdict::meta::is_valid(&json!({"type": "invalid_type"})));
/// ```
#[must_use]
pub fn is_valid(schema: &Value) -> bool {
    validate(schema).is_ok()
}

/// Validate `schema` against the meta-schema named by its `$schema`.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidSchema`] if the schema does not conform to its meta-schema.
pub fn validate(schema: &Value) -> Result<(), SchemaError> {
    validate_with(schema, &ValidationOptions::default())
}

/// Schemas without `$schema` are checked against 2020-12. Meta-schemas that are neither bundled
/// nor registered as resources are not checked at all.
pub(crate) fn validate_with(
    schema: &Value,
    options: &ValidationOptions,
) -> Result<(), SchemaError> {
    let uri = match schema.get("$schema") {
        Some(Value::String(uri)) => uri.strip_suffix('#').unwrap_or(uri),
        _ => DRAFT202012_URI,
    };
    let is_valid = if uri == DRAFT202012_URI {
        DRAFT202012_VALIDATOR.is_valid(schema)
    } else if bundled::get(uri).is_some() || options.has_resource(uri) {
        options
            .for_meta_schema()
            .build(&json!({"$ref": uri}))?
            .is_valid(schema)
    } else {
        tracing::debug!(meta_schema = uri, "Unknown meta-schema, skipping schema validation");
        return Ok(());
    };
    if is_valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidSchema {
            meta_schema: uri.to_string(),
        })
    }
}
