//! Errors raised while building a [`Validator`](crate::Validator).
use core::fmt;

use crate::paths::Location;

/// The schema could not be turned into a validator.
///
/// Instance validation never fails with an error: it only produces a boolean.
#[derive(Debug)]
pub enum SchemaError {
    /// A reference could not be resolved, or an `$id` / anchor is malformed.
    Referencing(verdict_referencing::Error),
    /// The schema is not valid against its meta-schema.
    InvalidSchema { meta_schema: String },
    /// A keyword value has an unusable shape, e.g. `"minLength": "x"`.
    InvalidKeyword {
        location: Location,
        expected: &'static str,
    },
}

impl SchemaError {
    pub(crate) fn invalid_keyword(location: Location, expected: &'static str) -> SchemaError {
        SchemaError::InvalidKeyword { location, expected }
    }
}

impl From<verdict_referencing::Error> for SchemaError {
    fn from(error: verdict_referencing::Error) -> Self {
        SchemaError::Referencing(error)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Referencing(error) => error.fmt(f),
            SchemaError::InvalidSchema { meta_schema } => {
                write!(f, "Schema is not valid against '{meta_schema}'")
            }
            SchemaError::InvalidKeyword { location, expected } => {
                write!(f, "Keyword at '{location}' must be {expected}")
            }
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::Referencing(error) => Some(error),
            _ => None,
        }
    }
}
