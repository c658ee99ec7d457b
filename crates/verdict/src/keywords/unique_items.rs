use serde_json::{Map, Value};

use crate::{
    compiler,
    ext::cmp::is_unique,
    keywords::CompilationResult,
    validator::{Validate, ValidationContext},
    SchemaError,
};

pub(crate) struct UniqueItemsValidator;

impl Validate for UniqueItemsValidator {
    #[inline]
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::Array(items) = instance {
            is_unique(items)
        } else {
            true
        }
    }
}

#[inline]
pub(crate) fn compile(
    ctx: &compiler::Context,
    _: &Map<String, Value>,
    schema: &Value,
) -> Option<CompilationResult> {
    match schema {
        Value::Bool(true) => Some(Ok(Box::new(UniqueItemsValidator))),
        Value::Bool(false) => None,
        _ => Some(Err(SchemaError::invalid_keyword(
            ctx.location().join("uniqueItems"),
            "a boolean",
        ))),
    }
}
