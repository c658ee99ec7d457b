use serde_json::{Map, Value};

use crate::{
    compiler,
    ext::cmp,
    keywords::CompilationResult,
    validator::{Validate, ValidationContext},
    SchemaError,
};

pub(crate) struct EnumValidator {
    options: Vec<Value>,
}

impl EnumValidator {
    #[inline]
    pub(crate) fn compile(ctx: &compiler::Context, schema: &Value) -> CompilationResult {
        if let Value::Array(options) = schema {
            Ok(Box::new(EnumValidator {
                options: options.clone(),
            }))
        } else {
            Err(SchemaError::invalid_keyword(
                ctx.location().join("enum"),
                "an array",
            ))
        }
    }
}

impl Validate for EnumValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        self.options.iter().any(|option| cmp::equal(instance, option))
    }
}

/// `enum` with a single option.
pub(crate) struct SingleValueEnumValidator {
    value: Value,
}

impl Validate for SingleValueEnumValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        cmp::equal(instance, &self.value)
    }
}

#[inline]
pub(crate) fn compile(
    ctx: &compiler::Context,
    _: &Map<String, Value>,
    schema: &Value,
) -> Option<CompilationResult> {
    match schema {
        Value::Array(items) if items.len() == 1 => Some(Ok(Box::new(SingleValueEnumValidator {
            value: items[0].clone(),
        }))),
        _ => Some(EnumValidator::compile(ctx, schema)),
    }
}
