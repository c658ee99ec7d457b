use serde_json::{Map, Value};

use crate::{
    compiler,
    keywords::{required::string_array, CompilationResult},
    validator::{Validate, ValidationContext},
    SchemaError,
};

/// When a property is present, others must be present too.
pub(crate) struct DependentRequiredValidator {
    dependencies: Vec<(String, Vec<String>)>,
}

impl DependentRequiredValidator {
    #[inline]
    pub(crate) fn compile(ctx: &compiler::Context, schema: &Value) -> CompilationResult {
        let invalid = || {
            SchemaError::invalid_keyword(
                ctx.location().join("dependentRequired"),
                "an object of string arrays",
            )
        };
        let Value::Object(map) = schema else {
            return Err(invalid());
        };
        let mut dependencies = Vec::with_capacity(map.len());
        for (property, required) in map {
            let required = required
                .as_array()
                .and_then(|items| string_array(items))
                .ok_or_else(invalid)?;
            dependencies.push((property.clone(), required));
        }
        Ok(Box::new(DependentRequiredValidator { dependencies }))
    }
}

impl Validate for DependentRequiredValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::Object(item) = instance {
            self.dependencies.iter().all(|(property, required)| {
                !item.contains_key(property)
                    || required.iter().all(|name| item.contains_key(name))
            })
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
    Some(DependentRequiredValidator::compile(ctx, schema))
}
