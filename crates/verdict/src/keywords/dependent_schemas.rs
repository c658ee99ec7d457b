use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::CompilationResult,
    node::NodeId,
    validator::{Validate, ValidationContext},
    SchemaError,
};

/// When a property is present, the whole object must match a subschema.
pub(crate) struct DependentSchemasValidator {
    schemas: Vec<(String, NodeId)>,
}

impl DependentSchemasValidator {
    #[inline]
    pub(crate) fn compile<'a>(
        compiler: &mut Compiler<'a>,
        ctx: &Context<'a>,
        schema: &'a Value,
    ) -> CompilationResult {
        let Value::Object(map) = schema else {
            return Err(SchemaError::invalid_keyword(
                ctx.location().join("dependentSchemas"),
                "an object of schemas",
            ));
        };
        let ctx = ctx.new_at_location("dependentSchemas");
        let mut schemas = Vec::with_capacity(map.len());
        for (property, subschema) in map {
            schemas.push((
                property.clone(),
                compiler.compile_subschema(&ctx, property, subschema)?,
            ));
        }
        Ok(Box::new(DependentSchemasValidator { schemas }))
    }
}

impl Validate for DependentSchemasValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        if let Value::Object(item) = instance {
            self.schemas.iter().all(|(property, node)| {
                !item.contains_key(property) || ctx.is_valid(*node, instance)
            })
        } else {
            true
        }
    }

    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        if let Value::Object(item) = instance {
            self.schemas.iter().all(|(property, node)| {
                !item.contains_key(property) || ctx.evaluate(*node, instance, evaluated)
            })
        } else {
            true
        }
    }
}

#[inline]
pub(crate) fn compile<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    _: &'a Map<String, Value>,
    schema: &'a Value,
) -> Option<CompilationResult> {
    Some(DependentSchemasValidator::compile(compiler, ctx, schema))
}
