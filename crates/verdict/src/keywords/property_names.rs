use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    keywords::CompilationResult,
    node::NodeId,
    validator::{Validate, ValidationContext},
};

/// Validates every property name, as a JSON string, against a subschema.
pub(crate) struct PropertyNamesValidator {
    node: NodeId,
}

impl Validate for PropertyNamesValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        if let Value::Object(item) = instance {
            item.keys().all(|key| {
                let wrapped_key = Value::String(key.clone());
                ctx.is_valid_child(self.node, &wrapped_key)
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
    Some(
        compiler
            .compile_subschema(ctx, "propertyNames", schema)
            .map(|node| Box::new(PropertyNamesValidator { node }) as _),
    )
}
