use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::CompilationResult,
    node::NodeId,
    validator::{Validate, ValidationContext},
};

/// Applies to the object properties no adjacent keyword evaluated.
pub(crate) struct UnevaluatedPropertiesValidator {
    node: NodeId,
}

impl Validate for UnevaluatedPropertiesValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        self.evaluate(instance, ctx, &mut Evaluated::default())
    }

    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        if let Value::Object(item) = instance {
            for (property, value) in item {
                if !evaluated.is_property_evaluated(property)
                    && !ctx.is_valid_child(self.node, value)
                {
                    return false;
                }
            }
            evaluated.mark_all_properties();
        }
        true
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
            .compile_subschema(ctx, "unevaluatedProperties", schema)
            .map(|node| Box::new(UnevaluatedPropertiesValidator { node }) as _),
    )
}
