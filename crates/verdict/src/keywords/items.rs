use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::CompilationResult,
    node::NodeId,
    validator::{Validate, ValidationContext},
};

/// `items` without `prefixItems`: applies to every array item.
pub(crate) struct ItemsValidator {
    node: NodeId,
}

impl Validate for ItemsValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        if let Value::Array(items) = instance {
            items.iter().all(|item| ctx.is_valid_child(self.node, item))
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
        if !self.is_valid(instance, ctx) {
            return false;
        }
        if instance.is_array() {
            evaluated.mark_all_items();
        }
        true
    }
}

#[inline]
pub(crate) fn compile<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    parent: &'a Map<String, Value>,
    schema: &'a Value,
) -> Option<CompilationResult> {
    if parent.contains_key("prefixItems") {
        // Compiled together with `prefixItems`
        return None;
    }
    Some(
        compiler
            .compile_subschema(ctx, "items", schema)
            .map(|node| Box::new(ItemsValidator { node }) as _),
    )
}
