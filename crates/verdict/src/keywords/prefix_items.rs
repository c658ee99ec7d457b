use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::CompilationResult,
    node::NodeId,
    validator::{Validate, ValidationContext},
    SchemaError,
};

/// `prefixItems`, together with the `items` keyword that covers the rest of the array.
pub(crate) struct PrefixItemsValidator {
    prefix: Vec<NodeId>,
    items: Option<NodeId>,
}

impl PrefixItemsValidator {
    #[inline]
    pub(crate) fn compile<'a>(
        compiler: &mut Compiler<'a>,
        ctx: &Context<'a>,
        parent: &'a Map<String, Value>,
        schema: &'a Value,
    ) -> CompilationResult {
        let Value::Array(schemas) = schema else {
            return Err(SchemaError::invalid_keyword(
                ctx.location().join("prefixItems"),
                "an array of schemas",
            ));
        };
        let prefix_ctx = ctx.new_at_location("prefixItems");
        let prefix = schemas
            .iter()
            .enumerate()
            .map(|(idx, schema)| compiler.compile_subschema(&prefix_ctx, idx, schema))
            .collect::<Result<Vec<_>, _>>()?;
        let items = match parent.get("items") {
            Some(items) => Some(compiler.compile_subschema(ctx, "items", items)?),
            None => None,
        };
        Ok(Box::new(PrefixItemsValidator { prefix, items }))
    }
}

impl Validate for PrefixItemsValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        if let Value::Array(items) = instance {
            let prefix_valid = self
                .prefix
                .iter()
                .zip(items)
                .all(|(node, item)| ctx.is_valid_child(*node, item));
            prefix_valid
                && self.items.map_or(true, |node| {
                    items
                        .iter()
                        .skip(self.prefix.len())
                        .all(|item| ctx.is_valid_child(node, item))
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
        if !self.is_valid(instance, ctx) {
            return false;
        }
        if let Value::Array(items) = instance {
            if self.items.is_some() {
                evaluated.mark_all_items();
            } else {
                evaluated.mark_items_up_to(self.prefix.len().min(items.len()));
            }
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
    Some(PrefixItemsValidator::compile(compiler, ctx, parent, schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!([1, "a"]), true ; "matching prefix")]
    #[test_case(&json!([1]), true ; "short array")]
    #[test_case(&json!(["a", 1]), false ; "swapped")]
    #[test_case(&json!([1, "a", null]), true ; "extra items allowed")]
    fn prefix_only(instance: &Value, expected: bool) {
        tests_util::is_valid_as(
            &json!({"prefixItems": [{"type": "integer"}, {"type": "string"}]}),
            instance,
            expected,
        );
    }

    #[test_case(&json!([1, true, false]), true ; "rest matches")]
    #[test_case(&json!([1, true, 2]), false ; "rest mismatch")]
    #[test_case(&json!(["x"]), false ; "prefix mismatch")]
    fn with_items(instance: &Value, expected: bool) {
        tests_util::is_valid_as(
            &json!({"prefixItems": [{"type": "integer"}], "items": {"type": "boolean"}}),
            instance,
            expected,
        );
    }

    #[test]
    fn marks_prefix_as_evaluated() {
        let schema = json!({"prefixItems": [true], "unevaluatedItems": false});
        tests_util::is_valid(&schema, &json!([1]));
        tests_util::is_not_valid(&schema, &json!([1, 2]));
    }
}
