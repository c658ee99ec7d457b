use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::CompilationResult,
    node::NodeId,
    validator::{Validate, ValidationContext},
};

/// Applies to the array items no adjacent keyword evaluated.
///
/// Runs after all other keywords of its schema object, reading what they recorded.
pub(crate) struct UnevaluatedItemsValidator {
    node: NodeId,
}

impl Validate for UnevaluatedItemsValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        self.evaluate(instance, ctx, &mut Evaluated::default())
    }

    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        if let Value::Array(items) = instance {
            for (idx, item) in items.iter().enumerate() {
                if !evaluated.is_item_evaluated(idx) && !ctx.is_valid_child(self.node, item) {
                    return false;
                }
            }
            evaluated.mark_all_items();
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
            .compile_subschema(ctx, "unevaluatedItems", schema)
            .map(|node| Box::new(UnevaluatedItemsValidator { node }) as _),
    )
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"unevaluatedItems": false}), &json!([]), true ; "empty array")]
    #[test_case(&json!({"unevaluatedItems": false}), &json!([1]), false ; "nothing evaluated")]
    #[test_case(&json!({"items": true, "unevaluatedItems": false}), &json!([1]), true ; "items evaluate all")]
    #[test_case(
        &json!({"allOf": [{"prefixItems": [true]}], "unevaluatedItems": false}),
        &json!([1]),
        true ;
        "through allOf"
    )]
    #[test_case(
        &json!({"allOf": [{"prefixItems": [true]}], "unevaluatedItems": false}),
        &json!([1, 2]),
        false ;
        "beyond prefix through allOf"
    )]
    #[test_case(
        &json!({"anyOf": [{"prefixItems": [true, true]}, {"prefixItems": [{"type": "string"}]}], "unevaluatedItems": false}),
        &json!([1, 2]),
        true ;
        "failed branch contributes nothing"
    )]
    #[test_case(
        &json!({"unevaluatedItems": {"type": "integer"}}),
        &json!([1, "a"]),
        false ;
        "schema applies to unevaluated"
    )]
    fn unevaluated_items(schema: &Value, instance: &Value, expected: bool) {
        tests_util::is_valid_as(schema, instance, expected);
    }

    #[test]
    fn nested_unevaluated_items() {
        let schema = json!({
            "prefixItems": [{"type": "string"}],
            "allOf": [{"unevaluatedItems": true}],
            "unevaluatedItems": false
        });
        tests_util::is_valid(&schema, &json!(["a", 1]));
    }
}
