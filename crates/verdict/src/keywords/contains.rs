use serde_json::{Map, Value};
use verdict_referencing::Vocabulary;

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::{helpers, CompilationResult},
    node::NodeId,
    validator::{Validate, ValidationContext},
};

/// `contains` with its `minContains` / `maxContains` bounds.
pub(crate) struct ContainsValidator {
    node: NodeId,
    min_contains: u64,
    max_contains: Option<u64>,
}

impl ContainsValidator {
    #[inline]
    pub(crate) fn compile<'a>(
        compiler: &mut Compiler<'a>,
        ctx: &Context<'a>,
        parent: &'a Map<String, Value>,
        schema: &'a Value,
    ) -> CompilationResult {
        let node = compiler.compile_subschema(ctx, "contains", schema)?;
        let (mut min_contains, mut max_contains) = (1, None);
        if ctx.has_vocabulary(Vocabulary::Validation) {
            if let Some(value) = parent.get("minContains") {
                min_contains = helpers::count(ctx, "minContains", value)?;
            }
            if let Some(value) = parent.get("maxContains") {
                max_contains = Some(helpers::count(ctx, "maxContains", value)?);
            }
        }
        Ok(Box::new(ContainsValidator {
            node,
            min_contains,
            max_contains,
        }))
    }

    fn is_count_valid(&self, matches: u64) -> bool {
        matches >= self.min_contains && self.max_contains.map_or(true, |max| matches <= max)
    }
}

impl Validate for ContainsValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        if let Value::Array(items) = instance {
            let mut matches = 0;
            for item in items {
                if ctx.is_valid_child(self.node, item) {
                    matches += 1;
                    if self.max_contains.is_none() && matches >= self.min_contains {
                        return true;
                    }
                    if self.max_contains.is_some_and(|max| matches > max) {
                        return false;
                    }
                }
            }
            self.is_count_valid(matches)
        } else {
            true
        }
    }

    /// Every item is tried, so that all matching items count as evaluated.
    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        if let Value::Array(items) = instance {
            let mut matches = 0;
            for (idx, item) in items.iter().enumerate() {
                if ctx.is_valid_child(self.node, item) {
                    matches += 1;
                    evaluated.mark_item(idx);
                }
            }
            self.is_count_valid(matches)
        } else {
            true
        }
    }
}

#[inline]
pub(crate) fn compile<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    parent: &'a Map<String, Value>,
    schema: &'a Value,
) -> Option<CompilationResult> {
    Some(ContainsValidator::compile(compiler, ctx, parent, schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"contains": {"const": 1}}), &json!([2, 1]), true ; "present")]
    #[test_case(&json!({"contains": {"const": 1}}), &json!([2, 3]), false ; "absent")]
    #[test_case(&json!({"contains": {"const": 1}}), &json!([]), false ; "empty array")]
    #[test_case(&json!({"contains": {"const": 1}, "minContains": 0}), &json!([]), true ; "min zero")]
    #[test_case(&json!({"contains": {"const": 1}, "minContains": 2}), &json!([1, 2, 1]), true ; "min reached")]
    #[test_case(&json!({"contains": {"const": 1}, "maxContains": 1}), &json!([1, 1]), false ; "max exceeded")]
    #[test_case(&json!({"contains": {"const": 1}, "maxContains": 1}), &json!([1, 2]), true ; "max respected")]
    #[test_case(&json!({"minContains": 2}), &json!([]), true ; "bounds without contains")]
    #[test_case(&json!({"contains": false}), &json!("x"), true ; "ignores strings")]
    fn contains(schema: &Value, instance: &Value, expected: bool) {
        tests_util::is_valid_as(schema, instance, expected);
    }

    #[test]
    fn matching_items_are_evaluated() {
        let schema = json!({"contains": {"type": "string"}, "unevaluatedItems": {"type": "integer"}});
        tests_util::is_valid(&schema, &json!(["a", 1, "b"]));
        tests_util::is_not_valid(&schema, &json!(["a", null]));
    }
}
