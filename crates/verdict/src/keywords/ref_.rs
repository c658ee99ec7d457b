use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::CompilationResult,
    node::NodeId,
    validator::{Validate, ValidationContext},
    SchemaError,
};

/// `$ref`: validate the instance against the referenced schema.
pub(crate) struct RefValidator {
    target: NodeId,
}

impl Validate for RefValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        ctx.follow_reference(self.target, instance, None)
    }

    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        ctx.follow_reference(self.target, instance, Some(evaluated))
    }
}

/// `$dynamicRef`: like `$ref`, except that when the statically resolved target declares a
/// matching `$dynamicAnchor`, the outermost resource in the dynamic scope declaring that
/// anchor wins.
pub(crate) struct DynamicRefValidator {
    default: NodeId,
    anchor: Option<Box<str>>,
}

impl DynamicRefValidator {
    fn target(&self, ctx: &ValidationContext) -> NodeId {
        self.anchor
            .as_deref()
            .and_then(|name| ctx.resolve_dynamic_anchor(name))
            .unwrap_or(self.default)
    }
}

impl Validate for DynamicRefValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        let target = self.target(ctx);
        ctx.follow_reference(target, instance, None)
    }

    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        let target = self.target(ctx);
        ctx.follow_reference(target, instance, Some(evaluated))
    }
}

fn reference<'a>(
    ctx: &Context<'a>,
    keyword: &str,
    schema: &'a Value,
) -> Result<&'a str, SchemaError> {
    schema
        .as_str()
        .ok_or_else(|| SchemaError::invalid_keyword(ctx.location().join(keyword), "a string"))
}

#[inline]
pub(crate) fn compile<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    _: &'a Map<String, Value>,
    schema: &'a Value,
) -> Option<CompilationResult> {
    Some(reference(ctx, "$ref", schema).and_then(|reference| {
        let (target, _) = compiler.compile_reference(&ctx.new_at_location("$ref"), reference)?;
        Ok(Box::new(RefValidator { target }) as _)
    }))
}

#[inline]
pub(crate) fn compile_dynamic<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    _: &'a Map<String, Value>,
    schema: &'a Value,
) -> Option<CompilationResult> {
    Some(reference(ctx, "$dynamicRef", schema).and_then(|reference| {
        let (default, anchor) =
            compiler.compile_reference(&ctx.new_at_location("$dynamicRef"), reference)?;
        Ok(Box::new(DynamicRefValidator { default, anchor }) as _)
    }))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"a": {"a": {"a": 1}}}), true ; "nested")]
    #[test_case(&json!({"a": {"a": {"a": "x"}}}), false ; "nested mismatch")]
    fn recursive(instance: &Value, expected: bool) {
        let schema = json!({
            "properties": {"a": {"$ref": "#"}},
            "additionalProperties": false,
            "type": ["object", "integer"]
        });
        tests_util::is_valid_as(&schema, instance, expected);
    }

    #[test]
    fn reference_cycle_without_progress() {
        let schema = json!({
            "$defs": {"a": {"$ref": "#/$defs/b"}, "b": {"$ref": "#/$defs/a"}},
            "$ref": "#/$defs/a"
        });
        tests_util::is_not_valid(&schema, &json!(1));
    }

    #[test]
    fn depth_limit() {
        let schema = json!({
            "$defs": {
                "one": {"$ref": "#/$defs/two"},
                "two": {"$ref": "#/$defs/three"},
                "three": {"type": "integer"}
            },
            "$ref": "#/$defs/one"
        });
        let shallow = crate::options()
            .with_max_ref_depth(2)
            .build(&schema)
            .expect("Valid schema");
        assert!(!shallow.is_valid(&json!(1)));
        let deep = crate::options()
            .with_max_ref_depth(3)
            .build(&schema)
            .expect("Valid schema");
        assert!(deep.is_valid(&json!(1)));
    }

    #[test]
    fn sibling_keywords_apply() {
        let schema = json!({"$defs": {"int": {"type": "integer"}}, "$ref": "#/$defs/int", "minimum": 5});
        tests_util::is_valid(&schema, &json!(5));
        tests_util::is_not_valid(&schema, &json!(4));
    }

    #[test]
    fn dynamic_reference_resolves_to_outermost_anchor() {
        let schema = json!({
            "$id": "https://example.com/strict-tree",
            "$dynamicAnchor": "node",
            "$ref": "tree",
            "unevaluatedProperties": false,
            "$defs": {
                "tree": {
                    "$id": "tree",
                    "$dynamicAnchor": "node",
                    "type": "object",
                    "properties": {
                        "data": true,
                        "children": {"type": "array", "items": {"$dynamicRef": "#node"}}
                    }
                }
            }
        });
        tests_util::is_valid(&schema, &json!({"children": [{"data": 1}]}));
        tests_util::is_not_valid(&schema, &json!({"children": [{"daat": 1}]}));
    }

    #[test]
    fn dynamic_reference_without_anchor_is_static() {
        let schema = json!({
            "$defs": {"foo": {"$anchor": "foo", "type": "string"}},
            "$dynamicRef": "#foo"
        });
        tests_util::is_valid(&schema, &json!("a"));
        tests_util::is_not_valid(&schema, &json!(1));
    }

    #[test_case(&json!({"$ref": "#/$defs/missing"}) ; "missing pointer target")]
    #[test_case(&json!({"$ref": "http://example.com/unknown.json"}) ; "unknown document")]
    #[test_case(&json!({"$ref": "#unknown"}) ; "missing anchor")]
    fn unresolvable(schema: &Value) {
        tests_util::is_not_compiled(schema);
    }
}
