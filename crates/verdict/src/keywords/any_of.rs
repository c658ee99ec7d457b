use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::{helpers, CompilationResult},
    node::NodeId,
    validator::{Validate, ValidationContext},
};

pub(crate) struct AnyOfValidator {
    schemas: Vec<NodeId>,
}

impl Validate for AnyOfValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        self.schemas.iter().any(|node| ctx.is_valid(*node, instance))
    }

    /// Every branch is tried: annotations come from all valid branches.
    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        let mut is_any_valid = false;
        for node in &self.schemas {
            is_any_valid |= ctx.evaluate(*node, instance, evaluated);
        }
        is_any_valid
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
        helpers::compile_subschemas(compiler, ctx, "anyOf", schema)
            .map(|schemas| Box::new(AnyOfValidator { schemas }) as _),
    )
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!(1), true ; "first")]
    #[test_case(&json!("a"), true ; "second")]
    #[test_case(&json!(null), false ; "none")]
    fn any_of(instance: &Value, expected: bool) {
        tests_util::is_valid_as(
            &json!({"anyOf": [{"type": "integer"}, {"type": "string"}]}),
            instance,
            expected,
        );
    }

    #[test]
    fn annotations_from_every_valid_branch() {
        let schema = json!({
            "anyOf": [
                {"properties": {"foo": true}, "required": ["foo"]},
                {"properties": {"bar": true}, "required": ["bar"]}
            ],
            "unevaluatedProperties": false
        });
        tests_util::is_valid(&schema, &json!({"foo": 1, "bar": 2}));
        tests_util::is_not_valid(&schema, &json!({"foo": 1, "baz": 2}));
    }
}
