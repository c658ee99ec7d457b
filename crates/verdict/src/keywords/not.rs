use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    keywords::CompilationResult,
    node::NodeId,
    validator::{Validate, ValidationContext},
};

pub(crate) struct NotValidator {
    node: NodeId,
}

impl Validate for NotValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        !ctx.is_valid(self.node, instance)
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
            .compile_subschema(ctx, "not", schema)
            .map(|node| Box::new(NotValidator { node }) as _),
    )
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn negation() {
        let schema = json!({"not": {"type": "string"}});
        tests_util::is_valid(&schema, &json!(1));
        tests_util::is_not_valid(&schema, &json!("a"));
        tests_util::is_not_valid(&json!({"not": true}), &json!(null));
    }

    #[test]
    fn no_annotations() {
        let schema = json!({
            "not": {"not": {"properties": {"foo": true}}},
            "unevaluatedProperties": false
        });
        tests_util::is_not_valid(&schema, &json!({"foo": 1}));
    }
}
