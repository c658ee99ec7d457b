use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::CompilationResult,
    node::NodeId,
    validator::{Validate, ValidationContext},
};

/// `if` with its optional `then` / `else` branches.
pub(crate) struct IfThenElseValidator {
    schema: NodeId,
    then_schema: Option<NodeId>,
    else_schema: Option<NodeId>,
}

impl Validate for IfThenElseValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        let branch = if ctx.is_valid(self.schema, instance) {
            self.then_schema
        } else {
            self.else_schema
        };
        branch.map_or(true, |node| ctx.is_valid(node, instance))
    }

    /// A passing `if` contributes its annotations even without `then`.
    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        let branch = if ctx.evaluate(self.schema, instance, evaluated) {
            self.then_schema
        } else {
            self.else_schema
        };
        branch.map_or(true, |node| ctx.evaluate(node, instance, evaluated))
    }
}

impl IfThenElseValidator {
    #[inline]
    pub(crate) fn compile<'a>(
        compiler: &mut Compiler<'a>,
        ctx: &Context<'a>,
        parent: &'a Map<String, Value>,
        schema: &'a Value,
    ) -> CompilationResult {
        let schema = compiler.compile_subschema(ctx, "if", schema)?;
        let then_schema = match parent.get("then") {
            Some(then) => Some(compiler.compile_subschema(ctx, "then", then)?),
            None => None,
        };
        let else_schema = match parent.get("else") {
            Some(otherwise) => Some(compiler.compile_subschema(ctx, "else", otherwise)?),
            None => None,
        };
        Ok(Box::new(IfThenElseValidator {
            schema,
            then_schema,
            else_schema,
        }))
    }
}

#[inline]
pub(crate) fn compile<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    parent: &'a Map<String, Value>,
    schema: &'a Value,
) -> Option<CompilationResult> {
    Some(IfThenElseValidator::compile(compiler, ctx, parent, schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"if": {"minimum": 0}, "then": {"multipleOf": 2}}), &json!(3), false ; "then fails")]
    #[test_case(&json!({"if": {"minimum": 0}, "then": {"multipleOf": 2}}), &json!(-3), true ; "no else")]
    #[test_case(&json!({"if": {"minimum": 0}, "else": {"multipleOf": 2}}), &json!(-3), false ; "else fails")]
    #[test_case(&json!({"if": {"minimum": 0}, "else": {"multipleOf": 2}}), &json!(3), true ; "no then")]
    #[test_case(&json!({"if": false}), &json!(1), true ; "if alone")]
    #[test_case(&json!({"then": false, "else": false}), &json!(1), true ; "branches without if")]
    fn conditional(schema: &Value, instance: &Value, expected: bool) {
        tests_util::is_valid_as(schema, instance, expected);
    }

    #[test]
    fn passing_if_contributes_annotations() {
        let schema = json!({
            "if": {"properties": {"foo": {"const": "a"}}},
            "unevaluatedProperties": false
        });
        tests_util::is_valid(&schema, &json!({"foo": "a"}));
        tests_util::is_not_valid(&schema, &json!({"foo": "b"}));
    }
}
