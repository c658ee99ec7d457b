use serde_json::{Map, Value};

use crate::{
    compiler,
    ext::cmp,
    keywords::CompilationResult,
    validator::{Validate, ValidationContext},
};

pub(crate) struct ConstValidator {
    value: Value,
}

impl Validate for ConstValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        cmp::equal(instance, &self.value)
    }
}

#[inline]
pub(crate) fn compile(
    _: &compiler::Context,
    _: &Map<String, Value>,
    schema: &Value,
) -> Option<CompilationResult> {
    Some(Ok(Box::new(ConstValidator {
        value: schema.clone(),
    })))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"const": 1}), &json!(1.0), true ; "integral float")]
    #[test_case(&json!({"const": 0}), &json!(false), false ; "zero is not false")]
    #[test_case(&json!({"const": null}), &json!(null), true ; "null")]
    #[test_case(&json!({"const": {"a": [1]}}), &json!({"a": [1]}), true ; "nested")]
    #[test_case(&json!({"const": "a"}), &json!("b"), false ; "different string")]
    fn const_value(schema: &Value, instance: &Value, expected: bool) {
        tests_util::is_valid_as(schema, instance, expected);
    }
}
