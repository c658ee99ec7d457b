use serde_json::{Map, Value};

use crate::{
    compiler,
    keywords::{helpers, CompilationResult},
    number::Decimal,
    validator::{Validate, ValidationContext},
    SchemaError,
};

/// Exact decimal divisibility: `0.0075` is a multiple of `0.0001`.
pub(crate) struct MultipleOfValidator {
    divisor: Decimal,
}

impl MultipleOfValidator {
    #[inline]
    pub(crate) fn compile(ctx: &compiler::Context, schema: &Value) -> CompilationResult {
        let divisor = helpers::decimal(ctx, "multipleOf", schema)?;
        if !divisor.is_positive() {
            return Err(SchemaError::invalid_keyword(
                ctx.location().join("multipleOf"),
                "a number greater than 0",
            ));
        }
        Ok(Box::new(MultipleOfValidator { divisor }))
    }
}

impl Validate for MultipleOfValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::Number(number) = instance {
            Decimal::from_number(number).is_some_and(|value| value.is_multiple_of(&self.divisor))
        } else {
            true
        }
    }
}

#[inline]
pub(crate) fn compile(
    ctx: &compiler::Context,
    _: &Map<String, Value>,
    schema: &Value,
) -> Option<CompilationResult> {
    Some(MultipleOfValidator::compile(ctx, schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!(0.0075), &json!({"multipleOf": 0.0001}), true ; "small decimals")]
    #[test_case(&json!(0.00751), &json!({"multipleOf": 0.0001}), false ; "small decimals remainder")]
    #[test_case(&json!(1e308), &json!({"multipleOf": 0.123456789}), false ; "huge value")]
    #[test_case(&json!(10), &json!({"multipleOf": 2.5}), true ; "fractional divisor")]
    #[test_case(&json!(-6), &json!({"multipleOf": 3}), true ; "negative value")]
    #[test_case(&json!("7"), &json!({"multipleOf": 3}), true ; "ignores strings")]
    fn divisibility(instance: &Value, schema: &Value, expected: bool) {
        tests_util::is_valid_as(schema, instance, expected);
    }

    #[test_case(&json!({"multipleOf": 0}) ; "zero")]
    #[test_case(&json!({"multipleOf": -1}) ; "negative")]
    fn non_positive_divisor(schema: &Value) {
        tests_util::is_not_compiled(schema);
    }
}
