use serde_json::{Map, Value};

use crate::{
    compiler,
    keywords::CompilationResult,
    validator::{Validate, ValidationContext},
    SchemaError,
};

pub(crate) struct RequiredValidator {
    required: Vec<String>,
}

impl RequiredValidator {
    #[inline]
    pub(crate) fn compile(ctx: &compiler::Context, items: &[Value]) -> CompilationResult {
        let required = string_array(items).ok_or_else(|| {
            SchemaError::invalid_keyword(ctx.location().join("required"), "an array of strings")
        })?;
        Ok(Box::new(RequiredValidator { required }))
    }
}

impl Validate for RequiredValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::Object(item) = instance {
            self.required
                .iter()
                .all(|property_name| item.contains_key(property_name))
        } else {
            true
        }
    }
}

/// `required` with a single property.
pub(crate) struct SingleItemRequiredValidator {
    value: String,
}

impl Validate for SingleItemRequiredValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::Object(item) = instance {
            item.contains_key(&self.value)
        } else {
            true
        }
    }
}

pub(crate) fn string_array(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_str().map(String::from))
        .collect()
}

#[inline]
pub(crate) fn compile(
    ctx: &compiler::Context,
    _: &Map<String, Value>,
    schema: &Value,
) -> Option<CompilationResult> {
    match schema {
        Value::Array(items) => match items.as_slice() {
            [] => None,
            [Value::String(item)] => Some(Ok(Box::new(SingleItemRequiredValidator {
                value: item.clone(),
            }))),
            items => Some(RequiredValidator::compile(ctx, items)),
        },
        _ => Some(Err(SchemaError::invalid_keyword(
            ctx.location().join("required"),
            "an array of strings",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"required": ["a"]}), &json!({"a": null}), true ; "single present")]
    #[test_case(&json!({"required": ["a"]}), &json!({"b": 1}), false ; "single missing")]
    #[test_case(&json!({"required": ["a", "b"]}), &json!({"a": 1}), false ; "one of two missing")]
    #[test_case(&json!({"required": ["a", "b"]}), &json!(["a", "b"]), true ; "ignores arrays")]
    #[test_case(&json!({"required": []}), &json!({}), true ; "empty")]
    fn required(schema: &Value, instance: &Value, expected: bool) {
        tests_util::is_valid_as(schema, instance, expected);
    }

    #[test_case(&json!({"required": "a"}) ; "string")]
    #[test_case(&json!({"required": ["a", 1]}) ; "non-string item")]
    fn malformed(schema: &Value) {
        tests_util::is_not_compiled(schema);
    }
}
