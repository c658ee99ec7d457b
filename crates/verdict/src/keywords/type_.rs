use serde_json::{Map, Value};

use crate::{
    compiler,
    keywords::CompilationResult,
    types::{JsonType, JsonTypeSet},
    validator::{Validate, ValidationContext},
    SchemaError,
};

pub(crate) struct TypeValidator {
    types: JsonTypeSet,
}

impl TypeValidator {
    #[inline]
    pub(crate) fn compile(ctx: &compiler::Context, schema: &Value) -> CompilationResult {
        let invalid = || {
            SchemaError::invalid_keyword(
                ctx.location().join("type"),
                "a type name or an array of type names",
            )
        };
        let parse = |item: &Value| {
            item.as_str()
                .and_then(|name| name.parse::<JsonType>().ok())
                .ok_or_else(invalid)
        };
        let types = match schema {
            Value::Array(items) => items
                .iter()
                .try_fold(JsonTypeSet::empty(), |types, item| {
                    Ok::<_, SchemaError>(types.insert(parse(item)?))
                })?,
            item => JsonTypeSet::empty().insert(parse(item)?),
        };
        Ok(Box::new(TypeValidator { types }))
    }
}

impl Validate for TypeValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        self.types.contains_value_type(instance)
    }
}

#[inline]
pub(crate) fn compile(
    ctx: &compiler::Context,
    _: &Map<String, Value>,
    schema: &Value,
) -> Option<CompilationResult> {
    Some(TypeValidator::compile(ctx, schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"type": "integer"}), &json!(1.0) ; "integral float is an integer")]
    #[test_case(&json!({"type": ["string", "null"]}), &json!(null) ; "union")]
    #[test_case(&json!({"type": "number"}), &json!(1e300) ; "big number")]
    fn valid(schema: &Value, instance: &Value) {
        tests_util::is_valid(schema, instance);
    }

    #[test_case(&json!({"type": "integer"}), &json!(1.5) ; "fraction")]
    #[test_case(&json!({"type": "boolean"}), &json!(0) ; "zero is not false")]
    fn invalid(schema: &Value, instance: &Value) {
        tests_util::is_not_valid(schema, instance);
    }

    #[test_case(&json!({"type": "float"}) ; "unknown name")]
    #[test_case(&json!({"type": 1}) ; "not a string")]
    #[test_case(&json!({"type": ["string", 1]}) ; "array with a number")]
    fn malformed(schema: &Value) {
        tests_util::is_not_compiled(schema);
    }

    #[test]
    fn empty_union() {
        let schema = json!({"type": []});
        assert!(!crate::validate_schema(&json!(null), &schema));
        let validator = crate::options()
            .should_validate_schema(false)
            .build(&schema)
            .expect("Compiles without meta-schema validation");
        for instance in [json!(null), json!(1), json!("a"), json!([]), json!({})] {
            assert!(!validator.is_valid(&instance));
        }
    }
}
