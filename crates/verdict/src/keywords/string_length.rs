use serde_json::{Map, Value};

use crate::{
    compiler,
    keywords::{helpers, CompilationResult},
    validator::{Validate, ValidationContext},
};

/// Length in Unicode code points.
#[inline]
fn char_count(item: &str) -> u64 {
    bytecount::num_chars(item.as_bytes()) as u64
}

pub(crate) struct MinLengthValidator {
    limit: u64,
}

impl Validate for MinLengthValidator {
    #[inline]
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::String(item) = instance {
            char_count(item) >= self.limit
        } else {
            true
        }
    }
}

pub(crate) struct MaxLengthValidator {
    limit: u64,
}

impl Validate for MaxLengthValidator {
    #[inline]
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::String(item) = instance {
            char_count(item) <= self.limit
        } else {
            true
        }
    }
}

/// `minLength` and `maxLength` side by side, counting characters once.
pub(crate) struct MinMaxLengthValidator {
    min: u64,
    max: u64,
}

impl Validate for MinMaxLengthValidator {
    #[inline]
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::String(item) = instance {
            let len = char_count(item);
            len >= self.min && len <= self.max
        } else {
            true
        }
    }
}

#[inline]
pub(crate) fn compile_min_length(
    ctx: &compiler::Context,
    parent: &Map<String, Value>,
    schema: &Value,
) -> Option<CompilationResult> {
    let min = match helpers::count(ctx, "minLength", schema) {
        Ok(min) => min,
        Err(error) => return Some(Err(error)),
    };
    match parent.get("maxLength") {
        Some(max) => Some(
            helpers::count(ctx, "maxLength", max)
                .map(|max| Box::new(MinMaxLengthValidator { min, max }) as _),
        ),
        None => Some(Ok(Box::new(MinLengthValidator { limit: min }))),
    }
}

#[inline]
pub(crate) fn compile_max_length(
    ctx: &compiler::Context,
    parent: &Map<String, Value>,
    schema: &Value,
) -> Option<CompilationResult> {
    if parent.contains_key("minLength") {
        // Compiled together with `minLength`
        return None;
    }
    Some(
        helpers::count(ctx, "maxLength", schema)
            .map(|limit| Box::new(MaxLengthValidator { limit }) as _),
    )
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"minLength": 2}), &json!("💩💩"), true ; "code points")]
    #[test_case(&json!({"maxLength": 1}), &json!("💩"), true ; "surrogate pair counts once")]
    #[test_case(&json!({"maxLength": 2}), &json!("abc"), false ; "too long")]
    #[test_case(&json!({"minLength": 2.0}), &json!("a"), false ; "integral float limit")]
    #[test_case(&json!({"minLength": 1, "maxLength": 2}), &json!("ab"), true ; "combined")]
    #[test_case(&json!({"minLength": 1, "maxLength": 2}), &json!(""), false ; "combined too short")]
    #[test_case(&json!({"maxLength": 2, "minLength": 1}), &json!("abc"), false ; "combined too long")]
    #[test_case(&json!({"minLength": 5}), &json!(12), true ; "ignores numbers")]
    fn lengths(schema: &Value, instance: &Value, expected: bool) {
        tests_util::is_valid_as(schema, instance, expected);
    }

    #[test_case(&json!({"minLength": -1}) ; "negative")]
    #[test_case(&json!({"maxLength": 1.5}) ; "fraction")]
    #[test_case(&json!({"minLength": 1, "maxLength": "2"}) ; "combined with a string")]
    fn malformed(schema: &Value) {
        tests_util::is_not_compiled(schema);
    }
}
