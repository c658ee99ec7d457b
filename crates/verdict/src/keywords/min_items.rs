use serde_json::{Map, Value};

use crate::{
    compiler,
    keywords::{helpers, CompilationResult},
    validator::{Validate, ValidationContext},
};

pub(crate) struct MinItemsValidator {
    limit: u64,
}

impl Validate for MinItemsValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::Array(items) = instance {
            (items.len() as u64) >= self.limit
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
    Some(
        helpers::count(ctx, "minItems", schema)
            .map(|limit| Box::new(MinItemsValidator { limit }) as _),
    )
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!([1, 2]), true ; "enough")]
    #[test_case(&json!([1]), false ; "too few")]
    #[test_case(&json!("ab"), true ; "ignores strings")]
    fn min_items(instance: &Value, expected: bool) {
        tests_util::is_valid_as(&json!({"minItems": 2}), instance, expected);
    }
}
