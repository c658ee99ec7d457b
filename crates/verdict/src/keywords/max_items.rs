use serde_json::{Map, Value};

use crate::{
    compiler,
    keywords::{helpers, CompilationResult},
    validator::{Validate, ValidationContext},
};

pub(crate) struct MaxItemsValidator {
    limit: u64,
}

impl Validate for MaxItemsValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::Array(items) = instance {
            (items.len() as u64) <= self.limit
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
        helpers::count(ctx, "maxItems", schema)
            .map(|limit| Box::new(MaxItemsValidator { limit }) as _),
    )
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn max_items() {
        let schema = json!({"maxItems": 1.0});
        tests_util::is_valid(&schema, &json!([1]));
        tests_util::is_not_valid(&schema, &json!([1, 2]));
        tests_util::is_valid(&schema, &json!({"a": 1, "b": 2}));
    }
}
