use serde_json::{Map, Value};

use crate::{
    compiler,
    keywords::{helpers, CompilationResult},
    validator::{Validate, ValidationContext},
};

pub(crate) struct MinPropertiesValidator {
    limit: u64,
}

impl Validate for MinPropertiesValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::Object(object) = instance {
            (object.len() as u64) >= self.limit
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
        helpers::count(ctx, "minProperties", schema)
            .map(|limit| Box::new(MinPropertiesValidator { limit }) as _),
    )
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;

    #[test]
    fn min_properties() {
        let schema = json!({"minProperties": 1});
        tests_util::is_valid(&schema, &json!({"a": null}));
        tests_util::is_not_valid(&schema, &json!({}));
        tests_util::is_valid(&schema, &json!([]));
    }
}
