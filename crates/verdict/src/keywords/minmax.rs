use serde_json::{Map, Value};

use crate::{
    compiler,
    keywords::{helpers, CompilationResult},
    number::Decimal,
    validator::{Validate, ValidationContext},
};

macro_rules! define_numeric_keyword {
    ($validator:ident, $keyword:literal, $compile:ident, $cmp:tt) => {
        pub(crate) struct $validator {
            limit: Decimal,
        }

        impl Validate for $validator {
            fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
                if let Value::Number(number) = instance {
                    // Every JSON number parses; anything else can not satisfy a bound.
                    Decimal::from_number(number).is_some_and(|value| value $cmp self.limit)
                } else {
                    true
                }
            }
        }

        #[inline]
        pub(crate) fn $compile(
            ctx: &compiler::Context,
            _: &Map<String, Value>,
            schema: &Value,
        ) -> Option<CompilationResult> {
            Some(
                helpers::decimal(ctx, $keyword, schema)
                    .map(|limit| Box::new($validator { limit }) as _),
            )
        }
    };
}

define_numeric_keyword!(MinimumValidator, "minimum", compile_minimum, >=);
define_numeric_keyword!(MaximumValidator, "maximum", compile_maximum, <=);
define_numeric_keyword!(
    ExclusiveMinimumValidator,
    "exclusiveMinimum",
    compile_exclusive_minimum,
    >
);
define_numeric_keyword!(
    ExclusiveMaximumValidator,
    "exclusiveMaximum",
    compile_exclusive_maximum,
    <
);

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({"minimum": 1}), &json!(1), true ; "minimum inclusive")]
    #[test_case(&json!({"minimum": 1.1}), &json!(1), false ; "minimum fraction")]
    #[test_case(&json!({"exclusiveMinimum": 1}), &json!(1.0), false ; "exclusive minimum")]
    #[test_case(&json!({"maximum": 3.0}), &json!(3), true ; "maximum inclusive")]
    #[test_case(&json!({"exclusiveMaximum": 3}), &json!(2.9999), true ; "exclusive maximum")]
    #[test_case(&json!({"minimum": 1}), &json!("0"), true ; "ignores strings")]
    #[test_case(
        &json!({"maximum": 18446744073709551615_u64}),
        &json!(1e20),
        false ;
        "beyond u64"
    )]
    fn bounds(schema: &Value, instance: &Value, expected: bool) {
        tests_util::is_valid_as(schema, instance, expected);
    }

    #[test]
    fn precise_comparison() {
        // Both sides round to the same f64.
        let schema: Value =
            serde_json::from_str(r#"{"maximum": 9007199254740992}"#).expect("Valid JSON");
        let instance: Value = serde_json::from_str("9007199254740993").expect("Valid JSON");
        tests_util::is_not_valid(&schema, &instance);
    }

    #[test]
    fn non_numeric_limit() {
        tests_util::is_not_compiled(&json!({"minimum": "1"}));
    }
}
