use serde_json::Value;

use crate::{
    compiler::{Compiler, Context},
    node::NodeId,
    number::Decimal,
    SchemaError,
};

/// A non-negative integer keyword argument such as `minLength`. `2.0` is accepted.
pub(crate) fn count(ctx: &Context, keyword: &str, value: &Value) -> Result<u64, SchemaError> {
    if let Some(count) = value.as_u64() {
        return Ok(count);
    }
    match value {
        Value::Number(number) => Decimal::from_number(number).and_then(|value| value.as_count()),
        _ => None,
    }
    .ok_or_else(|| {
        SchemaError::invalid_keyword(ctx.location().join(keyword), "a non-negative integer")
    })
}

/// A number keyword argument such as `minimum`.
pub(crate) fn decimal(ctx: &Context, keyword: &str, value: &Value) -> Result<Decimal, SchemaError> {
    match value {
        Value::Number(number) => Decimal::from_number(number),
        _ => None,
    }
    .ok_or_else(|| SchemaError::invalid_keyword(ctx.location().join(keyword), "a number"))
}

/// Compile a non-empty array of subschemas, as used by `allOf`, `anyOf` and `oneOf`.
pub(crate) fn compile_subschemas<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    keyword: &str,
    schema: &'a Value,
) -> Result<Vec<NodeId>, SchemaError> {
    match schema {
        Value::Array(items) if !items.is_empty() => {
            let ctx = ctx.new_at_location(keyword);
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| compiler.compile_subschema(&ctx, idx, item))
                .collect()
        }
        _ => Err(SchemaError::invalid_keyword(
            ctx.location().join(keyword),
            "a non-empty array of schemas",
        )),
    }
}
