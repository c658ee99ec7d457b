use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    keywords::CompilationResult,
    regex::{CompiledPattern, RegexEngine},
    validator::{Validate, ValidationContext},
    SchemaError,
};

pub(crate) struct PatternValidator {
    regex: Arc<CompiledPattern>,
}

impl Validate for PatternValidator {
    fn is_valid(&self, instance: &Value, _ctx: &mut ValidationContext) -> bool {
        if let Value::String(item) = instance {
            match self.regex.is_match(item) {
                Ok(is_match) => is_match,
                Err(error) => {
                    tracing::debug!(
                        pattern = self.regex.pattern(),
                        %error,
                        "Pattern did not match"
                    );
                    false
                }
            }
        } else {
            true
        }
    }
}

#[inline]
pub(crate) fn compile<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    _: &'a Map<String, Value>,
    schema: &'a Value,
) -> Option<CompilationResult> {
    match schema {
        Value::String(pattern) => Some(Ok(Box::new(PatternValidator {
            regex: compiler.pattern(pattern),
        }))),
        _ => Some(Err(SchemaError::invalid_keyword(
            ctx.location().join("pattern"),
            "a string",
        ))),
    }
}
