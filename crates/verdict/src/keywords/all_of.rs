use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::{helpers, CompilationResult},
    node::NodeId,
    validator::{Validate, ValidationContext},
};

pub(crate) struct AllOfValidator {
    schemas: Vec<NodeId>,
}

impl Validate for AllOfValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        self.schemas.iter().all(|node| ctx.is_valid(*node, instance))
    }

    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        self.schemas
            .iter()
            .all(|node| ctx.evaluate(*node, instance, evaluated))
    }
}

#[inline]
pub(crate) fn compile<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    _: &'a Map<String, Value>,
    schema: &'a Value,
) -> Option<CompilationResult> {
    Some(
        helpers::compile_subschemas(compiler, ctx, "allOf", schema)
            .map(|schemas| Box::new(AllOfValidator { schemas }) as _),
    )
}
