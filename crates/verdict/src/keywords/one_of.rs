use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::{helpers, CompilationResult},
    node::NodeId,
    validator::{Validate, ValidationContext},
};

pub(crate) struct OneOfValidator {
    schemas: Vec<NodeId>,
}

impl Validate for OneOfValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        let mut valid = 0;
        for node in &self.schemas {
            if ctx.is_valid(*node, instance) {
                valid += 1;
                if valid > 1 {
                    return false;
                }
            }
        }
        valid == 1
    }

    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        let mut matched = None;
        for node in &self.schemas {
            let mut branch = Evaluated::default();
            if ctx.evaluate(*node, instance, &mut branch) {
                if matched.is_some() {
                    return false;
                }
                matched = Some(branch);
            }
        }
        match matched {
            Some(branch) => {
                evaluated.merge(branch);
                true
            }
            None => false,
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
    Some(
        helpers::compile_subschemas(compiler, ctx, "oneOf", schema)
            .map(|schemas| Box::new(OneOfValidator { schemas }) as _),
    )
}
