pub(crate) mod all_of;
pub(crate) mod any_of;
pub(crate) mod const_;
pub(crate) mod contains;
pub(crate) mod dependent_required;
pub(crate) mod dependent_schemas;
pub(crate) mod enum_;
pub(crate) mod helpers;
pub(crate) mod if_;
pub(crate) mod items;
pub(crate) mod max_items;
pub(crate) mod max_properties;
pub(crate) mod min_items;
pub(crate) mod min_properties;
pub(crate) mod minmax;
pub(crate) mod multiple_of;
pub(crate) mod not;
pub(crate) mod one_of;
pub(crate) mod pattern;
pub(crate) mod prefix_items;
pub(crate) mod properties;
pub(crate) mod property_names;
pub(crate) mod ref_;
pub(crate) mod required;
pub(crate) mod string_length;
pub(crate) mod type_;
pub(crate) mod unevaluated_items;
pub(crate) mod unevaluated_properties;
pub(crate) mod unique_items;

use serde_json::{Map, Value};
use verdict_referencing::Vocabulary;

use crate::{
    compiler::{Compiler, Context},
    validator::Validate,
    SchemaError,
};

pub(crate) type BoxedValidator = Box<dyn Validate>;
pub(crate) type CompilationResult = Result<BoxedValidator, SchemaError>;

/// Compile a single keyword of `parent`.
///
/// Returns `None` for keywords that have no assertion semantics, belong to a disabled
/// vocabulary, or are handled together with a sibling keyword.
pub(crate) fn compile<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    parent: &'a Map<String, Value>,
    keyword: &str,
    schema: &'a Value,
) -> Option<CompilationResult> {
    match keyword {
        // Core
        "$ref" => ref_::compile(compiler, ctx, parent, schema),
        "$dynamicRef" => ref_::compile_dynamic(compiler, ctx, parent, schema),
        // Applicator
        "allOf" => all_of::compile(compiler, ctx, parent, schema),
        "anyOf" => any_of::compile(compiler, ctx, parent, schema),
        "oneOf" => one_of::compile(compiler, ctx, parent, schema),
        "not" => not::compile(compiler, ctx, parent, schema),
        "if" => if_::compile(compiler, ctx, parent, schema),
        "prefixItems" => prefix_items::compile(compiler, ctx, parent, schema),
        "items" => items::compile(compiler, ctx, parent, schema),
        "contains" => contains::compile(compiler, ctx, parent, schema),
        "properties" | "patternProperties" | "additionalProperties" => {
            properties::compile(compiler, ctx, parent, keyword)
        }
        "propertyNames" => property_names::compile(compiler, ctx, parent, schema),
        "dependentSchemas" => dependent_schemas::compile(compiler, ctx, parent, schema),
        // Unevaluated
        "unevaluatedItems" => unevaluated_items::compile(compiler, ctx, parent, schema),
        "unevaluatedProperties" => unevaluated_properties::compile(compiler, ctx, parent, schema),
        // Validation
        _ if !ctx.has_vocabulary(Vocabulary::Validation) => None,
        "type" => type_::compile(ctx, parent, schema),
        "enum" => enum_::compile(ctx, parent, schema),
        "const" => const_::compile(ctx, parent, schema),
        "multipleOf" => multiple_of::compile(ctx, parent, schema),
        "minimum" => minmax::compile_minimum(ctx, parent, schema),
        "maximum" => minmax::compile_maximum(ctx, parent, schema),
        "exclusiveMinimum" => minmax::compile_exclusive_minimum(ctx, parent, schema),
        "exclusiveMaximum" => minmax::compile_exclusive_maximum(ctx, parent, schema),
        "minLength" => string_length::compile_min_length(ctx, parent, schema),
        "maxLength" => string_length::compile_max_length(ctx, parent, schema),
        "pattern" => pattern::compile(compiler, ctx, parent, schema),
        "minItems" => min_items::compile(ctx, parent, schema),
        "maxItems" => max_items::compile(ctx, parent, schema),
        "uniqueItems" => unique_items::compile(ctx, parent, schema),
        "minProperties" => min_properties::compile(ctx, parent, schema),
        "maxProperties" => max_properties::compile(ctx, parent, schema),
        "required" => required::compile(ctx, parent, schema),
        "dependentRequired" => dependent_required::compile(ctx, parent, schema),
        _ => None,
    }
}
