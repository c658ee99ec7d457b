use std::sync::Arc;

use ahash::AHashMap;
use serde_json::{Map, Value};

use crate::{
    compiler::{Compiler, Context},
    evaluation::Evaluated,
    keywords::CompilationResult,
    node::NodeId,
    regex::{CompiledPattern, RegexEngine},
    validator::{Validate, ValidationContext},
    SchemaError,
};

// Linear lookup beats hashing for a handful of properties.
const SMALL_MAP_THRESHOLD: usize = 16;

/// Subschemas of `properties`, keyed by property name.
enum PropertyMap {
    Small(Vec<(String, NodeId)>),
    Big(AHashMap<String, NodeId>),
}

impl PropertyMap {
    fn new(entries: Vec<(String, NodeId)>) -> Self {
        if entries.len() < SMALL_MAP_THRESHOLD {
            PropertyMap::Small(entries)
        } else {
            PropertyMap::Big(entries.into_iter().collect())
        }
    }

    #[inline]
    fn get(&self, property: &str) -> Option<NodeId> {
        match self {
            PropertyMap::Small(entries) => entries
                .iter()
                .find_map(|(name, node)| (name == property).then_some(*node)),
            PropertyMap::Big(entries) => entries.get(property).copied(),
        }
    }
}

/// `properties`, `patternProperties` and `additionalProperties` of one schema.
///
/// `additionalProperties` only applies to properties matched by neither of the other two, so
/// the three keywords are evaluated together.
pub(crate) struct PropertiesValidator {
    properties: PropertyMap,
    patterns: Vec<(Arc<CompiledPattern>, NodeId)>,
    additional: Option<NodeId>,
}

impl PropertiesValidator {
    #[inline]
    pub(crate) fn compile<'a>(
        compiler: &mut Compiler<'a>,
        ctx: &Context<'a>,
        parent: &'a Map<String, Value>,
    ) -> CompilationResult {
        let mut properties = Vec::new();
        if let Some(schema) = parent.get("properties") {
            let Value::Object(map) = schema else {
                return Err(SchemaError::invalid_keyword(
                    ctx.location().join("properties"),
                    "an object of schemas",
                ));
            };
            let properties_ctx = ctx.new_at_location("properties");
            for (name, subschema) in map {
                let node = compiler.compile_subschema(&properties_ctx, name, subschema)?;
                properties.push((name.clone(), node));
            }
        }
        let mut patterns = Vec::new();
        if let Some(schema) = parent.get("patternProperties") {
            let Value::Object(map) = schema else {
                return Err(SchemaError::invalid_keyword(
                    ctx.location().join("patternProperties"),
                    "an object of schemas",
                ));
            };
            let patterns_ctx = ctx.new_at_location("patternProperties");
            for (pattern, subschema) in map {
                let node = compiler.compile_subschema(&patterns_ctx, pattern, subschema)?;
                patterns.push((compiler.pattern(pattern), node));
            }
        }
        let additional = match parent.get("additionalProperties") {
            Some(schema) => Some(compiler.compile_subschema(ctx, "additionalProperties", schema)?),
            None => None,
        };
        Ok(Box::new(PropertiesValidator {
            properties: PropertyMap::new(properties),
            patterns,
            additional,
        }))
    }

    fn check(
        &self,
        object: &Map<String, Value>,
        ctx: &mut ValidationContext,
        mut evaluated: Option<&mut Evaluated>,
    ) -> bool {
        for (name, value) in object {
            let mut is_matched = false;
            if let Some(node) = self.properties.get(name) {
                is_matched = true;
                if !ctx.is_valid_child(node, value) {
                    return false;
                }
            }
            for (pattern, node) in &self.patterns {
                match pattern.is_match(name) {
                    Ok(true) => {
                        is_matched = true;
                        if !ctx.is_valid_child(*node, value) {
                            return false;
                        }
                    }
                    Ok(false) => {}
                    Err(error) => {
                        tracing::debug!(
                            pattern = pattern.pattern(),
                            %error,
                            "Pattern did not match"
                        );
                        return false;
                    }
                }
            }
            if !is_matched {
                if let Some(node) = self.additional {
                    is_matched = true;
                    if !ctx.is_valid_child(node, value) {
                        return false;
                    }
                }
            }
            if is_matched {
                if let Some(evaluated) = evaluated.as_deref_mut() {
                    evaluated.mark_property(name);
                }
            }
        }
        true
    }
}

impl Validate for PropertiesValidator {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        if let Value::Object(object) = instance {
            self.check(object, ctx, None)
        } else {
            true
        }
    }

    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        if let Value::Object(object) = instance {
            self.check(object, ctx, Some(evaluated))
        } else {
            true
        }
    }
}

/// The three keywords compile into one validator, attached to the first present of
/// `properties`, `patternProperties`, `additionalProperties`.
#[inline]
pub(crate) fn compile<'a>(
    compiler: &mut Compiler<'a>,
    ctx: &Context<'a>,
    parent: &'a Map<String, Value>,
    keyword: &str,
) -> Option<CompilationResult> {
    let owner = ["properties", "patternProperties"]
        .into_iter()
        .find(|name| parent.contains_key(*name))
        .unwrap_or("additionalProperties");
    if keyword == owner {
        Some(PropertiesValidator::compile(compiler, ctx, parent))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    fn schema() -> Value {
        json!({
            "properties": {"foo": {"type": "integer"}},
            "patternProperties": {"^x-": {"type": "string"}, "o$": {"minimum": 0}},
            "additionalProperties": false
        })
    }

    #[test_case(&json!({"foo": 1}), true ; "named")]
    #[test_case(&json!({"foo": -1}), false ; "named and pattern")]
    #[test_case(&json!({"x-a": "s"}), true ; "pattern")]
    #[test_case(&json!({"x-a": 1}), false ; "pattern mismatch")]
    #[test_case(&json!({"bar": 1}), false ; "additional")]
    #[test_case(&json!(["bar"]), true ; "ignores arrays")]
    fn combined(instance: &Value, expected: bool) {
        tests_util::is_valid_as(&schema(), instance, expected);
    }

    #[test]
    fn many_properties() {
        let mut properties = serde_json::Map::new();
        for idx in 0..40 {
            properties.insert(format!("p{idx}"), json!({"type": "integer"}));
        }
        let schema = json!({"properties": properties});
        tests_util::is_valid(&schema, &json!({"p0": 1, "p39": 2, "other": "x"}));
        tests_util::is_not_valid(&schema, &json!({"p39": "x"}));
    }

    #[test]
    fn additional_only() {
        let schema = json!({"additionalProperties": {"type": "boolean"}});
        tests_util::is_valid(&schema, &json!({"a": true}));
        tests_util::is_not_valid(&schema, &json!({"a": 1}));
    }

    #[test]
    fn invalid_pattern_fails_objects_with_properties() {
        let schema = json!({"patternProperties": {"^(abc]": true}});
        tests_util::is_not_valid(&schema, &json!({"a": 1}));
        tests_util::is_valid(&schema, &json!({}));
    }

    #[test]
    fn evaluated_properties() {
        let schema = json!({
            "properties": {"foo": true},
            "patternProperties": {"^b": true},
            "unevaluatedProperties": false
        });
        tests_util::is_valid(&schema, &json!({"foo": 1, "bar": 2}));
        tests_util::is_not_valid(&schema, &json!({"foo": 1, "qux": 2}));
    }
}
