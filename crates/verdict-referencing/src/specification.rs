use core::slice;

use serde_json::{map, Value};

/// Keywords whose value is a single subschema.
const IN_VALUE: &[&str] = &[
    "additionalProperties",
    "contains",
    "contentSchema",
    "else",
    "if",
    "items",
    "not",
    "propertyNames",
    "then",
    "unevaluatedItems",
    "unevaluatedProperties",
];
/// Keywords whose value holds subschemas in an array or object.
const IN_CHILD: &[&str] = &[
    "allOf",
    "anyOf",
    "oneOf",
    "prefixItems",
    "$defs",
    "definitions",
    "dependentSchemas",
    "patternProperties",
    "properties",
];

pub(crate) enum SubIterBranch<'a> {
    Once(&'a Value),
    Array(slice::Iter<'a, Value>),
    Object(map::Values<'a>),
    Empty,
}

impl<'a> Iterator for SubIterBranch<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SubIterBranch::Once(value) => {
                let value = *value;
                *self = SubIterBranch::Empty;
                Some(value)
            }
            SubIterBranch::Array(iter) => iter.next(),
            SubIterBranch::Object(iter) => iter.next(),
            SubIterBranch::Empty => None,
        }
    }
}

fn object_iter<'a>((key, value): (&'a String, &'a Value)) -> SubIterBranch<'a> {
    match key.as_str() {
        "additionalProperties"
        | "contains"
        | "contentSchema"
        | "else"
        | "if"
        | "not"
        | "propertyNames"
        | "then"
        | "unevaluatedItems"
        | "unevaluatedProperties" => SubIterBranch::Once(value),
        "allOf" | "anyOf" | "oneOf" | "prefixItems" => match value {
            Value::Array(items) => SubIterBranch::Array(items.iter()),
            _ => SubIterBranch::Empty,
        },
        "$defs" | "definitions" | "dependentSchemas" | "patternProperties" | "properties" => {
            match value {
                Value::Object(object) => SubIterBranch::Object(object.values()),
                _ => SubIterBranch::Empty,
            }
        }
        // Arrays are accepted for compatibility with pre-2020-12 documents.
        "items" => match value {
            Value::Array(items) => SubIterBranch::Array(items.iter()),
            _ => SubIterBranch::Once(value),
        },
        _ => SubIterBranch::Empty,
    }
}

/// Iterate over the direct subschemas of a schema.
///
/// Values of non-applicator keywords such as `enum`, `const` or unknown keywords are never
/// visited.
pub fn subresources_of(contents: &Value) -> impl Iterator<Item = &Value> {
    contents
        .as_object()
        .into_iter()
        .flat_map(|schema| schema.iter().flat_map(object_iter))
}

/// What a value reached by a JSON Pointer walk is, relative to the schema structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Schema,
    Container,
    Other,
}

impl Position {
    /// Position of the value reached by following `segment` from a value at `self`.
    pub(crate) fn step(self, segment: &str, target: &Value) -> Position {
        match self {
            Position::Schema if segment == "items" && target.is_array() => Position::Container,
            Position::Schema if IN_VALUE.contains(&segment) => Position::Schema,
            Position::Schema if IN_CHILD.contains(&segment) => Position::Container,
            Position::Container => Position::Schema,
            _ => Position::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn visits_applicators_only() {
        let schema = json!({
            "properties": {"a": {"type": "string"}},
            "prefixItems": [{"minimum": 1}],
            "not": {"maxLength": 3},
            "enum": [{"$id": "http://example.com/ignored"}],
            "const": {"type": "integer"},
            "unknown": {"type": "null"}
        });
        let found: Vec<&Value> = subresources_of(&schema).collect();
        assert_eq!(
            found,
            vec![
                &json!({"type": "string"}),
                &json!({"minimum": 1}),
                &json!({"maxLength": 3}),
            ]
        );
    }

    #[test]
    fn boolean_schemas_have_no_subresources() {
        assert_eq!(subresources_of(&json!(true)).count(), 0);
    }

    #[test]
    fn positions() {
        let object = json!({});
        let array = json!([]);
        assert_eq!(Position::Schema.step("properties", &object), Position::Container);
        assert_eq!(Position::Container.step("foo", &object), Position::Schema);
        assert_eq!(Position::Schema.step("not", &object), Position::Schema);
        assert_eq!(Position::Schema.step("items", &array), Position::Container);
        assert_eq!(Position::Schema.step("enum", &array), Position::Other);
        assert_eq!(Position::Other.step("not", &object), Position::Other);
    }
}
