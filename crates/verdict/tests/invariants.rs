use serde_json::{json, Value};
use test_case::test_case;
use verdict::validate_schema;

fn samples() -> Vec<Value> {
    vec![
        json!(null),
        json!(true),
        json!(false),
        json!(0),
        json!(-1.5),
        json!(1e308),
        json!(""),
        json!("💩"),
        json!([]),
        json!([1, "a", null]),
        json!({}),
        json!({"a": {"b": [1]}}),
    ]
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[test]
fn boolean_schemas() {
    for value in samples() {
        assert!(validate_schema(&value, &json!(true)), "{value}");
        assert!(!validate_schema(&value, &json!(false)), "{value}");
    }
}

#[test_case("number", &json!({"minimum": 1000}))]
#[test_case("number", &json!({"maximum": -1000}))]
#[test_case("number", &json!({"exclusiveMinimum": 1000}))]
#[test_case("number", &json!({"exclusiveMaximum": -1000}))]
#[test_case("number", &json!({"multipleOf": 7}))]
#[test_case("string", &json!({"minLength": 100}))]
#[test_case("string", &json!({"maxLength": 0}))]
#[test_case("string", &json!({"pattern": "^impossible$"}))]
#[test_case("array", &json!({"minItems": 100}))]
#[test_case("array", &json!({"maxItems": 0}))]
#[test_case("array", &json!({"items": false}))]
#[test_case("array", &json!({"prefixItems": [false]}))]
#[test_case("array", &json!({"contains": false}))]
#[test_case("array", &json!({"uniqueItems": true}))]
#[test_case("array", &json!({"unevaluatedItems": false}))]
#[test_case("object", &json!({"required": ["missing"]}))]
#[test_case("object", &json!({"minProperties": 100}))]
#[test_case("object", &json!({"maxProperties": 0}))]
#[test_case("object", &json!({"additionalProperties": false}))]
#[test_case("object", &json!({"propertyNames": false}))]
#[test_case("object", &json!({"patternProperties": {".*": false}}))]
#[test_case("object", &json!({"dependentRequired": {"a": ["missing"]}}))]
#[test_case("object", &json!({"dependentSchemas": {"a": false}}))]
#[test_case("object", &json!({"unevaluatedProperties": false}))]
fn keywords_ignore_other_kinds(target: &str, schema: &Value) {
    for value in samples() {
        if kind(&value) != target {
            assert!(validate_schema(&value, schema), "{value} against {schema}");
        }
    }
}

#[test]
fn idempotence() {
    let schema = json!({
        "anyOf": [{"type": "string", "pattern": "a"}, {"type": "array", "uniqueItems": true}]
    });
    let validator = verdict::validator_for(&schema).expect("Valid schema");
    for value in samples() {
        let first = validator.is_valid(&value);
        for _ in 0..3 {
            assert_eq!(validator.is_valid(&value), first);
            assert_eq!(validate_schema(&value, &schema), first);
        }
    }
}

#[test_case(&json!(3), true)]
#[test_case(&json!(3.0), true)]
#[test_case(&json!(3.2), false)]
#[test_case(&json!(-0.0), true)]
#[test_case(&json!(1e308), true)]
#[test_case(&json!("3"), false)]
fn integer_type(instance: &Value, expected: bool) {
    assert_eq!(
        validate_schema(instance, &json!({"type": "integer"})),
        expected
    );
}

#[test]
fn combinator_laws() {
    let schemas = [
        json!({"type": "number"}),
        json!({"minimum": 0}),
        json!({"type": "string"}),
    ];
    for value in samples() {
        let results: Vec<bool> = schemas
            .iter()
            .map(|schema| validate_schema(&value, schema))
            .collect();
        let valid_count = results.iter().filter(|valid| **valid).count();
        assert_eq!(
            validate_schema(&value, &json!({"allOf": schemas})),
            results.iter().all(|valid| *valid)
        );
        assert_eq!(
            validate_schema(&value, &json!({"anyOf": schemas})),
            valid_count > 0
        );
        assert_eq!(
            validate_schema(&value, &json!({"oneOf": schemas})),
            valid_count == 1
        );
        for (schema, result) in schemas.iter().zip(&results) {
            assert_eq!(validate_schema(&value, &json!({"not": schema})), !result);
        }
    }
}

#[test_case("minimum", true)]
#[test_case("maximum", true)]
#[test_case("exclusiveMinimum", false)]
#[test_case("exclusiveMaximum", false)]
fn boundary_points(keyword: &str, included: bool) {
    let schema = json!({ keyword: 5 });
    assert_eq!(validate_schema(&json!(5), &schema), included);
    assert_eq!(validate_schema(&json!(5.0), &schema), included);
}

#[test]
fn pattern_is_unanchored() {
    assert!(validate_schema(&json!("xxaayy"), &json!({"pattern": "a+"})));
}
