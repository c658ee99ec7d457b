use core::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::number::Decimal;

/// Primitive JSON types as named by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JsonType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl JsonType {
    const fn bit(self) -> u8 {
        match self {
            JsonType::Array => 1,
            JsonType::Boolean => 1 << 1,
            JsonType::Integer => 1 << 2,
            JsonType::Null => 1 << 3,
            JsonType::Number => 1 << 4,
            JsonType::Object => 1 << 5,
            JsonType::String => 1 << 6,
        }
    }
}

impl FromStr for JsonType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "array" => Ok(JsonType::Array),
            "boolean" => Ok(JsonType::Boolean),
            "integer" => Ok(JsonType::Integer),
            "null" => Ok(JsonType::Null),
            "number" => Ok(JsonType::Number),
            "object" => Ok(JsonType::Object),
            "string" => Ok(JsonType::String),
            _ => Err(()),
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JsonType::Array => "array",
            JsonType::Boolean => "boolean",
            JsonType::Integer => "integer",
            JsonType::Null => "null",
            JsonType::Number => "number",
            JsonType::Object => "object",
            JsonType::String => "string",
        })
    }
}

/// A set of [`JsonType`]s packed into a byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct JsonTypeSet(u8);

impl JsonTypeSet {
    pub(crate) const fn empty() -> Self {
        JsonTypeSet(0)
    }

    #[must_use]
    pub(crate) const fn insert(self, ty: JsonType) -> Self {
        JsonTypeSet(self.0 | ty.bit())
    }

    pub(crate) const fn contains(self, ty: JsonType) -> bool {
        self.0 & ty.bit() != 0
    }

    /// Whether the instance belongs to one of the types in the set.
    ///
    /// Every number matches `number`; numerically integral ones (`1.0` included) also match
    /// `integer`.
    pub(crate) fn contains_value_type(self, instance: &Value) -> bool {
        match instance {
            Value::Array(_) => self.contains(JsonType::Array),
            Value::Bool(_) => self.contains(JsonType::Boolean),
            Value::Null => self.contains(JsonType::Null),
            Value::Object(_) => self.contains(JsonType::Object),
            Value::String(_) => self.contains(JsonType::String),
            Value::Number(number) => {
                self.contains(JsonType::Number)
                    || (self.contains(JsonType::Integer)
                        && Decimal::from_number(number).is_some_and(|value| value.is_integer()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonType, JsonTypeSet};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(JsonType::Integer, &json!(1), true ; "integer")]
    #[test_case(JsonType::Integer, &json!(1.0), true ; "integral float")]
    #[test_case(JsonType::Integer, &json!(1.5), false ; "fraction")]
    #[test_case(JsonType::Number, &json!(1), true ; "number accepts integers")]
    #[test_case(JsonType::Boolean, &json!(0), false ; "zero is not boolean")]
    #[test_case(JsonType::Null, &json!(null), true ; "null")]
    #[test_case(JsonType::Object, &json!([]), false ; "array is not object")]
    fn single_type(ty: JsonType, instance: &Value, expected: bool) {
        assert_eq!(
            JsonTypeSet::empty().insert(ty).contains_value_type(instance),
            expected
        );
    }

    #[test]
    fn names_round_trip() {
        for name in ["array", "boolean", "integer", "null", "number", "object", "string"] {
            let ty: JsonType = name.parse().expect("Known type");
            assert_eq!(ty.to_string(), name);
        }
        assert!("float".parse::<JsonType>().is_err());
    }
}
