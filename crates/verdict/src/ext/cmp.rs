use std::hash::{Hash, Hasher};

use ahash::AHashSet;
use serde_json::{Map, Number, Value};

use crate::number::Decimal;

/// JSON equality: numbers compare by value, objects ignore member order.
#[inline]
pub(crate) fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Null, Value::Null) => true,
        (Value::Number(left), Value::Number(right)) => equal_numbers(left, right),
        (Value::Array(left), Value::Array(right)) => equal_arrays(left, right),
        (Value::Object(left), Value::Object(right)) => equal_objects(left, right),
        (_, _) => false,
    }
}

#[inline]
pub(crate) fn equal_numbers(left: &Number, right: &Number) -> bool {
    left == right
        || matches!(
            (Decimal::from_number(left), Decimal::from_number(right)),
            (Some(left), Some(right)) if left == right
        )
}

#[inline]
pub(crate) fn equal_arrays(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| equal(l, r))
}

#[inline]
pub(crate) fn equal_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, value)| right.get(key).is_some_and(|other| equal(value, other)))
}

/// A value whose `Hash` and `Eq` agree with [`equal`].
struct HashedValue<'a>(&'a Value);

impl PartialEq for HashedValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        equal(self.0, other.0)
    }
}

impl Eq for HashedValue<'_> {}

impl Hash for HashedValue<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Value::Null => state.write_u8(0),
            Value::Bool(item) => item.hash(state),
            Value::Number(item) => match Decimal::from_number(item) {
                Some(decimal) => decimal.hash(state),
                None => item.to_string().hash(state),
            },
            Value::String(item) => item.hash(state),
            Value::Array(items) => {
                state.write_usize(items.len());
                for item in items {
                    HashedValue(item).hash(state);
                }
            }
            Value::Object(items) => {
                state.write_usize(items.len());
                let mut keys: Vec<&String> = items.keys().collect();
                keys.sort_unstable();
                for key in keys {
                    key.hash(state);
                    if let Some(value) = items.get(key) {
                        HashedValue(value).hash(state);
                    }
                }
            }
        }
    }
}

// Pairwise comparison beats hashing for short arrays.
const ITEMS_SIZE_THRESHOLD: usize = 15;

/// Whether all items are distinct under [`equal`].
pub(crate) fn is_unique(items: &[Value]) -> bool {
    let size = items.len();
    if size <= 1 {
        true
    } else if size <= ITEMS_SIZE_THRESHOLD {
        items
            .iter()
            .enumerate()
            .all(|(idx, item)| items[idx + 1..].iter().all(|other| !equal(item, other)))
    } else {
        let mut seen = AHashSet::with_capacity(size);
        items.iter().all(|item| seen.insert(HashedValue(item)))
    }
}
