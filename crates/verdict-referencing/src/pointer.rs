use std::{borrow::Cow, sync::Arc};

use serde_json::Value;
use url::Url;

use crate::{specification::Position, uri, Error};

/// Unescape a JSON Pointer segment: `~1` becomes `/` and `~0` becomes `~`.
#[must_use]
pub fn unescape_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') {
        Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Follow a JSON Pointer from a schema resource.
///
/// Returns the target value together with its base URI: every `$id` met on a subschema
/// along the way, including the target itself, rebases the walk.
pub(crate) fn walk<'doc>(
    contents: &'doc Value,
    pointer: &str,
    mut base: Arc<Url>,
) -> Result<(&'doc Value, Arc<Url>), Error> {
    let mut target = contents;
    let mut position = Position::Schema;
    for segment in pointer.split('/').skip(1) {
        let segment = unescape_segment(segment);
        target = match target {
            Value::Object(object) => object.get(segment.as_ref()),
            Value::Array(items) => parse_index(&segment).and_then(|idx| items.get(idx)),
            _ => None,
        }
        .ok_or_else(|| Error::pointer_to_nowhere(pointer))?;
        position = position.step(&segment, target);
        if position == Position::Schema {
            if let Some(Value::String(id)) = target.get("$id") {
                base = Arc::new(uri::without_fragment(uri::resolve_against(&base, id)?));
            }
        }
    }
    Ok((target, base))
}

fn parse_index(segment: &str) -> Option<usize> {
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    segment.parse().ok()
}
