//! Bundled meta-schemas.
use std::sync::LazyLock;

use serde_json::Value;

macro_rules! schema {
    ($vis:vis $name:ident, $path:expr) => {
        $vis static $name: LazyLock<Value> = LazyLock::new(|| {
            serde_json::from_slice(include_bytes!($path)).expect("Invalid meta-schema")
        });
    };
}

schema!(pub DRAFT202012, "../metaschemas/draft2020-12/schema.json");
schema!(pub DRAFT202012_CORE, "../metaschemas/draft2020-12/meta/core.json");
schema!(pub DRAFT202012_APPLICATOR, "../metaschemas/draft2020-12/meta/applicator.json");
schema!(pub DRAFT202012_UNEVALUATED, "../metaschemas/draft2020-12/meta/unevaluated.json");
schema!(pub DRAFT202012_VALIDATION, "../metaschemas/draft2020-12/meta/validation.json");
schema!(pub DRAFT202012_META_DATA, "../metaschemas/draft2020-12/meta/meta-data.json");
schema!(pub DRAFT202012_FORMAT_ANNOTATION, "../metaschemas/draft2020-12/meta/format-annotation.json");
schema!(pub DRAFT202012_CONTENT, "../metaschemas/draft2020-12/meta/content.json");
schema!(NO_VALIDATION, "../metaschemas/localhost/metaschema-no-validation.json");
schema!(OPTIONAL_VOCABULARY, "../metaschemas/localhost/metaschema-optional-vocabulary.json");

/// URI of the 2020-12 meta-schema.
pub const DRAFT202012_URI: &str = "https://json-schema.org/draft/2020-12/schema";

/// All bundled meta-schemas keyed by their canonical URI.
pub static META_SCHEMAS: LazyLock<[(&'static str, &'static Value); 10]> = LazyLock::new(|| {
    [
        (DRAFT202012_URI, &*DRAFT202012),
        (
            "https://json-schema.org/draft/2020-12/meta/core",
            &*DRAFT202012_CORE,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/applicator",
            &*DRAFT202012_APPLICATOR,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/unevaluated",
            &*DRAFT202012_UNEVALUATED,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/validation",
            &*DRAFT202012_VALIDATION,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/meta-data",
            &*DRAFT202012_META_DATA,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/format-annotation",
            &*DRAFT202012_FORMAT_ANNOTATION,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/content",
            &*DRAFT202012_CONTENT,
        ),
        (
            "http://localhost:1234/draft2020-12/metaschema-no-validation.json",
            &*NO_VALIDATION,
        ),
        (
            "http://localhost:1234/draft2020-12/metaschema-optional-vocabulary.json",
            &*OPTIONAL_VOCABULARY,
        ),
    ]
});

/// Look up a bundled meta-schema by URI. A trailing empty fragment is ignored.
#[must_use]
pub fn get(uri: &str) -> Option<&'static Value> {
    let uri = uri.strip_suffix('#').unwrap_or(uri);
    META_SCHEMAS
        .iter()
        .find_map(|(known, contents)| (*known == uri).then_some(*contents))
}
