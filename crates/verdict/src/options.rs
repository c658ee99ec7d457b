use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{compiler, meta, SchemaError, Validator};

const DEFAULT_MAX_REF_DEPTH: usize = 64;

/// Settings that can be loaded from a configuration file.
///
/// ```rust
/// let config: verdict::Config = serde_json::from_str(r#"{"max_ref_depth": 16}"#)?;
/// assert_eq!(config.max_ref_depth, 16);
/// assert_eq!(config.default_base_uri, "");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How many references may be followed without consuming any of the instance.
    pub max_ref_depth: usize,
    /// Base URI of schemas without an `$id`. Empty means `json-schema:///`.
    pub default_base_uri: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_ref_depth: DEFAULT_MAX_REF_DEPTH,
            default_base_uri: String::new(),
        }
    }
}

/// Regular expression engine used for `pattern` and `patternProperties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOptions {
    /// Backtracking engine with look-around and back-references.
    FancyRegex { backtrack_limit: Option<usize> },
    /// Linear-time engine without look-around.
    Regex {
        size_limit: Option<usize>,
        dfa_size_limit: Option<usize>,
    },
}

impl PatternOptions {
    #[must_use]
    pub fn fancy_regex() -> Self {
        PatternOptions::FancyRegex {
            backtrack_limit: None,
        }
    }

    #[must_use]
    pub fn regex() -> Self {
        PatternOptions::Regex {
            size_limit: None,
            dfa_size_limit: None,
        }
    }

    /// Limit backtracking steps. Only affects the `fancy-regex` engine; exceeding the limit
    /// counts as "no match".
    #[must_use]
    pub fn backtrack_limit(self, limit: usize) -> Self {
        match self {
            PatternOptions::FancyRegex { .. } => PatternOptions::FancyRegex {
                backtrack_limit: Some(limit),
            },
            other @ PatternOptions::Regex { .. } => other,
        }
    }

    /// Limit the compiled program size. Only affects the `regex` engine.
    #[must_use]
    pub fn size_limit(self, limit: usize) -> Self {
        match self {
            PatternOptions::Regex { dfa_size_limit, .. } => PatternOptions::Regex {
                size_limit: Some(limit),
                dfa_size_limit,
            },
            other @ PatternOptions::FancyRegex { .. } => other,
        }
    }

    /// Limit the lazy DFA cache size. Only affects the `regex` engine.
    #[must_use]
    pub fn dfa_size_limit(self, limit: usize) -> Self {
        match self {
            PatternOptions::Regex { size_limit, .. } => PatternOptions::Regex {
                size_limit,
                dfa_size_limit: Some(limit),
            },
            other @ PatternOptions::FancyRegex { .. } => other,
        }
    }
}

impl Default for PatternOptions {
    fn default() -> Self {
        PatternOptions::fancy_regex()
    }
}

/// Configuration for building a [`Validator`].
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    max_ref_depth: usize,
    base_uri: String,
    validate_schema: bool,
    pattern_options: PatternOptions,
    resources: Vec<(String, Value)>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            max_ref_depth: DEFAULT_MAX_REF_DEPTH,
            base_uri: String::new(),
            validate_schema: true,
            pattern_options: PatternOptions::default(),
            resources: Vec::new(),
        }
    }
}

impl ValidationOptions {
    /// Bound on consecutive references followed on the same instance. Zero is treated as one.
    #[must_use]
    pub fn with_max_ref_depth(mut self, depth: usize) -> Self {
        self.max_ref_depth = depth.max(1);
        self
    }

    /// Base URI of the root schema when it has no `$id`.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Whether to validate the schema against its meta-schema before compiling it.
    #[must_use]
    pub fn should_validate_schema(mut self, yes: bool) -> Self {
        self.validate_schema = yes;
        self
    }

    #[must_use]
    pub fn with_pattern_options(mut self, options: PatternOptions) -> Self {
        self.pattern_options = options;
        self
    }

    /// Make a schema document available to references under the given URI.
    ///
    /// ```rust
    /// use serde_json::json;
    ///
    /// let validator = verdict::options()
    ///     .with_resource("http://example.com/positive.json", json!({"minimum": 0}))
    ///     .build(&json!({"$ref": "http://example.com/positive.json"}))?;
    /// assert!(validator.is_valid(&json!(5)));
    /// assert!(!validator.is_valid(&json!(-5)));
    /// # Ok::<(), verdict::SchemaError>(())
    /// ```
    #[must_use]
    pub fn with_resource(mut self, uri: impl Into<String>, contents: Value) -> Self {
        self.resources.push((uri.into(), contents));
        self
    }

    #[must_use]
    pub fn with_config(self, config: Config) -> Self {
        self.with_max_ref_depth(config.max_ref_depth)
            .with_base_uri(config.default_base_uri)
    }

    /// Build a validator.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is rejected by its meta-schema, contains unresolvable
    /// references or malformed keywords.
    pub fn build(&self, schema: &Value) -> Result<Validator, SchemaError> {
        if self.validate_schema {
            meta::validate_with(schema, self)?;
        }
        compiler::build(self, schema)
    }

    pub(crate) fn max_ref_depth(&self) -> usize {
        self.max_ref_depth
    }

    pub(crate) fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub(crate) fn pattern_options(&self) -> PatternOptions {
        self.pattern_options
    }

    pub(crate) fn resources(&self) -> &[(String, Value)] {
        &self.resources
    }

    /// Options for validating a schema against a meta-schema among this configuration's
    /// resources.
    pub(crate) fn for_meta_schema(&self) -> ValidationOptions {
        ValidationOptions {
            validate_schema: false,
            base_uri: String::new(),
            max_ref_depth: DEFAULT_MAX_REF_DEPTH,
            ..self.clone()
        }
    }

    pub(crate) fn has_resource(&self, uri: &str) -> bool {
        let uri = uri.strip_suffix('#').unwrap_or(uri);
        self.resources.iter().any(|(known, _)| known == uri)
    }
}
