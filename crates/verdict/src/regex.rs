use core::fmt;
use std::borrow::Cow;

use crate::options::PatternOptions;

pub(crate) trait RegexEngine: Sized + Send + Sync {
    type Error: fmt::Display;
    fn is_match(&self, text: &str) -> Result<bool, Self::Error>;

    fn pattern(&self) -> &str;
}

impl RegexEngine for fancy_regex::Regex {
    type Error = fancy_regex::Error;

    fn is_match(&self, text: &str) -> Result<bool, Self::Error> {
        fancy_regex::Regex::is_match(self, text)
    }

    fn pattern(&self) -> &str {
        self.as_str()
    }
}

impl RegexEngine for regex::Regex {
    type Error = core::convert::Infallible;

    fn is_match(&self, text: &str) -> Result<bool, Self::Error> {
        Ok(regex::Regex::is_match(self, text))
    }

    fn pattern(&self) -> &str {
        self.as_str()
    }
}

/// Matches `^literal` with `starts_with` and `^literal$` with `==`.
#[derive(Debug)]
pub(crate) enum LiteralMatcher {
    Prefix { literal: String, original: String },
    Exact { exact: String, original: String },
}

impl RegexEngine for LiteralMatcher {
    type Error = core::convert::Infallible;

    #[inline]
    fn is_match(&self, text: &str) -> Result<bool, Self::Error> {
        match self {
            Self::Prefix { literal, .. } => Ok(text.starts_with(literal.as_str())),
            Self::Exact { exact, .. } => Ok(text == exact.as_str()),
        }
    }

    fn pattern(&self) -> &str {
        match self {
            Self::Prefix { original, .. } | Self::Exact { original, .. } => original.as_str(),
        }
    }
}

/// Result of analyzing a pattern for literal-match shortcuts.
#[derive(Debug, PartialEq)]
pub(crate) enum PatternOptimization {
    /// `^prefix`
    Prefix(String),
    /// `^exact$`
    Exact(String),
}

/// Detect patterns that are an anchored literal, optionally closed by `$`.
///
/// The literal body may contain ASCII alphanumerics, `-`, `_`, `/` and the escapes `\/`, `\-`,
/// `\_`, `\$`, `\.`.
pub(crate) fn analyze_pattern(pattern: &str) -> Option<PatternOptimization> {
    let body = pattern.strip_prefix('^')?;
    let mut literal = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next()? {
                escaped @ ('/' | '-' | '_' | '$' | '.') => literal.push(escaped),
                _ => return None,
            },
            '$' if chars.peek().is_none() => return Some(PatternOptimization::Exact(literal)),
            ch if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '/') => literal.push(ch),
            _ => return None,
        }
    }
    Some(PatternOptimization::Prefix(literal))
}

/// Rewrite ECMA-262 constructs whose meaning differs in Rust regex syntax.
///
/// `\d` and `\w` are ASCII-only in ECMA-262, and `\/` is a plain slash.
pub(crate) fn to_rust_syntax(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains('\\') {
        return Cow::Borrowed(pattern);
    }
    let mut translated = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars();
    let mut in_class = false;
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('d') if in_class => translated.push_str("0-9"),
                Some('d') => translated.push_str("[0-9]"),
                Some('D') if !in_class => translated.push_str("[^0-9]"),
                Some('w') if in_class => translated.push_str("a-zA-Z0-9_"),
                Some('w') => translated.push_str("[a-zA-Z0-9_]"),
                Some('W') if !in_class => translated.push_str("[^a-zA-Z0-9_]"),
                Some('/') => translated.push('/'),
                Some(other) => {
                    translated.push('\\');
                    translated.push(other);
                }
                None => translated.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                translated.push(ch);
            }
            ']' if in_class => {
                in_class = false;
                translated.push(ch);
            }
            _ => translated.push(ch),
        }
    }
    Cow::Owned(translated)
}

/// A `pattern` / `patternProperties` regular expression ready for matching.
#[derive(Debug)]
pub(crate) enum CompiledPattern {
    Literal(LiteralMatcher),
    Backtracking(fancy_regex::Regex),
    Linear(regex::Regex),
    /// The pattern is not a valid regular expression. Nothing can be decided about it.
    Invalid(String),
}

impl CompiledPattern {
    pub(crate) fn new(pattern: &str, options: PatternOptions) -> CompiledPattern {
        match analyze_pattern(pattern) {
            Some(PatternOptimization::Exact(exact)) => {
                return CompiledPattern::Literal(LiteralMatcher::Exact {
                    exact,
                    original: pattern.to_string(),
                })
            }
            Some(PatternOptimization::Prefix(literal)) => {
                return CompiledPattern::Literal(LiteralMatcher::Prefix {
                    literal,
                    original: pattern.to_string(),
                })
            }
            None => {}
        }
        let translated = to_rust_syntax(pattern);
        let compiled = match options {
            PatternOptions::FancyRegex { backtrack_limit } => {
                let mut builder = fancy_regex::RegexBuilder::new(&translated);
                if let Some(limit) = backtrack_limit {
                    builder.backtrack_limit(limit);
                }
                builder
                    .build()
                    .map(CompiledPattern::Backtracking)
                    .map_err(|error| error.to_string())
            }
            PatternOptions::Regex {
                size_limit,
                dfa_size_limit,
            } => {
                let mut builder = regex::RegexBuilder::new(&translated);
                if let Some(limit) = size_limit {
                    builder.size_limit(limit);
                }
                if let Some(limit) = dfa_size_limit {
                    builder.dfa_size_limit(limit);
                }
                builder
                    .build()
                    .map(CompiledPattern::Linear)
                    .map_err(|error| error.to_string())
            }
        };
        compiled.unwrap_or_else(|error| {
            tracing::debug!(pattern, %error, "Invalid regular expression");
            CompiledPattern::Invalid(pattern.to_string())
        })
    }
}

/// Why a pattern could not be matched against a string.
#[derive(Debug)]
pub(crate) enum MatchError {
    InvalidPattern,
    Engine(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::InvalidPattern => f.write_str("Invalid regular expression"),
            MatchError::Engine(error) => f.write_str(error),
        }
    }
}

impl RegexEngine for CompiledPattern {
    type Error = MatchError;

    fn is_match(&self, text: &str) -> Result<bool, Self::Error> {
        match self {
            CompiledPattern::Literal(matcher) => Ok(matches!(matcher.is_match(text), Ok(true))),
            CompiledPattern::Backtracking(regex) => {
                RegexEngine::is_match(regex, text)
                    .map_err(|error| MatchError::Engine(error.to_string()))
            }
            CompiledPattern::Linear(regex) => Ok(matches!(RegexEngine::is_match(regex, text), Ok(true))),
            CompiledPattern::Invalid(_) => Err(MatchError::InvalidPattern),
        }
    }

    fn pattern(&self) -> &str {
        match self {
            CompiledPattern::Literal(matcher) => matcher.pattern(),
            CompiledPattern::Backtracking(regex) => regex.pattern(),
            CompiledPattern::Linear(regex) => regex.pattern(),
            CompiledPattern::Invalid(pattern) => pattern,
        }
    }
}
