//! Keyword locations inside a schema.
use core::fmt;
use std::sync::Arc;

/// A JSON Pointer to a keyword, relative to the schema root (e.g. `/properties/foo/type`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location(Arc<str>);

/// A single step of a [`Location`].
#[derive(Debug, Clone, Copy)]
pub(crate) enum LocationSegment<'a> {
    Property(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for LocationSegment<'a> {
    fn from(value: &'a str) -> Self {
        LocationSegment::Property(value)
    }
}

impl<'a> From<&'a String> for LocationSegment<'a> {
    fn from(value: &'a String) -> Self {
        LocationSegment::Property(value.as_str())
    }
}

impl From<usize> for LocationSegment<'_> {
    fn from(value: usize) -> Self {
        LocationSegment::Index(value)
    }
}

impl Location {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn join<'a>(&self, segment: impl Into<LocationSegment<'a>>) -> Self {
        let mut buffer = String::with_capacity(self.0.len() + 8);
        buffer.push_str(&self.0);
        buffer.push('/');
        match segment.into() {
            LocationSegment::Property(property) => {
                for ch in property.chars() {
                    match ch {
                        '~' => buffer.push_str("~0"),
                        '/' => buffer.push_str("~1"),
                        _ => buffer.push(ch),
                    }
                }
            }
            LocationSegment::Index(idx) => buffer.push_str(&idx.to_string()),
        }
        Location(buffer.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
