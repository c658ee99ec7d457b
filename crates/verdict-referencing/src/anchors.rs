use crate::Resource;

/// Kind of a named location inside a schema resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// Declared with `$anchor`.
    Default,
    /// Declared with `$dynamicAnchor`. It is also reachable as a plain anchor.
    Dynamic,
}

/// A named location inside a schema resource.
#[derive(Debug, Clone)]
pub struct Anchor<'doc> {
    kind: AnchorKind,
    resource: Resource<'doc>,
}

impl<'doc> Anchor<'doc> {
    pub(crate) fn new(kind: AnchorKind, resource: Resource<'doc>) -> Self {
        Anchor { kind, resource }
    }
    #[must_use]
    pub fn kind(&self) -> AnchorKind {
        self.kind
    }
    #[must_use]
    pub fn resource(&self) -> &Resource<'doc> {
        &self.resource
    }
}

/// Anchor names must be plain names: `^[A-Za-z_][-A-Za-z0-9._]*$`.
pub(crate) fn is_valid_anchor_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
}

#[cfg(test)]
mod tests {
    use super::is_valid_anchor_name;
    use test_case::test_case;

    #[test_case("foo", true)]
    #[test_case("_foo-bar.1", true)]
    #[test_case("A", true)]
    #[test_case("#foo", false)]
    #[test_case("1foo", false)]
    #[test_case("foo/bar", false)]
    #[test_case("", false)]
    #[test_case("-foo", false)]
    fn anchor_names(name: &str, expected: bool) {
        assert_eq!(is_valid_anchor_name(name), expected);
    }
}
