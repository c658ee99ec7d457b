use core::fmt;
use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::{pointer, uri, AnchorKind, DocumentId, Error, Index, VocabularySet};

/// A reference resolver.
///
/// Resolves references against the base URI and looks up the targets in an [`Index`].
#[derive(Clone)]
pub struct Resolver<'r> {
    index: &'r Index<'r>,
    base_uri: Arc<Url>,
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("base_uri", &self.base_uri.as_str())
            .finish()
    }
}

impl<'r> Resolver<'r> {
    pub(crate) fn new(index: &'r Index<'r>, base_uri: Arc<Url>) -> Self {
        Self { index, base_uri }
    }

    #[must_use]
    pub fn base_uri(&self) -> &Arc<Url> {
        &self.base_uri
    }

    /// Resolve a reference to the subschema it points to.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is not a valid URI reference, or its target does not
    /// exist.
    pub fn lookup(&self, reference: &str) -> Result<Resolved<'r>, Error> {
        let (uri, fragment) =
            uri::split_fragment(uri::resolve_against(&self.base_uri, reference)?);
        let resource = self
            .index
            .resource(&uri)
            .ok_or_else(|| Error::unresolvable(uri.as_str()))?;
        match fragment {
            None => Ok(Resolved {
                contents: resource.contents(),
                resolver: self.with_base(resource.base().clone()),
                document: resource.document(),
                dynamic_anchor: None,
            }),
            Some(fragment) if fragment.starts_with('/') => {
                let (contents, base) =
                    pointer::walk(resource.contents(), &fragment, resource.base().clone())?;
                Ok(Resolved {
                    contents,
                    resolver: self.with_base(base),
                    document: resource.document(),
                    dynamic_anchor: None,
                })
            }
            Some(name) => {
                let anchor = self
                    .index
                    .anchor(&uri, &name)
                    .ok_or_else(|| Error::no_such_anchor(name.as_str()))?;
                let resource = anchor.resource();
                Ok(Resolved {
                    contents: resource.contents(),
                    resolver: self.with_base(resource.base().clone()),
                    document: resource.document(),
                    dynamic_anchor: (anchor.kind() == AnchorKind::Dynamic).then_some(name),
                })
            }
        }
    }

    /// Create a resolver for a subschema, taking its `$id` into account.
    ///
    /// # Errors
    ///
    /// Returns an error if the subschema's `$id` can not be resolved against the current base.
    pub fn in_subresource(&self, contents: &Value) -> Result<Self, Error> {
        match contents.get("$id") {
            Some(Value::String(id)) => {
                let base = uri::without_fragment(uri::resolve_against(&self.base_uri, id)?);
                Ok(self.with_base(Arc::new(base)))
            }
            _ => Ok(self.clone()),
        }
    }

    /// Vocabularies declared by a meta-schema referenced from the current base.
    #[must_use]
    pub fn vocabularies_of(&self, meta_schema: &str) -> VocabularySet {
        self.index.vocabularies_of(&self.base_uri, meta_schema)
    }

    fn with_base(&self, base_uri: Arc<Url>) -> Self {
        Resolver {
            index: self.index,
            base_uri,
        }
    }
}

/// A reference target together with the resolver for its base URI.
#[derive(Debug)]
pub struct Resolved<'r> {
    contents: &'r Value,
    resolver: Resolver<'r>,
    document: DocumentId,
    dynamic_anchor: Option<String>,
}

impl<'r> Resolved<'r> {
    #[must_use]
    pub fn contents(&self) -> &'r Value {
        self.contents
    }
    #[must_use]
    pub fn resolver(&self) -> &Resolver<'r> {
        &self.resolver
    }
    /// Vocabularies in effect at the target: its own `$schema`, else the one of the resource
    /// holding it.
    #[must_use]
    pub fn vocabularies(&self) -> VocabularySet {
        if let Some(Value::String(meta_schema)) = self.contents.get("$schema") {
            return self.resolver.vocabularies_of(meta_schema);
        }
        let index = self.resolver.index;
        match index.resource(&self.resolver.base_uri) {
            Some(resource) => index.vocabularies_in(resource),
            None => index.vocabularies(self.document),
        }
    }
    /// The anchor name, when the reference was resolved through a `$dynamicAnchor`.
    #[must_use]
    pub fn dynamic_anchor(&self) -> Option<&str> {
        self.dynamic_anchor.as_deref()
    }
}
