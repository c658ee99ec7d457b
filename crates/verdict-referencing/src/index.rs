use std::{collections::VecDeque, sync::Arc};

use ahash::AHashMap;
use serde_json::Value;
use url::Url;

use crate::{
    anchors::{is_valid_anchor_name, Anchor, AnchorKind},
    meta, specification, uri, Error, Resolver, VocabularySet,
};

/// Identifier of a document registered in an [`Index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(usize);

/// A schema resource: a subschema together with its effective base URI.
#[derive(Debug, Clone)]
pub struct Resource<'doc> {
    contents: &'doc Value,
    base: Arc<Url>,
    document: DocumentId,
    meta_schema: Option<&'doc str>,
}

impl<'doc> Resource<'doc> {
    #[must_use]
    pub fn contents(&self) -> &'doc Value {
        self.contents
    }
    /// Base URI in effect inside this resource, its own `$id` included.
    #[must_use]
    pub fn base(&self) -> &Arc<Url> {
        &self.base
    }
    #[must_use]
    pub fn document(&self) -> DocumentId {
        self.document
    }
    /// The `$schema` in effect: the resource's own, or the nearest one above it in the
    /// document.
    #[must_use]
    pub fn meta_schema(&self) -> Option<&'doc str> {
        self.meta_schema
    }
}

#[derive(Debug)]
struct Document {
    vocabularies: VocabularySet,
}

/// Immutable lookup tables for a set of schema documents.
///
/// Maps every absolute, fragment-less URI to its schema resource and every
/// `(base URI, name)` pair to the subschema carrying that `$anchor` / `$dynamicAnchor`.
#[derive(Debug)]
pub struct Index<'doc> {
    documents: Vec<Document>,
    resources: AHashMap<Arc<Url>, Resource<'doc>>,
    anchors: AHashMap<Arc<Url>, AHashMap<Box<str>, Anchor<'doc>>>,
}

/// Collects documents for an [`Index`].
///
/// The bundled meta-schemas are always registered first, so user documents registered under
/// the same URI take precedence.
#[derive(Debug, Clone)]
pub struct IndexBuilder<'doc> {
    documents: Vec<(Url, &'doc Value)>,
}

impl Default for IndexBuilder<'_> {
    fn default() -> Self {
        IndexBuilder::new()
    }
}

impl<'doc> IndexBuilder<'doc> {
    #[must_use]
    pub fn new() -> Self {
        let mut documents = Vec::with_capacity(meta::META_SCHEMAS.len() + 1);
        for (uri, contents) in meta::META_SCHEMAS.iter() {
            if let Ok(uri) = Url::parse(uri) {
                documents.push((uri, *contents));
            }
        }
        IndexBuilder { documents }
    }

    /// Register a document under the given URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is invalid.
    pub fn with_document(mut self, uri: &str, contents: &'doc Value) -> Result<Self, Error> {
        let uri = uri::without_fragment(uri::from_str(uri)?);
        self.documents.push((uri, contents));
        Ok(self)
    }

    /// Index all registered documents.
    ///
    /// # Errors
    ///
    /// Returns an error if a document carries an invalid `$id` or anchor.
    pub fn build(self) -> Result<Index<'doc>, Error> {
        let mut index = Index {
            documents: Vec::with_capacity(self.documents.len()),
            resources: AHashMap::new(),
            anchors: AHashMap::new(),
        };
        for (uri, contents) in &self.documents {
            let document = DocumentId(index.documents.len());
            index.documents.push(Document {
                vocabularies: VocabularySet::default(),
            });
            index.collect(Arc::new(uri.clone()), contents, document)?;
        }
        // Vocabularies depend on meta-schemas that may be registered after the document itself.
        for (idx, (uri, contents)) in self.documents.iter().enumerate() {
            if let Some(Value::String(meta_schema)) = contents.get("$schema") {
                index.documents[idx].vocabularies = index.vocabularies_of(uri, meta_schema);
            }
        }
        Ok(index)
    }
}

impl<'doc> Index<'doc> {
    /// Index a single root document together with the bundled meta-schemas.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is invalid, or the document carries an invalid `$id` or
    /// anchor.
    pub fn build(root: &'doc Value, root_uri: &str) -> Result<Index<'doc>, Error> {
        IndexBuilder::new().with_document(root_uri, root)?.build()
    }

    #[must_use]
    pub fn builder() -> IndexBuilder<'doc> {
        IndexBuilder::new()
    }

    fn collect(
        &mut self,
        document_uri: Arc<Url>,
        contents: &'doc Value,
        document: DocumentId,
    ) -> Result<(), Error> {
        let mut queue = VecDeque::from([(document_uri.clone(), contents, true, None)]);
        while let Some((parent_base, contents, is_top_level, meta_schema)) = queue.pop_front() {
            let meta_schema = match contents.get("$schema") {
                Some(Value::String(declared)) => Some(declared.as_str()),
                _ => meta_schema,
            };
            let base = match contents.get("$id") {
                Some(Value::String(id)) => {
                    if id.split_once('#').is_some_and(|(_, fragment)| !fragment.is_empty()) {
                        return Err(Error::invalid_id(id.as_str()));
                    }
                    Arc::new(uri::without_fragment(uri::resolve_against(
                        &parent_base,
                        id,
                    )?))
                }
                _ => parent_base.clone(),
            };
            let resource = Resource {
                contents,
                base: base.clone(),
                document,
                meta_schema,
            };
            if is_top_level {
                self.resources
                    .insert(document_uri.clone(), resource.clone());
                self.resources.insert(base.clone(), resource.clone());
            } else if base != parent_base {
                self.resources
                    .entry(base.clone())
                    .or_insert_with(|| resource.clone());
            }
            self.collect_anchors(&base, &resource)?;
            if is_top_level && base != document_uri {
                // Anchors of a root document stay reachable under the document's own URI.
                self.collect_anchors(&document_uri, &resource)?;
            }
            for subresource in specification::subresources_of(contents) {
                queue.push_back((base.clone(), subresource, false, meta_schema));
            }
        }
        Ok(())
    }

    fn collect_anchors(&mut self, base: &Arc<Url>, resource: &Resource<'doc>) -> Result<(), Error> {
        for (keyword, kind) in [
            ("$anchor", AnchorKind::Default),
            ("$dynamicAnchor", AnchorKind::Dynamic),
        ] {
            if let Some(Value::String(name)) = resource.contents.get(keyword) {
                if !is_valid_anchor_name(name) {
                    return Err(Error::invalid_anchor(name.as_str()));
                }
                self.anchors
                    .entry(base.clone())
                    .or_default()
                    .entry(name.as_str().into())
                    .or_insert_with(|| Anchor::new(kind, resource.clone()));
            }
        }
        Ok(())
    }

    /// Vocabularies declared by the meta-schema `meta_schema`, resolved against `base`.
    ///
    /// Unknown meta-schemas and meta-schemas without `$vocabulary` yield the default set.
    #[must_use]
    pub fn vocabularies_of(&self, base: &Url, meta_schema: &str) -> VocabularySet {
        let Ok(meta_uri) = uri::resolve_against(base, meta_schema) else {
            return VocabularySet::default();
        };
        let meta_uri = uri::without_fragment(meta_uri);
        match self
            .resources
            .get(&meta_uri)
            .and_then(|resource| resource.contents.get("$vocabulary"))
        {
            Some(Value::Object(declaration)) => VocabularySet::from_declaration(declaration),
            _ => VocabularySet::default(),
        }
    }

    /// Vocabularies in effect for a registered document.
    #[must_use]
    pub fn vocabularies(&self, document: DocumentId) -> VocabularySet {
        self.documents
            .get(document.0)
            .map_or_else(VocabularySet::default, |document| document.vocabularies)
    }

    /// Vocabularies in effect inside a resource, following its nearest `$schema`.
    #[must_use]
    pub fn vocabularies_in(&self, resource: &Resource<'doc>) -> VocabularySet {
        match resource.meta_schema {
            Some(meta_schema) => self.vocabularies_of(&resource.base, meta_schema),
            None => self.vocabularies(resource.document),
        }
    }

    /// The resource registered under a fragment-less URI.
    #[must_use]
    pub fn resource(&self, uri: &Url) -> Option<&Resource<'doc>> {
        self.resources.get(uri)
    }

    /// The anchor `name` of the resource at `uri`.
    #[must_use]
    pub fn anchor(&self, uri: &Url, name: &str) -> Option<&Anchor<'doc>> {
        self.anchors.get(uri)?.get(name)
    }

    /// All `$dynamicAnchor`s declared by the resource at `uri`.
    pub fn dynamic_anchors(&self, uri: &Url) -> impl Iterator<Item = (&str, &Resource<'doc>)> {
        self.anchors
            .get(uri)
            .into_iter()
            .flat_map(|anchors| anchors.iter())
            .filter(|(_, anchor)| anchor.kind() == AnchorKind::Dynamic)
            .map(|(name, anchor)| (name.as_ref(), anchor.resource()))
    }

    /// Create a resolver with the given base URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URI is invalid.
    pub fn try_resolver(&self, base_uri: &str) -> Result<Resolver<'_>, Error> {
        let base = uri::without_fragment(uri::from_str(base_uri)?);
        Ok(self.resolver(Arc::new(base)))
    }

    /// Create a resolver with a known valid base URI.
    #[must_use]
    pub fn resolver(&self, base_uri: Arc<Url>) -> Resolver<'_> {
        Resolver::new(self, base_uri)
    }
}
