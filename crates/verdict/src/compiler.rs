use std::sync::Arc;

use ahash::AHashMap;
use serde_json::Value;
use verdict_referencing::{Index, Resolved, Resolver, Url, Vocabulary, VocabularySet};

use crate::{
    keywords,
    node::{NodeId, ResourceId, SchemaNode},
    options::ValidationOptions,
    paths::{Location, LocationSegment},
    regex::CompiledPattern,
    validator::{DynamicAnchors, Validator},
    SchemaError,
};

const UNEVALUATED: [&str; 2] = ["unevaluatedItems", "unevaluatedProperties"];

/// Where in the schema the compiler currently is.
#[derive(Debug, Clone)]
pub(crate) struct Context<'a> {
    resolver: Resolver<'a>,
    vocabularies: VocabularySet,
    location: Location,
}

impl<'a> Context<'a> {
    fn new(resolver: Resolver<'a>, vocabularies: VocabularySet, location: Location) -> Self {
        Context {
            resolver,
            vocabularies,
            location,
        }
    }

    fn from_resolved(resolved: &Resolved<'a>, location: Location) -> Self {
        Context::new(resolved.resolver().clone(), resolved.vocabularies(), location)
    }

    pub(crate) fn location(&self) -> &Location {
        &self.location
    }

    pub(crate) fn base_uri(&self) -> &Arc<Url> {
        self.resolver.base_uri()
    }

    pub(crate) fn has_vocabulary(&self, vocabulary: Vocabulary) -> bool {
        self.vocabularies.contains(vocabulary)
    }

    #[must_use]
    pub(crate) fn new_at_location<'s>(&self, segment: impl Into<LocationSegment<'s>>) -> Self {
        Context {
            location: self.location.join(segment),
            ..self.clone()
        }
    }

    /// Enter a subschema: its `$id` rebases references and its `$schema` picks vocabularies.
    fn in_subresource(&self, schema: &Value) -> Result<Self, SchemaError> {
        let resolver = self.resolver.in_subresource(schema)?;
        let vocabularies = match schema.get("$schema") {
            Some(Value::String(meta_schema)) => resolver.vocabularies_of(meta_schema),
            _ => self.vocabularies,
        };
        Ok(Context {
            resolver,
            vocabularies,
            location: self.location.clone(),
        })
    }
}

/// Turns schema documents into an arena of [`SchemaNode`]s.
///
/// Every subschema is compiled once, keyed by its address, so recursive references become
/// back-edges in the arena.
pub(crate) struct Compiler<'a> {
    index: &'a Index<'a>,
    options: &'a ValidationOptions,
    nodes: Vec<SchemaNode>,
    seen: AHashMap<*const Value, NodeId>,
    resources: AHashMap<Arc<Url>, ResourceId>,
    /// Resources whose dynamic anchors are not compiled yet.
    pending: Vec<(ResourceId, Arc<Url>)>,
    dynamic_anchors: DynamicAnchors,
    patterns: AHashMap<String, Arc<CompiledPattern>>,
}

impl<'a> Compiler<'a> {
    fn new(index: &'a Index<'a>, options: &'a ValidationOptions) -> Self {
        Compiler {
            index,
            options,
            nodes: Vec::new(),
            seen: AHashMap::new(),
            resources: AHashMap::new(),
            pending: Vec::new(),
            dynamic_anchors: DynamicAnchors::new(),
            patterns: AHashMap::new(),
        }
    }

    fn resource_id(&mut self, base: &Arc<Url>) -> ResourceId {
        if let Some(id) = self.resources.get(base) {
            return *id;
        }
        let id = ResourceId::new(self.resources.len());
        self.resources.insert(Arc::clone(base), id);
        self.pending.push((id, Arc::clone(base)));
        id
    }

    /// Compile `schema`, reusing the node if it was compiled before.
    fn compile(&mut self, ctx: &Context<'a>, schema: &'a Value) -> Result<NodeId, SchemaError> {
        let key = std::ptr::from_ref(schema);
        if let Some(id) = self.seen.get(&key) {
            return Ok(*id);
        }
        let resource = self.resource_id(ctx.base_uri());
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(SchemaNode::placeholder(resource));
        self.seen.insert(key, id);
        let node = self.compile_node(ctx, schema, resource)?;
        self.nodes[id.index()] = node;
        Ok(id)
    }

    fn compile_node(
        &mut self,
        ctx: &Context<'a>,
        schema: &'a Value,
        resource: ResourceId,
    ) -> Result<SchemaNode, SchemaError> {
        match schema {
            Value::Bool(value) => Ok(SchemaNode::boolean(
                *value,
                ctx.location().clone(),
                resource,
            )),
            Value::Object(object) => {
                let mut validators = Vec::with_capacity(object.len());
                for (keyword, value) in object {
                    if UNEVALUATED.contains(&keyword.as_str()) {
                        continue;
                    }
                    if let Some(validator) = keywords::compile(self, ctx, object, keyword, value) {
                        validators.push(validator?);
                    }
                }
                // `unevaluated*` keywords run last so that adjacent keywords report first.
                let mut collects_annotations = false;
                for keyword in UNEVALUATED {
                    let Some((keyword, value)) = object.get_key_value(keyword) else {
                        continue;
                    };
                    if let Some(validator) = keywords::compile(self, ctx, object, keyword, value) {
                        validators.push(validator?);
                        collects_annotations = true;
                    }
                }
                Ok(SchemaNode::keywords(
                    validators,
                    collects_annotations,
                    ctx.location().clone(),
                    resource,
                ))
            }
            _ => Err(SchemaError::invalid_keyword(
                ctx.location().clone(),
                "an object or a boolean",
            )),
        }
    }

    /// Compile a subschema located under `segment` of the current keyword.
    pub(crate) fn compile_subschema<'s>(
        &mut self,
        ctx: &Context<'a>,
        segment: impl Into<LocationSegment<'s>>,
        schema: &'a Value,
    ) -> Result<NodeId, SchemaError> {
        let ctx = ctx.new_at_location(segment).in_subresource(schema)?;
        self.compile(&ctx, schema)
    }

    /// Compile the target of a reference. Also returns the anchor name when the target was
    /// found through a `$dynamicAnchor`.
    pub(crate) fn compile_reference(
        &mut self,
        ctx: &Context<'a>,
        reference: &str,
    ) -> Result<(NodeId, Option<Box<str>>), SchemaError> {
        let resolved = ctx.resolver.lookup(reference)?;
        let target = Context::from_resolved(&resolved, ctx.location().clone());
        let node = self.compile(&target, resolved.contents())?;
        Ok((node, resolved.dynamic_anchor().map(Box::from)))
    }

    /// A compiled regular expression, shared between all keywords using the same pattern.
    pub(crate) fn pattern(&mut self, pattern: &str) -> Arc<CompiledPattern> {
        if let Some(compiled) = self.patterns.get(pattern) {
            return Arc::clone(compiled);
        }
        let compiled = Arc::new(CompiledPattern::new(pattern, self.options.pattern_options()));
        self.patterns
            .insert(pattern.to_string(), Arc::clone(&compiled));
        compiled
    }

    /// Compile the `$dynamicAnchor` subschemas of every resource a validation may enter.
    fn compile_dynamic_anchors(&mut self) -> Result<(), SchemaError> {
        let index = self.index;
        while let Some((resource, base)) = self.pending.pop() {
            for (name, target) in index.dynamic_anchors(&base) {
                let ctx = Context::new(
                    index.resolver(Arc::clone(target.base())),
                    index.vocabularies_in(target),
                    Location::new(),
                );
                let node = self.compile(&ctx, target.contents())?;
                self.dynamic_anchors
                    .entry(resource)
                    .or_default()
                    .insert(name.into(), node);
            }
        }
        Ok(())
    }

    fn finish(self, root: NodeId) -> Validator {
        Validator::new(
            self.nodes,
            root,
            self.dynamic_anchors,
            self.options.max_ref_depth(),
        )
    }
}

/// Compile `schema` together with the resources registered in `options`.
pub(crate) fn build(options: &ValidationOptions, schema: &Value) -> Result<Validator, SchemaError> {
    let mut builder = Index::builder();
    for (uri, contents) in options.resources() {
        builder = builder.with_document(uri, contents)?;
    }
    let index = builder.with_document(options.base_uri(), schema)?.build()?;
    let root = index.try_resolver(options.base_uri())?.lookup("")?;
    tracing::trace!(base_uri = %root.resolver().base_uri(), "Compiling schema");
    let mut compiler = Compiler::new(&index, options);
    let ctx = Context::from_resolved(&root, Location::new());
    let root = compiler.compile(&ctx, root.contents())?;
    compiler.compile_dynamic_anchors()?;
    Ok(compiler.finish(root))
}
