use core::fmt;

use ahash::AHashMap;
use serde_json::Value;

use crate::{
    evaluation::Evaluated,
    node::{NodeId, ResourceId, SchemaNode},
};

/// How deep into an instance validation descends before giving up on it.
pub(crate) const MAX_INSTANCE_DEPTH: usize = 256;

/// `$dynamicAnchor` targets declared by each resource.
pub(crate) type DynamicAnchors = AHashMap<ResourceId, AHashMap<Box<str>, NodeId>>;

/// A single compiled keyword.
pub(crate) trait Validate: Send + Sync {
    fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool;

    /// Same as `is_valid`, additionally recording the items and properties of `instance` this
    /// keyword evaluated. Only keywords that produce such annotations override it.
    fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        _evaluated: &mut Evaluated,
    ) -> bool {
        self.is_valid(instance, ctx)
    }
}

/// Per-call state of a validation run.
pub(crate) struct ValidationContext<'v> {
    nodes: &'v [SchemaNode],
    dynamic_anchors: &'v DynamicAnchors,
    /// Resources entered so far, outermost first.
    scope: Vec<ResourceId>,
    /// References followed since the instance location last changed.
    ref_depth: usize,
    max_ref_depth: usize,
    /// Nesting level of the instance location being validated.
    depth: usize,
    /// Set once the instance turned out to be nested deeper than `MAX_INSTANCE_DEPTH`.
    too_deep: bool,
}

impl<'v> ValidationContext<'v> {
    fn new(validator: &'v Validator) -> Self {
        ValidationContext {
            nodes: &validator.nodes,
            dynamic_anchors: &validator.dynamic_anchors,
            scope: Vec::new(),
            ref_depth: 0,
            max_ref_depth: validator.max_ref_depth,
            depth: 0,
            too_deep: false,
        }
    }

    fn enter(&mut self, resource: ResourceId) -> bool {
        if self.scope.last() == Some(&resource) {
            false
        } else {
            self.scope.push(resource);
            true
        }
    }

    fn leave(&mut self, entered: bool) {
        if entered {
            self.scope.pop();
        }
    }

    /// Validate `instance` against a node at the same instance location.
    pub(crate) fn is_valid(&mut self, id: NodeId, instance: &Value) -> bool {
        let nodes = self.nodes;
        let node = &nodes[id.index()];
        let entered = self.enter(node.resource());
        let valid = node.is_valid(instance, self);
        self.leave(entered);
        valid
    }

    /// Validate `instance` against a node, merging its annotations into `evaluated` on success.
    pub(crate) fn evaluate(
        &mut self,
        id: NodeId,
        instance: &Value,
        evaluated: &mut Evaluated,
    ) -> bool {
        let nodes = self.nodes;
        let node = &nodes[id.index()];
        let entered = self.enter(node.resource());
        let valid = node.evaluate(instance, self, evaluated);
        self.leave(entered);
        valid
    }

    /// Validate a child of the current instance (an item, a property value or a property name).
    ///
    /// Past `MAX_INSTANCE_DEPTH` the whole instance is rejected, whatever negations surround
    /// the failing child.
    pub(crate) fn is_valid_child(&mut self, id: NodeId, instance: &Value) -> bool {
        if self.too_deep {
            return false;
        }
        if self.depth >= MAX_INSTANCE_DEPTH {
            tracing::debug!(max_depth = MAX_INSTANCE_DEPTH, "Instance nested too deeply");
            self.too_deep = true;
            return false;
        }
        let ref_depth = core::mem::take(&mut self.ref_depth);
        self.depth += 1;
        let valid = self.is_valid(id, instance);
        self.depth -= 1;
        self.ref_depth = ref_depth;
        valid
    }

    /// Follow a `$ref` or `$dynamicRef` to `id`.
    ///
    /// Fails once too many references were followed without consuming any of the instance.
    pub(crate) fn follow_reference(
        &mut self,
        id: NodeId,
        instance: &Value,
        evaluated: Option<&mut Evaluated>,
    ) -> bool {
        if self.ref_depth >= self.max_ref_depth {
            tracing::debug!(
                target = %self.nodes[id.index()].location(),
                max_ref_depth = self.max_ref_depth,
                "Reference depth exceeded"
            );
            return false;
        }
        self.ref_depth += 1;
        let valid = match evaluated {
            Some(evaluated) => self.evaluate(id, instance, evaluated),
            None => self.is_valid(id, instance),
        };
        self.ref_depth -= 1;
        valid
    }

    /// The outermost resource in the dynamic scope that declares `$dynamicAnchor: name`.
    pub(crate) fn resolve_dynamic_anchor(&self, name: &str) -> Option<NodeId> {
        self.scope.iter().find_map(|resource| {
            self.dynamic_anchors
                .get(resource)
                .and_then(|anchors| anchors.get(name))
                .copied()
        })
    }
}

/// A compiled schema.
///
/// Immutable after construction, so it can be shared between threads and used for any number
/// of validations.
///
/// ```rust
/// use serde_json::json;
///
/// let validator = verdict::validator_for(&json!({"type": "string", "minLength": 2}))?;
/// assert!(validator.is_valid(&json!("ab")));
/// assert!(!validator.is_valid(&json!("a")));
/// # Ok::<(), verdict::SchemaError>(())
/// ```
pub struct Validator {
    nodes: Box<[SchemaNode]>,
    root: NodeId,
    dynamic_anchors: DynamicAnchors,
    max_ref_depth: usize,
}

impl Validator {
    pub(crate) fn new(
        nodes: Vec<SchemaNode>,
        root: NodeId,
        dynamic_anchors: DynamicAnchors,
        max_ref_depth: usize,
    ) -> Validator {
        Validator {
            nodes: nodes.into_boxed_slice(),
            root,
            dynamic_anchors,
            max_ref_depth,
        }
    }

    /// Whether `instance` is valid against the schema.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        let mut ctx = ValidationContext::new(self);
        let valid = ctx.is_valid(self.root, instance);
        valid && !ctx.too_deep
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("nodes", &self.nodes.len())
            .field("max_ref_depth", &self.max_ref_depth)
            .finish_non_exhaustive()
    }
}
