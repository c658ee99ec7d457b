use serde_json::Value;

use crate::{
    evaluation::Evaluated,
    keywords::BoxedValidator,
    paths::Location,
    validator::ValidationContext,
};

/// Index of a compiled schema inside a validator's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(idx: usize) -> Self {
        NodeId(idx)
    }
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Identity of a schema resource, i.e. a distinct base URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ResourceId(usize);

impl ResourceId {
    pub(crate) fn new(idx: usize) -> Self {
        ResourceId(idx)
    }
}

enum NodeValidators {
    Boolean(bool),
    Keyword {
        validators: Box<[BoxedValidator]>,
        /// Adjacent keywords must report what they evaluated.
        collects_annotations: bool,
    },
}

/// A compiled schema: a boolean schema or a list of keyword validators.
pub(crate) struct SchemaNode {
    validators: NodeValidators,
    location: Location,
    resource: ResourceId,
}

impl SchemaNode {
    /// Stand-in for a node that is still being compiled.
    pub(crate) fn placeholder(resource: ResourceId) -> SchemaNode {
        SchemaNode::boolean(false, Location::new(), resource)
    }

    pub(crate) fn boolean(value: bool, location: Location, resource: ResourceId) -> SchemaNode {
        SchemaNode {
            validators: NodeValidators::Boolean(value),
            location,
            resource,
        }
    }

    pub(crate) fn keywords(
        validators: Vec<BoxedValidator>,
        collects_annotations: bool,
        location: Location,
        resource: ResourceId,
    ) -> SchemaNode {
        SchemaNode {
            validators: NodeValidators::Keyword {
                validators: validators.into_boxed_slice(),
                collects_annotations,
            },
            location,
            resource,
        }
    }

    pub(crate) fn location(&self) -> &Location {
        &self.location
    }

    pub(crate) fn resource(&self) -> ResourceId {
        self.resource
    }

    pub(crate) fn is_valid(&self, instance: &Value, ctx: &mut ValidationContext) -> bool {
        match &self.validators {
            NodeValidators::Boolean(value) => *value,
            NodeValidators::Keyword {
                validators,
                collects_annotations: true,
            } => {
                let mut evaluated = Evaluated::default();
                validators
                    .iter()
                    .all(|validator| validator.evaluate(instance, ctx, &mut evaluated))
            }
            NodeValidators::Keyword { validators, .. } => validators
                .iter()
                .all(|validator| validator.is_valid(instance, ctx)),
        }
    }

    /// Validate and, on success, add everything this schema evaluated to `evaluated`.
    pub(crate) fn evaluate(
        &self,
        instance: &Value,
        ctx: &mut ValidationContext,
        evaluated: &mut Evaluated,
    ) -> bool {
        match &self.validators {
            NodeValidators::Boolean(value) => *value,
            NodeValidators::Keyword { validators, .. } => {
                let mut local = Evaluated::default();
                let valid = validators
                    .iter()
                    .all(|validator| validator.evaluate(instance, ctx, &mut local));
                if valid {
                    evaluated.merge(local);
                }
                valid
            }
        }
    }
}
