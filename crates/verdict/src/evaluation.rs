//! Annotations consumed by `unevaluatedItems` and `unevaluatedProperties`.
use ahash::AHashSet;

/// Array items and object properties of one instance that were successfully evaluated by
/// some adjacent keyword.
#[derive(Debug, Default)]
pub(crate) struct Evaluated {
    all_items: bool,
    items: AHashSet<usize>,
    all_properties: bool,
    properties: AHashSet<String>,
}

impl Evaluated {
    pub(crate) fn mark_items_up_to(&mut self, end: usize) {
        if !self.all_items {
            self.items.extend(0..end);
        }
    }

    pub(crate) fn mark_item(&mut self, idx: usize) {
        if !self.all_items {
            self.items.insert(idx);
        }
    }

    pub(crate) fn mark_all_items(&mut self) {
        self.all_items = true;
        self.items = AHashSet::new();
    }

    pub(crate) fn mark_property(&mut self, name: &str) {
        if !self.all_properties && !self.properties.contains(name) {
            self.properties.insert(name.to_string());
        }
    }

    pub(crate) fn mark_all_properties(&mut self) {
        self.all_properties = true;
        self.properties = AHashSet::new();
    }

    pub(crate) fn is_item_evaluated(&self, idx: usize) -> bool {
        self.all_items || self.items.contains(&idx)
    }

    pub(crate) fn is_property_evaluated(&self, name: &str) -> bool {
        self.all_properties || self.properties.contains(name)
    }

    /// Add everything `other` evaluated.
    pub(crate) fn merge(&mut self, other: Evaluated) {
        if other.all_items {
            self.mark_all_items();
        } else if !self.all_items {
            self.items.extend(other.items);
        }
        if other.all_properties {
            self.mark_all_properties();
        } else if !self.all_properties {
            self.properties.extend(other.properties);
        }
    }
}
