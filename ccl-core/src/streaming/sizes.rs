//! Optional per-component pixel counts for streaming sessions.

use std::collections::HashMap;

use crate::disjoint_set::ElementId;

/// Pixel count per set root, folded together whenever two sets merge.
#[derive(Clone, Debug, Default)]
pub(super) struct ComponentSizes {
    by_root: HashMap<ElementId, usize>,
}

impl ComponentSizes {
    pub(super) fn add_pixel(&mut self, root: ElementId) {
        *self.by_root.entry(root).or_insert(0) += 1;
    }

    pub(super) fn merge(&mut self, root: ElementId, absorbed: ElementId) {
        let moved = self.by_root.remove(&absorbed).unwrap_or(0);
        *self.by_root.entry(root).or_insert(0) += moved;
    }

    pub(super) fn get(&self, root: ElementId) -> Option<usize> {
        self.by_root.get(&root).copied()
    }

    pub(super) fn largest(&self) -> Option<usize> {
        self.by_root.values().copied().max()
    }
}
