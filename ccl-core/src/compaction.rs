//! Renumbering of set representatives into the dense range `1..=K`.

use crate::{
    Result,
    disjoint_set::ElementId,
    error::{DisjointSetError, LabelingError},
    image::Dimensions,
};

/// Sorted distinct roots; the root at position `i` becomes final label `i + 1`.
#[derive(Debug)]
pub(crate) struct RootCompaction {
    roots: Vec<ElementId>,
}

impl RootCompaction {
    /// Collects the distinct roots, ordering them ascending so the final
    /// numbering never depends on hashing or insertion order.
    pub(crate) fn from_roots(roots: impl IntoIterator<Item = ElementId>) -> Self {
        let mut roots: Vec<ElementId> = roots.into_iter().collect();
        roots.sort_unstable();
        roots.dedup();
        Self { roots }
    }

    pub(crate) fn component_count(&self) -> usize {
        self.roots.len()
    }

    /// Final label of `root`.
    pub(crate) fn label_of(&self, root: ElementId, dimensions: Dimensions) -> Result<i32> {
        let ordinal =
            self.roots
                .binary_search(&root)
                .map_err(|_| DisjointSetError::IndexOutOfRange {
                    index: root.get(),
                    len: self.roots.len(),
                })?;
        i32::try_from(ordinal + 1).map_err(|_| LabelingError::TooManyPixels {
            height: dimensions.height(),
            width: dimensions.width(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_are_numbered_in_ascending_order() {
        let dims = Dimensions::new(4, 4).expect("valid dimensions");
        let ids = [9, 2, 9, 5, 2].map(ElementId::new);
        let compaction = RootCompaction::from_roots(ids);
        assert_eq!(compaction.component_count(), 3);
        assert_eq!(compaction.label_of(ElementId::new(2), dims).expect("known"), 1);
        assert_eq!(compaction.label_of(ElementId::new(5), dims).expect("known"), 2);
        assert_eq!(compaction.label_of(ElementId::new(9), dims).expect("known"), 3);
    }

    #[test]
    fn unknown_root_is_reported() {
        let dims = Dimensions::new(1, 1).expect("valid dimensions");
        let compaction = RootCompaction::from_roots([ElementId::new(1)]);
        let err = compaction
            .label_of(ElementId::new(4), dims)
            .expect_err("unknown roots must fail");
        assert_eq!(err.disjoint_set_code(), Some(crate::error::DisjointSetErrorCode::IndexOutOfRange));
    }
}
