//! Union-find (disjoint set union) over typed element ids.
//!
//! Both labelers track label equivalences in this forest. Elements are
//! addressed through [`ElementId`] rather than bare integers so provisional
//! label ids cannot be confused with flat pixel indices.

use crate::error::DisjointSetError;

/// Identifier of an element in a [`DisjointSet`].
///
/// # Examples
/// ```
/// use ccl_core::ElementId;
///
/// let id = ElementId::new(3);
/// assert_eq!(id.get(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ElementId(usize);

impl ElementId {
    /// Wraps a raw element index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the raw element index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

/// Result of a [`DisjointSet::union`] call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnionOutcome {
    /// Both elements already shared the given root.
    AlreadyJoined(ElementId),
    /// Two sets were merged; `absorbed` now hangs beneath `root`.
    Merged {
        /// Root of the combined set.
        root: ElementId,
        /// Former root attached beneath `root`.
        absorbed: ElementId,
    },
}

impl UnionOutcome {
    /// Returns the root of the set containing both elements.
    #[must_use]
    pub const fn root(self) -> ElementId {
        match self {
            Self::AlreadyJoined(root) | Self::Merged { root, .. } => root,
        }
    }

    /// Returns whether the call merged two distinct sets.
    #[must_use]
    pub const fn merged(self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

/// Array-backed forest with path compression and union by rank.
///
/// Ties in rank attach the second argument's root beneath the first's, so the
/// first argument keeps representing the set.
///
/// # Examples
/// ```
/// use ccl_core::{DisjointSet, ElementId};
///
/// let mut forest = DisjointSet::new(4)?;
/// forest.union(ElementId::new(1), ElementId::new(3))?;
/// assert_eq!(forest.find(ElementId::new(3))?, ElementId::new(1));
/// assert_ne!(forest.find(ElementId::new(2))?, ElementId::new(1));
/// # Ok::<(), ccl_core::DisjointSetError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Creates `len` singleton sets, each element its own root with rank 0.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::InvalidSize`] when `len` is zero.
    #[doc(alias = "make_set")]
    pub fn new(len: usize) -> Result<Self, DisjointSetError> {
        if len == 0 {
            return Err(DisjointSetError::InvalidSize { requested: len });
        }
        Ok(Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        })
    }

    /// Returns the number of elements in the forest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns whether the forest holds no elements. Always `false` for a
    /// successfully constructed forest.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the set containing `element`, pointing every node
    /// on the walked path directly at that root.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::IndexOutOfRange`] when `element` is not in
    /// the forest.
    pub fn find(&mut self, element: ElementId) -> Result<ElementId, DisjointSetError> {
        let mut node = self.check(element)?;

        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        Ok(ElementId(root))
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// The lower-rank root is attached beneath the higher-rank root. On equal
    /// ranks `right`'s root goes beneath `left`'s root, whose rank grows by
    /// one.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::IndexOutOfRange`] when either element is not
    /// in the forest.
    pub fn union(
        &mut self,
        left: ElementId,
        right: ElementId,
    ) -> Result<UnionOutcome, DisjointSetError> {
        let left_root = self.find(left)?.0;
        let right_root = self.find(right)?.0;
        if left_root == right_root {
            return Ok(UnionOutcome::AlreadyJoined(ElementId(left_root)));
        }

        let left_rank = self.rank[left_root];
        let right_rank = self.rank[right_root];
        let (root, absorbed) = if left_rank < right_rank {
            (right_root, left_root)
        } else {
            (left_root, right_root)
        };

        self.parent[absorbed] = root;
        if left_rank == right_rank {
            self.rank[root] = left_rank.saturating_add(1);
        }

        Ok(UnionOutcome::Merged {
            root: ElementId(root),
            absorbed: ElementId(absorbed),
        })
    }

    /// Returns whether `left` and `right` belong to the same set.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::IndexOutOfRange`] when either element is not
    /// in the forest.
    pub fn same_set(&mut self, left: ElementId, right: ElementId) -> Result<bool, DisjointSetError> {
        Ok(self.find(left)? == self.find(right)?)
    }

    fn check(&self, element: ElementId) -> Result<usize, DisjointSetError> {
        if element.0 < self.parent.len() {
            Ok(element.0)
        } else {
            Err(DisjointSetError::IndexOutOfRange {
                index: element.0,
                len: self.parent.len(),
            })
        }
    }

    #[cfg(test)]
    fn parent_of(&self, element: usize) -> usize {
        self.parent[element]
    }

    #[cfg(test)]
    fn rank_of(&self, element: usize) -> u8 {
        self.rank[element]
    }
}
