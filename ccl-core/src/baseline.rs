//! Reference labelers used to cross-check and benchmark the union-find
//! labelers.
//!
//! Each baseline numbers components in the raster order in which it first
//! meets them, so its output satisfies the same [`LabelMap`] contract as the
//! two-pass labeler, although the numbering may differ.

use std::collections::{HashMap, VecDeque};

use tracing::instrument;

use crate::{
    Result,
    connectivity::Connectivity,
    disjoint_set::{DisjointSet, ElementId},
    error::LabelingError,
    image::{BinaryImage, LabelMap},
};

/// Frontier discipline of a flood fill.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Traversal {
    /// Queue-based breadth-first fill.
    BreadthFirst,
    /// Stack-based depth-first fill.
    DepthFirst,
}

/// Labels `image` by flooding each unvisited foreground pixel's component.
///
/// # Errors
/// Returns [`LabelingError::TooManyPixels`] if the component count escapes the
/// `i32` range, which valid dimensions rule out.
///
/// # Examples
/// ```
/// use ccl_core::{BinaryImage, Connectivity};
/// use ccl_core::baseline::{Traversal, label_flood_fill};
///
/// let image = BinaryImage::from_rows(&[[1, 0, 1], [0, 1, 0], [1, 0, 1]])?;
/// let labels = label_flood_fill(&image, Connectivity::Eight, Traversal::BreadthFirst)?;
/// assert_eq!(labels.component_count(), 1);
/// # Ok::<(), ccl_core::LabelingError>(())
/// ```
#[instrument(
    name = "core.baseline",
    err,
    skip(image),
    fields(algorithm = ?traversal, connectivity = %connectivity),
)]
pub fn label_flood_fill(
    image: &BinaryImage,
    connectivity: Connectivity,
    traversal: Traversal,
) -> Result<LabelMap> {
    let dimensions = image.dimensions();
    let mut labels = vec![0_i32; dimensions.pixel_count()];
    let mut frontier = VecDeque::new();
    let mut current = 0_i32;

    for start in 0..dimensions.pixel_count() {
        if !image.is_foreground_at(start) || labels.get(start).is_some_and(|&label| label != 0) {
            continue;
        }
        current = next_component(current, image)?;
        mark(&mut labels, start, current);
        frontier.push_back(start);

        while let Some(index) = match traversal {
            Traversal::BreadthFirst => frontier.pop_front(),
            Traversal::DepthFirst => frontier.pop_back(),
        } {
            let (row, col) = dimensions.coordinates(index);
            for &offset in connectivity.neighbour_offsets() {
                let Some(neighbour) = dimensions.offset_index(row, col, offset) else {
                    continue;
                };
                if image.is_foreground_at(neighbour)
                    && labels.get(neighbour).is_some_and(|&label| label == 0)
                {
                    mark(&mut labels, neighbour, current);
                    frontier.push_back(neighbour);
                }
            }
        }
    }

    let count = usize::try_from(current).unwrap_or_default();
    Ok(LabelMap::new(dimensions, labels, count))
}

/// Labels `image` by unioning every foreground pixel with its forward
/// neighbours over a forest indexed by pixel, then numbering roots in raster
/// order of first occurrence.
///
/// # Errors
/// Propagates disjoint-set failures, which indicate a broken internal bound.
///
/// # Examples
/// ```
/// use ccl_core::{BinaryImage, Connectivity};
/// use ccl_core::baseline::label_pixel_union;
///
/// let image = BinaryImage::from_rows(&[[1, 0, 1], [0, 1, 0], [1, 0, 1]])?;
/// let labels = label_pixel_union(&image, Connectivity::Four)?;
/// assert_eq!(labels.component_count(), 5);
/// # Ok::<(), ccl_core::LabelingError>(())
/// ```
#[instrument(
    name = "core.baseline",
    err,
    skip(image),
    fields(algorithm = "pixel_union", connectivity = %connectivity),
)]
pub fn label_pixel_union(image: &BinaryImage, connectivity: Connectivity) -> Result<LabelMap> {
    let dimensions = image.dimensions();
    let mut forest = DisjointSet::new(dimensions.pixel_count())?;

    for index in (0..dimensions.pixel_count()).filter(|&index| image.is_foreground_at(index)) {
        let (row, col) = dimensions.coordinates(index);
        for &offset in connectivity.forward_offsets() {
            if let Some(neighbour) = dimensions.offset_index(row, col, offset)
                && image.is_foreground_at(neighbour)
            {
                forest.union(ElementId::new(index), ElementId::new(neighbour))?;
            }
        }
    }

    let mut label_of_root: HashMap<ElementId, i32> = HashMap::new();
    let mut labels = vec![0_i32; dimensions.pixel_count()];
    let mut current = 0_i32;
    for index in (0..dimensions.pixel_count()).filter(|&index| image.is_foreground_at(index)) {
        let root = forest.find(ElementId::new(index))?;
        let label = match label_of_root.get(&root) {
            Some(&label) => label,
            None => {
                current = next_component(current, image)?;
                label_of_root.insert(root, current);
                current
            }
        };
        mark(&mut labels, index, label);
    }

    Ok(LabelMap::new(dimensions, labels, label_of_root.len()))
}

fn next_component(current: i32, image: &BinaryImage) -> Result<i32> {
    current
        .checked_add(1)
        .ok_or_else(|| LabelingError::TooManyPixels {
            height: image.dimensions().height(),
            width: image.dimensions().width(),
        })
}

fn mark(labels: &mut [i32], index: usize, label: i32) {
    if let Some(slot) = labels.get_mut(index) {
        *slot = label;
    }
}
