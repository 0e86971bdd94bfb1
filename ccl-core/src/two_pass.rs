//! Batch two-pass connected-component labeling.
//!
//! The first raster scan gives every foreground pixel a provisional label:
//! a fresh one when no causal neighbour (left, up, and for eight-connectivity
//! up-left and up-right) is labelled, otherwise the minimum neighbour label,
//! with every other neighbour label unioned into it. The second scan resolves
//! each provisional label to its set root and renumbers the sorted roots
//! `1..=K`.

use tracing::{debug, instrument};

use crate::{
    Result,
    compaction::RootCompaction,
    connectivity::Connectivity,
    disjoint_set::{DisjointSet, ElementId},
    image::{BinaryImage, LabelMap},
};

/// Labels the connected foreground components of `image`.
///
/// The output is fully deterministic: labels follow the ascending order of the
/// resolved set roots.
///
/// # Errors
/// Returns [`crate::LabelingError::DisjointSet`] if a provisional label escapes
/// the forest, which indicates a broken internal bound.
///
/// # Examples
/// ```
/// use ccl_core::{BinaryImage, Connectivity, label_two_pass};
///
/// let image = BinaryImage::from_rows(&[
///     [1, 1, 0, 0],
///     [1, 0, 0, 0],
///     [0, 0, 1, 1],
///     [0, 0, 1, 1],
/// ])?;
/// let labels = label_two_pass(&image, Connectivity::Four)?;
/// assert_eq!(labels.component_count(), 2);
/// assert_eq!(labels.label_at(3, 3)?, 2);
/// # Ok::<(), ccl_core::LabelingError>(())
/// ```
#[instrument(
    name = "core.two_pass",
    err,
    skip(image),
    fields(
        height = image.dimensions().height(),
        width = image.dimensions().width(),
        connectivity = %connectivity,
    ),
)]
pub fn label_two_pass(image: &BinaryImage, connectivity: Connectivity) -> Result<LabelMap> {
    let dimensions = image.dimensions();
    let pixel_count = dimensions.pixel_count();

    // Fresh labels only go to pixels with no labelled left or upper
    // neighbour, which form an independent set of at most ceil(N / 2) pixels.
    let mut forest = DisjointSet::new(pixel_count.div_ceil(2) + 1)?;
    let mut provisional = vec![0_usize; pixel_count];
    let mut next_label = 1_usize;
    let mut neighbours: Vec<usize> = Vec::with_capacity(4);

    for row in 0..dimensions.height() {
        for col in 0..dimensions.width() {
            let index = row * dimensions.width() + col;
            if !image.is_foreground_at(index) {
                continue;
            }

            neighbours.clear();
            neighbours.extend(
                connectivity
                    .causal_offsets()
                    .iter()
                    .filter_map(|&offset| dimensions.offset_index(row, col, offset))
                    .filter_map(|neighbour| provisional.get(neighbour).copied())
                    .filter(|&label| label != 0),
            );

            let label = match neighbours.iter().min() {
                None => {
                    let fresh = next_label;
                    next_label += 1;
                    fresh
                }
                Some(&min) => {
                    for &other in neighbours.iter().filter(|&&other| other != min) {
                        forest.union(ElementId::new(min), ElementId::new(other))?;
                    }
                    min
                }
            };
            if let Some(slot) = provisional.get_mut(index) {
                *slot = label;
            }
        }
    }

    let provisional_count = next_label - 1;
    if provisional_count == 0 {
        debug!("image has no foreground pixels");
        return Ok(LabelMap::new(dimensions, vec![0; pixel_count], 0));
    }

    let mut roots = Vec::with_capacity(provisional_count);
    for label in 1..next_label {
        roots.push(forest.find(ElementId::new(label))?);
    }
    let compaction = RootCompaction::from_roots(roots.iter().copied());

    // final_of[label] holds the compact label of provisional `label`.
    let mut final_of = vec![0_i32; next_label];
    for (slot, &root) in final_of.iter_mut().skip(1).zip(&roots) {
        *slot = compaction.label_of(root, dimensions)?;
    }

    let labels = provisional
        .iter()
        .map(|&label| final_of.get(label).copied().unwrap_or_default())
        .collect();

    debug!(
        provisional = provisional_count,
        components = compaction.component_count(),
        "two-pass labeling completed"
    );
    Ok(LabelMap::new(dimensions, labels, compaction.component_count()))
}

/// Labels a raw row-major buffer of `height * width` pixels.
///
/// # Errors
/// Returns [`crate::LabelingError::InvalidDimensions`],
/// [`crate::LabelingError::TooManyPixels`], or
/// [`crate::LabelingError::BufferSizeMismatch`] for malformed input, and the
/// errors of [`label_two_pass`].
///
/// # Examples
/// ```
/// use ccl_core::{Connectivity, label_buffer};
///
/// let checkerboard = [1, 0, 1, 0, 1, 0, 1, 0, 1];
/// let eight = label_buffer(&checkerboard, 3, 3, Connectivity::Eight)?;
/// let four = label_buffer(&checkerboard, 3, 3, Connectivity::Four)?;
/// assert_eq!(eight.component_count(), 1);
/// assert_eq!(four.component_count(), 5);
/// # Ok::<(), ccl_core::LabelingError>(())
/// ```
pub fn label_buffer(
    pixels: &[u8],
    height: usize,
    width: usize,
    connectivity: Connectivity,
) -> Result<LabelMap> {
    let image = BinaryImage::new(height, width, pixels.to_vec())?;
    label_two_pass(&image, connectivity)
}
