//! Incremental labeling of pixels that arrive one at a time.
//!
//! A [`StreamingLabeler`] keeps a sparse map from flat pixel index to
//! provisional label and a disjoint-set forest over labels. Each new pixel
//! takes the minimum root among its populated neighbours (or a fresh label when
//! none are populated) and unions the remaining neighbour roots into it, the
//! same rule the batch labeler applies during its first scan.
//!
//! Every neighbour offset of the active connectivity is examined, not only the
//! causal ones. Under raster-order arrival the forward neighbours are never
//! populated yet, so the rule reduces to the batch scan; under any other order
//! it guarantees that each adjacent pair is merged by whichever member arrives
//! second.

mod sizes;

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use crate::{
    Result,
    compaction::RootCompaction,
    connectivity::Connectivity,
    disjoint_set::{DisjointSet, ElementId, UnionOutcome},
    image::{BinaryImage, Dimensions, LabelMap},
};

use self::sizes::ComponentSizes;

/// Configures and constructs [`StreamingLabeler`] sessions.
///
/// # Examples
/// ```
/// use ccl_core::{Connectivity, StreamingLabelerBuilder};
///
/// let mut labeler = StreamingLabelerBuilder::new()
///     .with_connectivity(Connectivity::Eight)
///     .with_component_sizes(true)
///     .build(3, 3)?;
/// labeler.add_pixel(0, 0)?;
/// labeler.add_pixel(1, 1)?;
/// assert_eq!(labeler.component_count(), 1);
/// assert_eq!(labeler.component_size(0, 0)?, Some(2));
/// # Ok::<(), ccl_core::LabelingError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StreamingLabelerBuilder {
    connectivity: Connectivity,
    track_component_sizes: bool,
}

impl StreamingLabelerBuilder {
    /// Creates a builder for four-connected sessions without size tracking.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the neighbour adjacency for the session.
    #[must_use]
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Enables live per-component pixel counts.
    #[must_use]
    pub fn with_component_sizes(mut self, enabled: bool) -> Self {
        self.track_component_sizes = enabled;
        self
    }

    /// Returns the configured connectivity.
    #[must_use]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Returns whether component sizes will be tracked.
    #[must_use]
    pub fn tracks_component_sizes(&self) -> bool {
        self.track_component_sizes
    }

    /// Starts an empty session over a `height` x `width` raster.
    ///
    /// # Errors
    /// Returns [`crate::LabelingError::InvalidDimensions`] or
    /// [`crate::LabelingError::TooManyPixels`] for unusable dimensions.
    pub fn build(self, height: usize, width: usize) -> Result<StreamingLabeler> {
        let dimensions = Dimensions::new(height, width)?;
        StreamingLabeler::with_config(dimensions, self)
    }

    /// Starts a session seeded with every foreground pixel of `image`,
    /// inserted in raster order.
    ///
    /// # Errors
    /// Propagates disjoint-set failures, which indicate a broken internal
    /// bound.
    #[instrument(
        name = "core.stream.seed",
        err,
        skip(self, image),
        fields(
            height = image.dimensions().height(),
            width = image.dimensions().width(),
            connectivity = %self.connectivity,
        ),
    )]
    pub fn build_from_image(self, image: &BinaryImage) -> Result<StreamingLabeler> {
        let mut labeler = StreamingLabeler::with_config(image.dimensions(), self)?;
        let inserted = labeler.add_pixels(image.foreground_pixels())?;
        debug!(
            inserted,
            components = labeler.component_count(),
            "seeded streaming session"
        );
        Ok(labeler)
    }
}

/// Labeling session that accepts foreground pixels in any order.
///
/// # Examples
/// ```
/// use ccl_core::{Connectivity, StreamingLabeler};
///
/// let mut labeler = StreamingLabeler::new(4, 4, Connectivity::Four)?;
/// for (row, col) in [(3, 3), (3, 2), (2, 3), (2, 2), (1, 0), (0, 1), (0, 0)] {
///     labeler.add_pixel(row, col)?;
/// }
/// assert_eq!(labeler.component_count(), 2);
/// let labels = labeler.materialize_labels()?;
/// assert_eq!(labels.label_at(0, 0)?, labels.label_at(1, 0)?);
/// assert_ne!(labels.label_at(0, 0)?, labels.label_at(3, 3)?);
/// # Ok::<(), ccl_core::LabelingError>(())
/// ```
#[derive(Clone, Debug)]
pub struct StreamingLabeler {
    dimensions: Dimensions,
    connectivity: Connectivity,
    forest: DisjointSet,
    labels: HashMap<usize, ElementId>,
    next_label: usize,
    components: usize,
    sizes: Option<ComponentSizes>,
}

impl StreamingLabeler {
    /// Starts an empty session without size tracking.
    ///
    /// # Errors
    /// Returns [`crate::LabelingError::InvalidDimensions`] or
    /// [`crate::LabelingError::TooManyPixels`] for unusable dimensions.
    pub fn new(height: usize, width: usize, connectivity: Connectivity) -> Result<Self> {
        StreamingLabelerBuilder::new()
            .with_connectivity(connectivity)
            .build(height, width)
    }

    fn with_config(dimensions: Dimensions, config: StreamingLabelerBuilder) -> Result<Self> {
        // At most one label per pixel, numbered from 1.
        let forest = DisjointSet::new(dimensions.pixel_count() + 1)?;
        Ok(Self {
            dimensions,
            connectivity: config.connectivity,
            forest,
            labels: HashMap::new(),
            next_label: 1,
            components: 0,
            sizes: config.track_component_sizes.then(ComponentSizes::default),
        })
    }

    /// Raster dimensions of the session.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Neighbour adjacency of the session.
    #[must_use]
    pub const fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Number of populated pixels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether no pixel has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns whether `(row, col)` has been added.
    ///
    /// # Errors
    /// Returns [`crate::LabelingError::OutOfBounds`] for coordinates outside
    /// the raster.
    pub fn contains(&self, row: usize, col: usize) -> Result<bool> {
        let index = self.dimensions.index(row, col)?;
        Ok(self.labels.contains_key(&index))
    }

    /// Adds the foreground pixel at `(row, col)`.
    ///
    /// Returns `false` without changing any state when the pixel was already
    /// present.
    ///
    /// # Errors
    /// Returns [`crate::LabelingError::OutOfBounds`] for coordinates outside
    /// the raster, and disjoint-set failures, which indicate a broken internal
    /// bound.
    pub fn add_pixel(&mut self, row: usize, col: usize) -> Result<bool> {
        let index = self.dimensions.index(row, col)?;
        if self.labels.contains_key(&index) {
            return Ok(false);
        }

        let roots = self.neighbour_roots(row, col)?;
        let label = match roots.iter().min() {
            None => self.fresh_label(),
            Some(&min) => {
                for &other in roots.iter().filter(|&&other| other != min) {
                    let outcome = self.forest.union(min, other)?;
                    self.record_union(outcome);
                }
                min
            }
        };

        self.labels.insert(index, label);
        if let Some(sizes) = self.sizes.as_mut() {
            let root = self.forest.find(label)?;
            sizes.add_pixel(root);
        }
        trace!(row, col, label = label.get(), "pixel added");
        Ok(true)
    }

    /// Adds every coordinate yielded by `pixels`, returning how many were new.
    ///
    /// Stops at the first failing coordinate; pixels added before it remain.
    ///
    /// # Errors
    /// Returns the first error raised by [`Self::add_pixel`].
    pub fn add_pixels<I>(&mut self, pixels: I) -> Result<usize>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut inserted = 0;
        for (row, col) in pixels {
            if self.add_pixel(row, col)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Number of components among the populated pixels.
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.components
    }

    /// Pixel count of the component containing `(row, col)`.
    ///
    /// Returns `None` when the pixel has not been added or when the session
    /// was built without size tracking.
    ///
    /// # Errors
    /// Returns [`crate::LabelingError::OutOfBounds`] for coordinates outside
    /// the raster.
    pub fn component_size(&mut self, row: usize, col: usize) -> Result<Option<usize>> {
        let index = self.dimensions.index(row, col)?;
        if self.sizes.is_none() {
            return Ok(None);
        }
        let Some(&label) = self.labels.get(&index) else {
            return Ok(None);
        };
        let root = self.forest.find(label)?;
        Ok(self.sizes.as_ref().and_then(|sizes| sizes.get(root)))
    }

    /// Pixel count of the largest component, or `None` when the session is
    /// empty or built without size tracking.
    #[must_use]
    pub fn largest_component_size(&self) -> Option<usize> {
        self.sizes.as_ref().and_then(ComponentSizes::largest)
    }

    /// Resolves every populated pixel to its root and renumbers the sorted
    /// roots `1..=K` into a dense label raster.
    ///
    /// Calling this repeatedly without adding pixels yields identical output.
    ///
    /// # Errors
    /// Propagates disjoint-set failures, which indicate a broken internal
    /// bound.
    #[instrument(
        name = "core.stream.materialize",
        err,
        skip(self),
        fields(pixels = self.labels.len()),
    )]
    pub fn materialize_labels(&mut self) -> Result<LabelMap> {
        let mut resolved = Vec::with_capacity(self.labels.len());
        for (&index, &label) in &self.labels {
            resolved.push((index, self.forest.find(label)?));
        }

        let compaction = RootCompaction::from_roots(resolved.iter().map(|&(_, root)| root));
        let mut labels = vec![0_i32; self.dimensions.pixel_count()];
        for (index, root) in resolved {
            let value = compaction.label_of(root, self.dimensions)?;
            if let Some(slot) = labels.get_mut(index) {
                *slot = value;
            }
        }

        debug!(
            components = compaction.component_count(),
            "materialized streaming labels"
        );
        Ok(LabelMap::new(
            self.dimensions,
            labels,
            compaction.component_count(),
        ))
    }

    fn neighbour_roots(&mut self, row: usize, col: usize) -> Result<Vec<ElementId>> {
        let mut roots = Vec::with_capacity(self.connectivity.degree());
        for &offset in self.connectivity.neighbour_offsets() {
            let Some(neighbour) = self.dimensions.offset_index(row, col, offset) else {
                continue;
            };
            let Some(&label) = self.labels.get(&neighbour) else {
                continue;
            };
            let root = self.forest.find(label)?;
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        Ok(roots)
    }

    fn fresh_label(&mut self) -> ElementId {
        let label = ElementId::new(self.next_label);
        self.next_label += 1;
        self.components += 1;
        label
    }

    fn record_union(&mut self, outcome: UnionOutcome) {
        if let UnionOutcome::Merged { root, absorbed } = outcome {
            self.components -= 1;
            if let Some(sizes) = self.sizes.as_mut() {
                sizes.merge(root, absorbed);
            }
            trace!(root = root.get(), absorbed = absorbed.get(), "components merged");
        }
    }
}
