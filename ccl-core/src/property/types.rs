//! Fixture types for labeling property tests.

use crate::{BinaryImage, Connectivity};

/// Generated image plus an arbitrary arrival order for its foreground.
#[derive(Clone, Debug)]
pub(super) struct ImageFixture {
    /// Binary raster under test.
    pub image: BinaryImage,
    /// Adjacency used by every labeler in the property.
    pub connectivity: Connectivity,
    /// Foreground coordinates in the order they are streamed.
    pub arrival: Vec<(usize, usize)>,
}
