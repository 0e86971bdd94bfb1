//! Pixel adjacency modes and their neighbour offsets.

use std::fmt;

/// Row/column offset from a pixel to one of its neighbours.
pub(crate) type Offset = (isize, isize);

const CAUSAL_FOUR: &[Offset] = &[(0, -1), (-1, 0)];
const CAUSAL_EIGHT: &[Offset] = &[(0, -1), (-1, 0), (-1, -1), (-1, 1)];
const FULL_FOUR: &[Offset] = &[(0, -1), (-1, 0), (0, 1), (1, 0)];
const FULL_EIGHT: &[Offset] = &[
    (0, -1),
    (-1, 0),
    (-1, -1),
    (-1, 1),
    (0, 1),
    (1, 0),
    (1, 1),
    (1, -1),
];
const FORWARD_FOUR: &[Offset] = &[(0, 1), (1, 0)];
const FORWARD_EIGHT: &[Offset] = &[(0, 1), (1, 0), (1, 1), (1, -1)];

/// Neighbour adjacency used to decide which foreground pixels touch.
///
/// # Examples
/// ```
/// use ccl_core::Connectivity;
///
/// assert_eq!(Connectivity::from_eight_connectivity(true), Connectivity::Eight);
/// assert_eq!(Connectivity::default(), Connectivity::Four);
/// assert_eq!(Connectivity::Eight.degree(), 8);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Connectivity {
    /// North, south, east, and west neighbours.
    #[default]
    Four,
    /// Orthogonal plus diagonal neighbours.
    Eight,
}

impl Connectivity {
    /// Maps the boolean "eight connectivity" flag onto a mode.
    #[must_use]
    pub const fn from_eight_connectivity(eight: bool) -> Self {
        if eight { Self::Eight } else { Self::Four }
    }

    /// Returns whether diagonal neighbours are adjacent.
    #[must_use]
    pub const fn is_eight(self) -> bool {
        matches!(self, Self::Eight)
    }

    /// Number of neighbours an interior pixel has.
    #[must_use]
    pub const fn degree(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    /// Neighbours already visited by a raster scan: left, up, and for
    /// eight-connectivity up-left and up-right.
    pub(crate) const fn causal_offsets(self) -> &'static [Offset] {
        match self {
            Self::Four => CAUSAL_FOUR,
            Self::Eight => CAUSAL_EIGHT,
        }
    }

    /// Every neighbour, causal offsets first.
    pub(crate) const fn neighbour_offsets(self) -> &'static [Offset] {
        match self {
            Self::Four => FULL_FOUR,
            Self::Eight => FULL_EIGHT,
        }
    }

    /// Neighbours not yet visited by a raster scan.
    pub(crate) const fn forward_offsets(self) -> &'static [Offset] {
        match self {
            Self::Four => FORWARD_FOUR,
            Self::Eight => FORWARD_EIGHT,
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Four => f.write_str("4"),
            Self::Eight => f.write_str("8"),
        }
    }
}
