//! Error types for the labeling core.
//!
//! Defines the disjoint-set and labeling error enums, their stable error
//! codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DisjointSet`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DisjointSetError {
    /// A forest must hold at least one element.
    #[error("disjoint-set forest must contain at least one element (got {requested})")]
    InvalidSize {
        /// Number of elements requested by the caller.
        requested: usize,
    },
    /// An element id fell outside the forest.
    #[error("element {index} is out of range for a forest of {len} elements")]
    IndexOutOfRange {
        /// The offending element id.
        index: usize,
        /// Number of elements in the forest.
        len: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DisjointSetError`] variants.
    enum DisjointSetErrorCode for DisjointSetError {
        /// A forest must hold at least one element.
        InvalidSize => InvalidSize { .. } => "DISJOINT_SET_INVALID_SIZE",
        /// An element id fell outside the forest.
        IndexOutOfRange => IndexOutOfRange { .. } => "DISJOINT_SET_INDEX_OUT_OF_RANGE",
    }
}

/// Error type produced by the batch, streaming, and baseline labelers.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LabelingError {
    /// Height and width must both be positive.
    #[error("image dimensions must be positive (got {height}x{width})")]
    InvalidDimensions {
        /// Requested number of rows.
        height: usize,
        /// Requested number of columns.
        width: usize,
    },
    /// The image holds more pixels than the `i32` label range can number.
    #[error("image of {height}x{width} pixels exceeds the representable label range")]
    TooManyPixels {
        /// Requested number of rows.
        height: usize,
        /// Requested number of columns.
        width: usize,
    },
    /// A pixel buffer did not hold exactly `height * width` values.
    #[error("pixel buffer has length {actual} but {expected} pixels were expected")]
    BufferSizeMismatch {
        /// Number of pixels implied by the dimensions.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A coordinate fell outside the image.
    #[error("pixel ({row}, {col}) is outside a {height}x{width} image")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Image height.
        height: usize,
        /// Image width.
        width: usize,
    },
    /// The disjoint-set substrate rejected an operation.
    #[error(transparent)]
    DisjointSet(#[from] DisjointSetError),
}

define_error_codes! {
    /// Stable codes describing [`LabelingError`] variants.
    enum LabelingErrorCode for LabelingError {
        /// Height and width must both be positive.
        InvalidDimensions => InvalidDimensions { .. } => "LABELING_INVALID_DIMENSIONS",
        /// The image holds more pixels than the label range can number.
        TooManyPixels => TooManyPixels { .. } => "LABELING_TOO_MANY_PIXELS",
        /// A pixel buffer did not hold exactly `height * width` values.
        BufferSizeMismatch => BufferSizeMismatch { .. } => "LABELING_BUFFER_SIZE_MISMATCH",
        /// A coordinate fell outside the image.
        OutOfBounds => OutOfBounds { .. } => "LABELING_OUT_OF_BOUNDS",
        /// The disjoint-set substrate rejected an operation.
        DisjointSetFailure => DisjointSet(..) => "LABELING_DISJOINT_SET_FAILURE",
    }
}

impl LabelingError {
    /// Retrieve the inner [`DisjointSetErrorCode`] when the error originated in
    /// the disjoint-set substrate.
    #[must_use]
    pub const fn disjoint_set_code(&self) -> Option<DisjointSetErrorCode> {
        match self {
            Self::DisjointSet(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the labeling API.
pub type Result<T> = core::result::Result<T, LabelingError>;
