//! Binary input rasters and dense label outputs.
//!
//! Pixels are stored row-major and addressed by the flat index
//! `row * width + col`. Output labels are `i32` values where `0` marks
//! background and `1..=K` number the `K` components.

use std::collections::HashMap;

use crate::{
    Result,
    connectivity::Offset,
    error::LabelingError,
};

/// Validated image dimensions.
///
/// # Examples
/// ```
/// use ccl_core::Dimensions;
///
/// let dims = Dimensions::new(2, 3)?;
/// assert_eq!(dims.pixel_count(), 6);
/// assert_eq!(dims.index(1, 2)?, 5);
/// assert_eq!(dims.coordinates(4), (1, 1));
/// # Ok::<(), ccl_core::LabelingError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Dimensions {
    height: usize,
    width: usize,
}

impl Dimensions {
    /// Validates a `height` x `width` raster.
    ///
    /// # Errors
    /// Returns [`LabelingError::InvalidDimensions`] when either side is zero
    /// and [`LabelingError::TooManyPixels`] when every pixel could not receive
    /// its own positive `i32` label.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(LabelingError::InvalidDimensions { height, width });
        }
        let capacity = usize::try_from(i32::MAX).unwrap_or(usize::MAX);
        match height.checked_mul(width) {
            Some(pixels) if pixels < capacity => Ok(Self { height, width }),
            _ => Err(LabelingError::TooManyPixels { height, width }),
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Total number of pixels, `height * width`.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    /// Flat row-major index of `(row, col)`.
    ///
    /// # Errors
    /// Returns [`LabelingError::OutOfBounds`] when the coordinate lies outside
    /// the raster.
    pub fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.height && col < self.width {
            Ok(row * self.width + col)
        } else {
            Err(LabelingError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Inverse of [`Self::index`] for an in-range flat index.
    #[must_use]
    pub const fn coordinates(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// Flat index of the pixel at `offset` from `(row, col)`, or `None` when it
    /// falls off the raster.
    pub(crate) fn offset_index(&self, row: usize, col: usize, offset: Offset) -> Option<usize> {
        let (dr, dc) = offset;
        let neighbour_row = row.checked_add_signed(dr).filter(|&r| r < self.height)?;
        let neighbour_col = col.checked_add_signed(dc).filter(|&c| c < self.width)?;
        Some(neighbour_row * self.width + neighbour_col)
    }

    pub(crate) fn check_len(&self, actual: usize) -> Result<()> {
        let expected = self.pixel_count();
        if actual == expected {
            Ok(())
        } else {
            Err(LabelingError::BufferSizeMismatch { expected, actual })
        }
    }
}

/// Dense row-major binary raster. Any non-zero byte is foreground.
///
/// # Examples
/// ```
/// use ccl_core::BinaryImage;
///
/// let image = BinaryImage::from_rows(&[[1, 0], [0, 1]])?;
/// assert_eq!(image.foreground_count(), 2);
/// assert!(image.is_foreground(1, 1)?);
/// # Ok::<(), ccl_core::LabelingError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BinaryImage {
    dimensions: Dimensions,
    pixels: Vec<u8>,
}

impl BinaryImage {
    /// Wraps a row-major pixel buffer of `height * width` values.
    ///
    /// # Errors
    /// Returns [`LabelingError::InvalidDimensions`] or
    /// [`LabelingError::TooManyPixels`] for unusable dimensions and
    /// [`LabelingError::BufferSizeMismatch`] when `pixels` has the wrong
    /// length.
    pub fn new(height: usize, width: usize, pixels: Vec<u8>) -> Result<Self> {
        let dimensions = Dimensions::new(height, width)?;
        dimensions.check_len(pixels.len())?;
        Ok(Self { dimensions, pixels })
    }

    /// Builds an image from equally long rows.
    ///
    /// # Errors
    /// Returns [`LabelingError::InvalidDimensions`] when there are no rows or
    /// the first row is empty, and [`LabelingError::BufferSizeMismatch`] when
    /// the rows are ragged.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let pixels: Vec<u8> = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Self::new(height, width, pixels)
    }

    /// Creates an all-background image.
    ///
    /// # Errors
    /// Returns the same dimension errors as [`Self::new`].
    pub fn empty(height: usize, width: usize) -> Result<Self> {
        let dimensions = Dimensions::new(height, width)?;
        Ok(Self {
            dimensions,
            pixels: vec![0; dimensions.pixel_count()],
        })
    }

    /// Image dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Raw row-major pixel values.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns whether the pixel at `(row, col)` is foreground.
    ///
    /// # Errors
    /// Returns [`LabelingError::OutOfBounds`] for coordinates outside the image.
    pub fn is_foreground(&self, row: usize, col: usize) -> Result<bool> {
        let index = self.dimensions.index(row, col)?;
        Ok(self.pixels.get(index).is_some_and(|&value| value != 0))
    }

    /// Marks the pixel at `(row, col)` as foreground.
    ///
    /// # Errors
    /// Returns [`LabelingError::OutOfBounds`] for coordinates outside the image.
    pub fn set_foreground(&mut self, row: usize, col: usize) -> Result<()> {
        let index = self.dimensions.index(row, col)?;
        if let Some(value) = self.pixels.get_mut(index) {
            *value = 1;
        }
        Ok(())
    }

    /// Coordinates of every foreground pixel in raster order.
    pub fn foreground_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let dimensions = self.dimensions;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0)
            .map(move |(index, _)| dimensions.coordinates(index))
    }

    /// Number of foreground pixels.
    #[must_use]
    pub fn foreground_count(&self) -> usize {
        self.pixels.iter().filter(|&&value| value != 0).count()
    }

    pub(crate) fn is_foreground_at(&self, index: usize) -> bool {
        self.pixels.get(index).is_some_and(|&value| value != 0)
    }
}

/// Dense label raster produced by every labeler.
///
/// Holds `0` for background and labels `1..=K` for `K` components with no
/// gaps.
///
/// # Examples
/// ```
/// use ccl_core::{BinaryImage, Connectivity, label_two_pass};
///
/// let image = BinaryImage::from_rows(&[[1, 0, 1]])?;
/// let labels = label_two_pass(&image, Connectivity::Four)?;
/// assert_eq!(labels.labels(), &[1, 0, 2]);
/// assert_eq!(labels.component_sizes(), vec![1, 1]);
/// # Ok::<(), ccl_core::LabelingError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LabelMap {
    dimensions: Dimensions,
    labels: Vec<i32>,
    component_count: usize,
}

impl LabelMap {
    pub(crate) fn new(dimensions: Dimensions, labels: Vec<i32>, component_count: usize) -> Self {
        Self {
            dimensions,
            labels,
            component_count,
        }
    }

    /// Dimensions of the labelled image.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Row-major labels.
    #[must_use]
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Consumes the map, returning the row-major label buffer.
    #[must_use]
    pub fn into_labels(self) -> Vec<i32> {
        self.labels
    }

    /// Number of components `K`.
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.component_count
    }

    /// Label at `(row, col)`.
    ///
    /// # Errors
    /// Returns [`LabelingError::OutOfBounds`] for coordinates outside the image.
    pub fn label_at(&self, row: usize, col: usize) -> Result<i32> {
        let index = self.dimensions.index(row, col)?;
        Ok(self.labels.get(index).copied().unwrap_or_default())
    }

    /// Pixel count of each component; entry `i` belongs to label `i + 1`.
    #[must_use]
    pub fn component_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.component_count];
        for &label in &self.labels {
            let Some(slot) = usize::try_from(label)
                .ok()
                .and_then(|label| label.checked_sub(1))
            else {
                continue;
            };
            if let Some(size) = sizes.get_mut(slot) {
                *size += 1;
            }
        }
        sizes
    }

    /// Returns whether both maps group the same pixels together, regardless
    /// of how the components are numbered.
    ///
    /// # Examples
    /// ```
    /// use ccl_core::{BinaryImage, Connectivity, label_two_pass};
    /// use ccl_core::baseline::label_pixel_union;
    ///
    /// let image = BinaryImage::from_rows(&[[0, 1], [1, 1]])?;
    /// let batch = label_two_pass(&image, Connectivity::Four)?;
    /// let union = label_pixel_union(&image, Connectivity::Four)?;
    /// assert!(batch.same_partition(&union));
    /// # Ok::<(), ccl_core::LabelingError>(())
    /// ```
    #[must_use]
    pub fn same_partition(&self, other: &Self) -> bool {
        if self.dimensions != other.dimensions || self.component_count != other.component_count {
            return false;
        }
        let mut forward: HashMap<i32, i32> = HashMap::with_capacity(self.component_count);
        let mut backward: HashMap<i32, i32> = HashMap::with_capacity(self.component_count);
        self.labels.iter().zip(&other.labels).all(|(&left, &right)| {
            if (left == 0) != (right == 0) {
                return false;
            }
            *forward.entry(left).or_insert(right) == right
                && *backward.entry(right).or_insert(left) == left
        })
    }

    /// Row-major rows of labels.
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.labels.chunks(self.dimensions.width)
    }
}
