//! Seeded synthetic masks for benchmarking.
//!
//! Each pixel is foreground independently with the configured probability,
//! so the same configuration always yields the same mask.

use ccl_core::{BinaryImage, LabelingError};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

/// Errors that may occur during synthetic mask generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticMaskError {
    /// Density must lie in `0..=100` percent.
    #[error("density must be at most 100% (got {percent}%)")]
    InvalidDensity {
        /// Requested density.
        percent: u32,
    },
    /// The requested dimensions are unusable.
    #[error(transparent)]
    Dimensions(#[from] LabelingError),
}

/// Configuration for synthetic mask generation.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticMaskConfig {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
    /// Probability of a pixel being foreground, in percent.
    pub density_percent: u32,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl SyntheticMaskConfig {
    /// Generates the mask.
    ///
    /// # Errors
    /// Returns [`SyntheticMaskError::InvalidDensity`] above 100% and
    /// [`SyntheticMaskError::Dimensions`] for unusable dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use ccl_benches::mask::SyntheticMaskConfig;
    ///
    /// let config = SyntheticMaskConfig { height: 8, width: 8, density_percent: 100, seed: 1 };
    /// let mask = config.generate().expect("valid config");
    /// assert_eq!(mask.foreground_count(), 64);
    /// ```
    pub fn generate(&self) -> Result<BinaryImage, SyntheticMaskError> {
        if self.density_percent > 100 {
            return Err(SyntheticMaskError::InvalidDensity {
                percent: self.density_percent,
            });
        }
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let total = self.height.saturating_mul(self.width);
        let pixels = (0..total)
            .map(|_| u8::from(rng.gen_ratio(self.density_percent, 100)))
            .collect();
        Ok(BinaryImage::new(self.height, self.width, pixels)?)
    }
}

/// Splits the foreground of `mask` into a seeded shuffled arrival order.
#[must_use]
pub fn shuffled_arrivals(mask: &BinaryImage, seed: u64) -> Vec<(usize, usize)> {
    let mut arrivals: Vec<_> = mask.foreground_pixels().collect();
    arrivals.shuffle(&mut SmallRng::seed_from_u64(seed));
    arrivals
}
