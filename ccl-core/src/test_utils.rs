//! Shared test utilities for `ccl-core`.

use ccl_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use crate::image::BinaryImage;

/// Builds a standard proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases);
    let defaults = ProptestConfig::default();
    ProptestConfig {
        cases: profile.cases(),
        max_shrink_iters: profile
            .max_shrink_iters()
            .unwrap_or(defaults.max_shrink_iters),
        ..defaults
    }
}

/// Builds an image from string rows where `#` marks foreground.
///
/// # Examples
/// ```ignore
/// let image = picture(&["#.", ".#"]);
/// assert_eq!(image.foreground_count(), 2);
/// ```
pub(crate) fn picture(rows: &[&str]) -> BinaryImage {
    let rows: Vec<Vec<u8>> = rows
        .iter()
        .map(|row| row.bytes().map(|byte| u8::from(byte == b'#')).collect())
        .collect();
    BinaryImage::from_rows(&rows).expect("picture rows must be rectangular")
}

/// Seeded random mask where each pixel is foreground with `density`.
pub(crate) fn random_image(height: usize, width: usize, density: f64, seed: u64) -> BinaryImage {
    let mut rng = SmallRng::seed_from_u64(seed);
    let pixels = (0..height * width)
        .map(|_| u8::from(rng.gen_bool(density)))
        .collect();
    BinaryImage::new(height, width, pixels).expect("random image dimensions must be valid")
}

/// Foreground coordinates of `image` in a seeded random order.
pub(crate) fn shuffled_foreground(image: &BinaryImage, seed: u64) -> Vec<(usize, usize)> {
    let mut pixels: Vec<_> = image.foreground_pixels().collect();
    pixels.shuffle(&mut SmallRng::seed_from_u64(seed));
    pixels
}
