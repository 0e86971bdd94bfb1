//! Strategy builders for labeling property tests.
//!
//! Images are kept small so each case can afford quadratic checks, and the
//! foreground density is drawn per case so both sparse speckle and nearly
//! solid rasters appear.

use proptest::prelude::*;

use crate::{
    BinaryImage, Connectivity,
    test_utils::{random_image, shuffled_foreground},
};

use super::types::ImageFixture;

/// Largest generated side length.
const MAX_SIDE: usize = 14;

/// Generates an image, a connectivity mode, and a shuffled arrival order.
pub(super) fn image_fixture_strategy() -> impl Strategy<Value = ImageFixture> {
    (1..=MAX_SIDE, 1..=MAX_SIDE, any::<Connectivity>(), 0.05_f64..0.95)
        .prop_flat_map(|(height, width, connectivity, density)| {
            (
                Just(height),
                Just(width),
                Just(connectivity),
                prop::collection::vec(prop::bool::weighted(density), height * width),
            )
        })
        .prop_flat_map(|(height, width, connectivity, mask)| {
            let pixels: Vec<u8> = mask.into_iter().map(u8::from).collect();
            let image = BinaryImage::new(height, width, pixels)
                .expect("generated dimensions must be valid");
            let arrival: Vec<(usize, usize)> = image.foreground_pixels().collect();
            (Just(image), Just(connectivity), Just(arrival).prop_shuffle())
        })
        .prop_map(|(image, connectivity, arrival)| ImageFixture {
            image,
            connectivity,
            arrival,
        })
}

/// Builds a deterministic fixture for rstest cases.
pub(super) fn generate_fixture(
    height: usize,
    width: usize,
    density: f64,
    connectivity: Connectivity,
    seed: u64,
) -> ImageFixture {
    let image = random_image(height, width, density, seed);
    let arrival = shuffled_foreground(&image, seed.wrapping_add(1));
    ImageFixture {
        image,
        connectivity,
        arrival,
    }
}
