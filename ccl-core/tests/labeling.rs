//! Public API behaviour of the batch and streaming labelers.

mod common;

use ccl_core::{
    BinaryImage, Connectivity, DisjointSet, DisjointSetError, DisjointSetErrorCode, ElementId,
    LabelingError, LabelingErrorCode, StreamingLabeler, StreamingLabelerBuilder, label_buffer,
    label_two_pass,
};
use ccl_test_support::partition::same_partition;
use rstest::{fixture, rstest};

use common::{picture, two_blocks};

#[fixture]
fn blocks() -> BinaryImage {
    two_blocks()
}

#[fixture]
fn checkerboard() -> BinaryImage {
    picture(&["#.#", ".#.", "#.#"])
}

#[rstest]
fn separated_blocks_form_two_components(blocks: BinaryImage) {
    let labels = label_two_pass(&blocks, Connectivity::Four).expect("labeling must succeed");
    assert_eq!(labels.component_count(), 2);
    assert_eq!(
        labels.labels(),
        &[1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 2, 2, 0, 0, 2, 2]
    );
}

#[rstest]
#[case(Connectivity::Eight, 1)]
#[case(Connectivity::Four, 5)]
fn checkerboard_depends_on_connectivity(
    checkerboard: BinaryImage,
    #[case] connectivity: Connectivity,
    #[case] expected: usize,
) {
    let labels = label_two_pass(&checkerboard, connectivity).expect("labeling must succeed");
    assert_eq!(labels.component_count(), expected);
}

#[rstest]
#[case(1, 1)]
#[case(6, 9)]
#[case(32, 3)]
fn uniform_images(#[case] height: usize, #[case] width: usize) {
    let blank = vec![0_u8; height * width];
    let labels = label_buffer(&blank, height, width, Connectivity::Eight)
        .expect("labeling must succeed");
    assert_eq!(labels.component_count(), 0);
    assert!(labels.labels().iter().all(|&label| label == 0));

    let solid = vec![1_u8; height * width];
    for connectivity in [Connectivity::Four, Connectivity::Eight] {
        let labels =
            label_buffer(&solid, height, width, connectivity).expect("labeling must succeed");
        assert_eq!(labels.component_count(), 1);
        assert!(labels.labels().iter().all(|&label| label == 1));
    }
}

#[rstest]
fn reverse_raster_stream_matches_batch(blocks: BinaryImage) {
    let dims = blocks.dimensions();
    let mut labeler = StreamingLabeler::new(dims.height(), dims.width(), Connectivity::Four)
        .expect("valid dimensions");
    let mut order: Vec<_> = blocks.foreground_pixels().collect();
    order.reverse();
    for (row, col) in order {
        assert!(labeler.add_pixel(row, col).expect("in bounds"));
    }
    assert_eq!(labeler.component_count(), 2);

    let batch = label_two_pass(&blocks, Connectivity::Four).expect("labeling must succeed");
    let streamed = labeler.materialize_labels().expect("materialize must succeed");
    assert!(same_partition(streamed.labels(), batch.labels()));
}

#[rstest]
fn seeded_session_reports_sizes(blocks: BinaryImage) {
    let mut labeler = StreamingLabelerBuilder::new()
        .with_component_sizes(true)
        .build_from_image(&blocks)
        .expect("seeding must succeed");
    assert_eq!(labeler.component_count(), 2);
    assert_eq!(labeler.largest_component_size(), Some(4));

    labeler.add_pixel(1, 1).expect("in bounds");
    labeler.add_pixel(2, 1).expect("in bounds");
    assert_eq!(labeler.component_count(), 1);
    assert_eq!(labeler.component_size(0, 0).expect("in bounds"), Some(9));
}

#[test]
fn label_map_exposes_rows_and_sizes() {
    let image = picture(&["#.#", "#.."]);
    let labels = label_two_pass(&image, Connectivity::Four).expect("labeling must succeed");
    let rows: Vec<&[i32]> = labels.rows().collect();
    assert_eq!(rows, vec![&[1, 0, 2][..], &[1, 0, 0][..]]);
    assert_eq!(labels.component_sizes(), vec![2, 1]);
    assert_eq!(labels.label_at(0, 2).expect("in bounds"), 2);
}

#[rstest]
#[case::invalid_dimensions(
    label_buffer(&[], 0, 4, Connectivity::Four).expect_err("must fail"),
    LabelingErrorCode::InvalidDimensions,
    "LABELING_INVALID_DIMENSIONS"
)]
#[case::buffer_mismatch(
    label_buffer(&[1, 0], 2, 2, Connectivity::Four).expect_err("must fail"),
    LabelingErrorCode::BufferSizeMismatch,
    "LABELING_BUFFER_SIZE_MISMATCH"
)]
#[case::out_of_bounds(
    StreamingLabeler::new(2, 2, Connectivity::Four)
        .expect("valid dimensions")
        .add_pixel(2, 0)
        .expect_err("must fail"),
    LabelingErrorCode::OutOfBounds,
    "LABELING_OUT_OF_BOUNDS"
)]
fn labeling_errors_expose_stable_codes(
    #[case] err: LabelingError,
    #[case] code: LabelingErrorCode,
    #[case] text: &str,
) {
    assert_eq!(err.code(), code);
    assert_eq!(code.as_str(), text);
}

#[test]
fn disjoint_set_rejects_foreign_ids() {
    let mut forest = DisjointSet::new(3).expect("non-empty forest");
    let err = forest.find(ElementId::new(3)).expect_err("index must be checked");
    assert_eq!(err, DisjointSetError::IndexOutOfRange { index: 3, len: 3 });
    assert_eq!(err.code(), DisjointSetErrorCode::IndexOutOfRange);

    let wrapped = LabelingError::from(err);
    assert_eq!(wrapped.code(), LabelingErrorCode::DisjointSetFailure);
    assert_eq!(
        wrapped.disjoint_set_code(),
        Some(DisjointSetErrorCode::IndexOutOfRange)
    );
}

#[test]
fn oversized_images_are_rejected() {
    let err = BinaryImage::empty(1 << 16, 1 << 16).expect_err("must exceed label range");
    assert_eq!(
        err,
        LabelingError::TooManyPixels {
            height: 1 << 16,
            width: 1 << 16
        }
    );
}
