//! Partition equivalence between the batch oracle and the other labelers.
//!
//! Label numbering legitimately differs between algorithms, so outputs are
//! compared by the partition of pixel indices they induce.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use ccl_test_support::partition::same_partition;

use crate::{
    LabelMap, StreamingLabelerBuilder,
    baseline::{Traversal, label_flood_fill, label_pixel_union},
    label_two_pass,
};

use super::types::ImageFixture;

/// Streams the fixture's arrival order and compares with the batch result.
pub(super) fn run_streaming_equivalence_property(fixture: &ImageFixture) -> TestCaseResult {
    let batch = batch_labels(fixture)?;
    let dims = fixture.image.dimensions();
    let mut labeler = StreamingLabelerBuilder::new()
        .with_connectivity(fixture.connectivity)
        .build(dims.height(), dims.width())
        .map_err(|e| TestCaseError::fail(format!("build failed: {e}")))?;
    labeler
        .add_pixels(fixture.arrival.iter().copied())
        .map_err(|e| TestCaseError::fail(format!("insertion failed: {e}")))?;

    if labeler.component_count() != batch.component_count() {
        return Err(TestCaseError::fail(format!(
            "live component count mismatch: streaming={}, batch={} ({})",
            labeler.component_count(),
            batch.component_count(),
            describe(fixture),
        )));
    }

    let streamed = labeler
        .materialize_labels()
        .map_err(|e| TestCaseError::fail(format!("materialize failed: {e}")))?;
    compare("streaming", &streamed, &batch, fixture)
}

/// Runs every baseline and compares each with the batch result.
pub(super) fn run_baseline_equivalence_property(fixture: &ImageFixture) -> TestCaseResult {
    let batch = batch_labels(fixture)?;
    for traversal in [Traversal::BreadthFirst, Traversal::DepthFirst] {
        let filled = label_flood_fill(&fixture.image, fixture.connectivity, traversal)
            .map_err(|e| TestCaseError::fail(format!("{traversal:?} failed: {e}")))?;
        compare(&format!("{traversal:?}"), &filled, &batch, fixture)?;
    }
    let unioned = label_pixel_union(&fixture.image, fixture.connectivity)
        .map_err(|e| TestCaseError::fail(format!("pixel union failed: {e}")))?;
    compare("pixel_union", &unioned, &batch, fixture)
}

pub(super) fn batch_labels(fixture: &ImageFixture) -> Result<LabelMap, TestCaseError> {
    label_two_pass(&fixture.image, fixture.connectivity)
        .map_err(|e| TestCaseError::fail(format!("batch labeling failed: {e}")))
}

fn compare(name: &str, candidate: &LabelMap, batch: &LabelMap, fixture: &ImageFixture) -> TestCaseResult {
    if candidate.component_count() != batch.component_count() {
        return Err(TestCaseError::fail(format!(
            "{name} component count mismatch: {}, batch={} ({})",
            candidate.component_count(),
            batch.component_count(),
            describe(fixture),
        )));
    }
    if !same_partition(candidate.labels(), batch.labels()) {
        return Err(TestCaseError::fail(format!(
            "{name} partition differs from batch ({})",
            describe(fixture),
        )));
    }
    Ok(())
}

pub(super) fn describe(fixture: &ImageFixture) -> String {
    let dims = fixture.image.dimensions();
    format!(
        "height={}, width={}, foreground={}, connectivity={}",
        dims.height(),
        dims.width(),
        fixture.image.foreground_count(),
        fixture.connectivity,
    )
}
