//! Structural invariants of label maps and streaming sessions.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use ccl_test_support::partition::{distinct_labels, is_dense};

use crate::{Connectivity, LabelMap, StreamingLabeler, label_two_pass};

use super::equivalence::{batch_labels, describe};
use super::types::ImageFixture;

/// Checks the dense label range, background zeros, and size totals.
pub(super) fn run_label_density_property(fixture: &ImageFixture) -> TestCaseResult {
    let labels = batch_labels(fixture)?;
    check_map(&labels, fixture)
}

/// Checks that eight-connectivity never yields more components than four.
pub(super) fn run_connectivity_monotonicity_property(fixture: &ImageFixture) -> TestCaseResult {
    let four = label_two_pass(&fixture.image, Connectivity::Four)
        .map_err(|e| TestCaseError::fail(format!("four-connected labeling failed: {e}")))?;
    let eight = label_two_pass(&fixture.image, Connectivity::Eight)
        .map_err(|e| TestCaseError::fail(format!("eight-connected labeling failed: {e}")))?;
    if eight.component_count() > four.component_count() {
        return Err(TestCaseError::fail(format!(
            "eight-connected count {} exceeds four-connected count {} ({})",
            eight.component_count(),
            four.component_count(),
            describe(fixture),
        )));
    }
    Ok(())
}

/// Checks the live count after every insertion, then replays the arrival
/// order to confirm duplicates and repeated materialisation change nothing.
pub(super) fn run_streaming_session_property(fixture: &ImageFixture) -> TestCaseResult {
    let mut labeler = session(fixture)?;
    for &(row, col) in &fixture.arrival {
        labeler
            .add_pixel(row, col)
            .map_err(|e| TestCaseError::fail(format!("insertion failed: {e}")))?;
        let snapshot = materialize(&mut labeler)?;
        if snapshot.component_count() != labeler.component_count() {
            return Err(TestCaseError::fail(format!(
                "live count {} disagrees with materialised count {} after ({row}, {col}) ({})",
                labeler.component_count(),
                snapshot.component_count(),
                describe(fixture),
            )));
        }
    }

    let first = materialize(&mut labeler)?;
    check_map(&first, fixture)?;

    let replayed = labeler
        .add_pixels(fixture.arrival.iter().copied())
        .map_err(|e| TestCaseError::fail(format!("replay failed: {e}")))?;
    if replayed != 0 {
        return Err(TestCaseError::fail(format!(
            "replaying the arrival order inserted {replayed} pixels ({})",
            describe(fixture),
        )));
    }

    let second = materialize(&mut labeler)?;
    if first != second {
        return Err(TestCaseError::fail(format!(
            "materialisation changed after duplicate insertion ({})",
            describe(fixture),
        )));
    }
    Ok(())
}

fn session(fixture: &ImageFixture) -> Result<StreamingLabeler, TestCaseError> {
    let dims = fixture.image.dimensions();
    StreamingLabeler::new(dims.height(), dims.width(), fixture.connectivity)
        .map_err(|e| TestCaseError::fail(format!("build failed: {e}")))
}

fn materialize(labeler: &mut StreamingLabeler) -> Result<LabelMap, TestCaseError> {
    labeler
        .materialize_labels()
        .map_err(|e| TestCaseError::fail(format!("materialize failed: {e}")))
}

fn check_map(labels: &LabelMap, fixture: &ImageFixture) -> TestCaseResult {
    if !is_dense(labels.labels()) || distinct_labels(labels.labels()) != labels.component_count() {
        return Err(TestCaseError::fail(format!(
            "labels are not dense over 1..={} ({})",
            labels.component_count(),
            describe(fixture),
        )));
    }
    let background_ok = fixture
        .image
        .as_slice()
        .iter()
        .zip(labels.labels())
        .all(|(&pixel, &label)| (pixel == 0) == (label == 0));
    if !background_ok {
        return Err(TestCaseError::fail(format!(
            "foreground and non-zero labels disagree ({})",
            describe(fixture),
        )));
    }
    let total: usize = labels.component_sizes().iter().sum();
    if total != fixture.image.foreground_count() {
        return Err(TestCaseError::fail(format!(
            "component sizes sum to {total}, expected {} ({})",
            fixture.image.foreground_count(),
            describe(fixture),
        )));
    }
    Ok(())
}
