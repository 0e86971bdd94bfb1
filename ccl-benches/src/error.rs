//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of calling
//! `.expect()`.

use ccl_core::LabelingError;

use crate::mask::SyntheticMaskError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic mask generation failed.
    #[error("synthetic mask generation failed: {0}")]
    Mask(#[from] SyntheticMaskError),
    /// A labeler rejected its input.
    #[error("labeling failed: {0}")]
    Labeling(#[from] LabelingError),
}
