//! Command-line interface orchestration for the `ccl` binary.
//!
//! `label` runs one labeling algorithm over a mask file and summarises its
//! components; `compare` runs every algorithm and checks their partitions
//! against the batch two-pass labeler.

mod commands;
mod export;
mod mask;

pub use commands::{
    Algorithm, AlgorithmOutcome, Cli, CliError, Command, CompareCommand, CompareSummary,
    ConnectivityArg, ExecutionSummary, LabelCommand, LabelSummary, MaskSummary, render_summary,
    run_algorithm, run_cli,
};
pub use export::render_labels_csv;
pub use mask::{MaskError, load_mask, parse_text_mask};

#[cfg(test)]
mod test_helpers;
