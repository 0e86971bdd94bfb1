//! Command implementations and argument parsing for the `ccl` binary.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ccl_core::{
    BinaryImage, Connectivity, LabelMap, LabelingError, StreamingLabelerBuilder,
    baseline::{Traversal, label_flood_fill, label_pixel_union},
    label_two_pass,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

use super::export::write_labels_csv;
use super::mask::{MaskError, load_mask};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "ccl", about = "Label connected components of binary masks.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Label a mask with one algorithm and summarise its components.
    Label(LabelCommand),
    /// Run every algorithm on a mask and check that they agree.
    Compare(CompareCommand),
}

/// Options accepted by the `label` command.
#[derive(Debug, Args, Clone)]
pub struct LabelCommand {
    /// Mask file: `.txt`/`.mask` grids of `0`/`1`, or any raster image.
    pub path: PathBuf,

    /// Pixel adjacency.
    #[arg(long, value_enum, default_value_t = ConnectivityArg::Four)]
    pub connectivity: ConnectivityArg,

    /// Labeling algorithm.
    #[arg(long, value_enum, default_value_t = Algorithm::TwoPass)]
    pub algorithm: Algorithm,

    /// Seed for shuffling the streaming insertion order.
    #[arg(long)]
    pub shuffle_seed: Option<u64>,

    /// Write the label grid as CSV to this path.
    #[arg(long)]
    pub labels_csv: Option<PathBuf>,
}

/// Options accepted by the `compare` command.
#[derive(Debug, Args, Clone)]
pub struct CompareCommand {
    /// Mask file: `.txt`/`.mask` grids of `0`/`1`, or any raster image.
    pub path: PathBuf,

    /// Pixel adjacency.
    #[arg(long, value_enum, default_value_t = ConnectivityArg::Four)]
    pub connectivity: ConnectivityArg,

    /// Seed for shuffling the streaming insertion order.
    #[arg(long)]
    pub shuffle_seed: Option<u64>,
}

/// Pixel adjacency accepted on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum ConnectivityArg {
    /// Orthogonal neighbours only.
    Four,
    /// Orthogonal and diagonal neighbours.
    Eight,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(value: ConnectivityArg) -> Self {
        match value {
            ConnectivityArg::Four => Self::Four,
            ConnectivityArg::Eight => Self::Eight,
        }
    }
}

/// Labeling algorithms selectable from the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum Algorithm {
    /// Batch two-pass union-find labeler.
    TwoPass,
    /// Streaming labeler fed one pixel at a time.
    Streaming,
    /// Breadth-first flood fill.
    Bfs,
    /// Depth-first flood fill.
    Dfs,
    /// One-pass union over a pixel-indexed forest.
    PixelUnion,
}

impl Algorithm {
    /// Every algorithm, batch labeler first.
    pub const ALL: [Self; 5] = [
        Self::TwoPass,
        Self::Streaming,
        Self::Bfs,
        Self::Dfs,
        Self::PixelUnion,
    ];

    /// Command-line spelling of the algorithm.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwoPass => "two-pass",
            Self::Streaming => "streaming",
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::PixelUnion => "pixel-union",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading a mask or writing output.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A text mask was malformed.
    #[error("invalid mask `{path}`: {source}")]
    Mask {
        /// Path of the mask.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: MaskError,
    },
    /// A raster mask could not be decoded.
    #[error("failed to decode `{path}`: {source}")]
    Image {
        /// Path of the raster.
        path: PathBuf,
        /// Decoder failure.
        #[source]
        source: image::ImageError,
    },
    /// Labeling failed.
    #[error(transparent)]
    Core(#[from] LabelingError),
}

/// Shape and foreground of the processed mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSummary {
    /// Name derived from the mask path.
    pub source: String,
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
    /// Number of foreground pixels.
    pub foreground: usize,
}

impl MaskSummary {
    fn new(path: &Path, image: &BinaryImage) -> Self {
        let dimensions = image.dimensions();
        Self {
            source: derive_source_name(path),
            height: dimensions.height(),
            width: dimensions.width(),
            foreground: image.foreground_count(),
        }
    }
}

/// Outcome of the `label` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSummary {
    /// Processed mask.
    pub mask: MaskSummary,
    /// Algorithm that produced the labels.
    pub algorithm: Algorithm,
    /// Adjacency used.
    pub connectivity: Connectivity,
    /// Number of components.
    pub components: usize,
    /// Pixel count of the largest component, `0` without foreground.
    pub largest_component: usize,
    /// CSV file written, if requested.
    pub labels_csv: Option<PathBuf>,
}

/// One algorithm's result in the `compare` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmOutcome {
    /// Algorithm that was run.
    pub algorithm: Algorithm,
    /// Number of components it found.
    pub components: usize,
    /// Whether its partition equals the two-pass labeler's.
    pub agrees: bool,
}

/// Outcome of the `compare` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareSummary {
    /// Processed mask.
    pub mask: MaskSummary,
    /// Adjacency used.
    pub connectivity: Connectivity,
    /// Per-algorithm results in [`Algorithm::ALL`] order.
    pub outcomes: Vec<AlgorithmOutcome>,
}

impl CompareSummary {
    /// Returns `true` when every algorithm agreed with the batch labeler.
    #[must_use]
    pub fn all_agree(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.agrees)
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionSummary {
    /// Result of `label`.
    Label(LabelSummary),
    /// Result of `compare`.
    Compare(CompareSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, labeling, or exporting fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use ccl_cli::cli::{
/// #     Algorithm, Cli, Command, ConnectivityArg, ExecutionSummary, LabelCommand, run_cli,
/// # };
/// # use tempfile::Builder;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = Builder::new().suffix(".txt").tempfile()?;
/// std::fs::write(file.path(), "110\n001\n")?;
/// let cli = Cli {
///     command: Command::Label(LabelCommand {
///         path: file.path().to_path_buf(),
///         connectivity: ConnectivityArg::Four,
///         algorithm: Algorithm::TwoPass,
///         shuffle_seed: None,
///         labels_csv: None,
///     }),
/// };
/// let ExecutionSummary::Label(summary) = run_cli(cli)? else {
///     unreachable!("label command yields a label summary");
/// };
/// assert_eq!(summary.components, 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Label(command) => {
            Span::current().record("command", "label");
            run_label(command).map(ExecutionSummary::Label)
        }
        Command::Compare(command) => {
            Span::current().record("command", "compare");
            run_compare(command).map(ExecutionSummary::Compare)
        }
    }
}

#[instrument(
    name = "cli.label",
    err,
    skip(command),
    fields(
        algorithm = %command.algorithm,
        connectivity = field::Empty,
        streaming_seed = field::Empty,
    ),
)]
pub(super) fn run_label(command: LabelCommand) -> Result<LabelSummary, CliError> {
    let LabelCommand {
        path,
        connectivity,
        algorithm,
        shuffle_seed,
        labels_csv,
    } = command;
    let connectivity = Connectivity::from(connectivity);
    let span = Span::current();
    span.record("connectivity", field::display(connectivity));
    if let Some(seed) = shuffle_seed {
        span.record("streaming_seed", seed);
    }

    let image = load_mask(&path)?;
    let labels = run_algorithm(&image, connectivity, algorithm, shuffle_seed)?;
    if let Some(csv) = &labels_csv {
        write_labels_csv(&labels, csv)?;
    }

    let summary = LabelSummary {
        mask: MaskSummary::new(&path, &image),
        algorithm,
        connectivity,
        components: labels.component_count(),
        largest_component: labels.component_sizes().into_iter().max().unwrap_or(0),
        labels_csv,
    };
    info!(
        source = summary.mask.source.as_str(),
        components = summary.components,
        "label command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.compare",
    err,
    skip(command),
    fields(connectivity = field::Empty),
)]
pub(super) fn run_compare(command: CompareCommand) -> Result<CompareSummary, CliError> {
    let CompareCommand {
        path,
        connectivity,
        shuffle_seed,
    } = command;
    let connectivity = Connectivity::from(connectivity);
    Span::current().record("connectivity", field::display(connectivity));

    let image = load_mask(&path)?;
    let reference = label_two_pass(&image, connectivity)?;
    let mut outcomes = Vec::with_capacity(Algorithm::ALL.len());
    for algorithm in Algorithm::ALL {
        let labels = run_algorithm(&image, connectivity, algorithm, shuffle_seed)?;
        let agrees = labels.same_partition(&reference);
        if !agrees {
            warn!(
                algorithm = algorithm.as_str(),
                components = labels.component_count(),
                expected = reference.component_count(),
                "partition differs from the two-pass labeler"
            );
        }
        outcomes.push(AlgorithmOutcome {
            algorithm,
            components: labels.component_count(),
            agrees,
        });
    }

    let summary = CompareSummary {
        mask: MaskSummary::new(&path, &image),
        connectivity,
        outcomes,
    };
    info!(
        source = summary.mask.source.as_str(),
        agree = summary.all_agree(),
        "compare command completed"
    );
    Ok(summary)
}

/// Labels `image` with `algorithm`.
///
/// The streaming labeler receives pixels in raster order, or in an order
/// shuffled by `shuffle_seed` when one is given.
///
/// # Errors
/// Propagates [`LabelingError`] from the chosen labeler.
pub fn run_algorithm(
    image: &BinaryImage,
    connectivity: Connectivity,
    algorithm: Algorithm,
    shuffle_seed: Option<u64>,
) -> Result<LabelMap, LabelingError> {
    match algorithm {
        Algorithm::TwoPass => label_two_pass(image, connectivity),
        Algorithm::Streaming => stream_labels(image, connectivity, shuffle_seed),
        Algorithm::Bfs => label_flood_fill(image, connectivity, Traversal::BreadthFirst),
        Algorithm::Dfs => label_flood_fill(image, connectivity, Traversal::DepthFirst),
        Algorithm::PixelUnion => label_pixel_union(image, connectivity),
    }
}

fn stream_labels(
    image: &BinaryImage,
    connectivity: Connectivity,
    shuffle_seed: Option<u64>,
) -> Result<LabelMap, LabelingError> {
    let dimensions = image.dimensions();
    let mut labeler = StreamingLabelerBuilder::new()
        .with_connectivity(connectivity)
        .build(dimensions.height(), dimensions.width())?;
    let mut order: Vec<_> = image.foreground_pixels().collect();
    if let Some(seed) = shuffle_seed {
        order.shuffle(&mut SmallRng::seed_from_u64(seed));
    }
    labeler.add_pixels(order)?;
    labeler.materialize_labels()
}

pub(super) fn derive_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "mask".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Label(label) => {
            render_mask(&label.mask, label.connectivity, &mut writer)?;
            writeln!(writer, "algorithm: {}", label.algorithm)?;
            writeln!(writer, "components: {}", label.components)?;
            writeln!(writer, "largest component: {}", label.largest_component)?;
            if let Some(path) = &label.labels_csv {
                writeln!(writer, "labels csv: {}", path.display())?;
            }
        }
        ExecutionSummary::Compare(compare) => {
            render_mask(&compare.mask, compare.connectivity, &mut writer)?;
            for outcome in &compare.outcomes {
                let verdict = if outcome.agrees { "agrees" } else { "DIFFERS" };
                writeln!(
                    writer,
                    "{}\t{}\t{verdict}",
                    outcome.algorithm, outcome.components
                )?;
            }
        }
    }
    Ok(())
}

fn render_mask(
    mask: &MaskSummary,
    connectivity: Connectivity,
    mut writer: impl Write,
) -> io::Result<()> {
    writeln!(writer, "source: {}", mask.source)?;
    writeln!(writer, "connectivity: {connectivity}")?;
    writeln!(writer, "dimensions: {}x{}", mask.height, mask.width)?;
    writeln!(writer, "foreground: {}", mask.foreground)
}
