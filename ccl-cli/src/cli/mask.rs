//! Mask loading from text grids and raster images.
//!
//! `.txt` and `.mask` files hold one row per line of `0`/`1` characters.
//! Every other extension is decoded with the `image` crate and reduced to
//! 8-bit luma, where any non-zero value is foreground.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use ccl_core::{BinaryImage, LabelingError};
use thiserror::Error;
use tracing::{Span, debug, field, instrument};

use super::commands::CliError;

/// Errors raised while parsing a text mask.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum MaskError {
    /// The file contained no rows.
    #[error("mask contains no rows")]
    Empty,
    /// A character other than `0`, `1`, whitespace, or `,` was found.
    #[error("unexpected character `{found}` at line {line}, column {column}")]
    InvalidCharacter {
        /// One-based line number.
        line: usize,
        /// One-based character position within the line.
        column: usize,
        /// Offending character.
        found: char,
    },
    /// A row's length differs from the first row's.
    #[error("line {line} has {actual} pixels, expected {expected}")]
    RaggedRow {
        /// One-based line number.
        line: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
    /// The grid parsed but its dimensions are unusable.
    #[error(transparent)]
    Dimensions(#[from] LabelingError),
}

/// Loads the mask at `path`, choosing the decoder from the file extension.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be read,
/// [`CliError::Mask`] for malformed text masks, [`CliError::Image`] for
/// undecodable rasters, and [`CliError::Core`] for unusable dimensions.
#[instrument(
    name = "cli.load_mask",
    err,
    fields(path = %path.display(), format = field::Empty, foreground = field::Empty),
)]
pub fn load_mask(path: &Path) -> Result<BinaryImage, CliError> {
    let span = Span::current();
    let image = if is_text_mask(path) {
        span.record("format", "text");
        let source = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_text_mask(&source).map_err(|source| CliError::Mask {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        span.record("format", "raster");
        decode_raster(path)?
    };
    span.record("foreground", image.foreground_count());
    debug!(
        height = image.dimensions().height(),
        width = image.dimensions().width(),
        "mask loaded"
    );
    Ok(image)
}

fn is_text_mask(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("mask"))
}

fn decode_raster(path: &Path) -> Result<BinaryImage, CliError> {
    let luma = image::open(path)
        .map_err(|source| CliError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_luma8();
    let (width, height) = luma.dimensions();
    let height = usize::try_from(height).unwrap_or(usize::MAX);
    let width = usize::try_from(width).unwrap_or(usize::MAX);
    Ok(BinaryImage::new(height, width, luma.into_raw())?)
}

/// Parses a text grid of `0`/`1` characters.
///
/// Whitespace and commas inside a row are ignored and blank lines are
/// skipped.
///
/// # Errors
/// Returns [`MaskError`] for empty input, unknown characters, ragged rows,
/// or a grid too large to label.
///
/// # Examples
/// ```
/// use ccl_cli::cli::parse_text_mask;
///
/// let image = parse_text_mask("1 0 1\n\n0,1,0\n")?;
/// assert_eq!(image.foreground_count(), 3);
/// # Ok::<(), ccl_cli::cli::MaskError>(())
/// ```
pub fn parse_text_mask(source: &str) -> Result<BinaryImage, MaskError> {
    let mut rows: Vec<Vec<u8>> = Vec::new();
    for (line_index, line) in source.lines().enumerate() {
        let line_number = line_index + 1;
        let mut row = Vec::with_capacity(line.len());
        for (char_index, found) in line.chars().enumerate() {
            match found {
                '0' => row.push(0),
                '1' => row.push(1),
                ',' => {}
                other if other.is_whitespace() => {}
                other => {
                    return Err(MaskError::InvalidCharacter {
                        line: line_number,
                        column: char_index + 1,
                        found: other,
                    });
                }
            }
        }
        if row.is_empty() {
            continue;
        }
        if let Some(expected) = rows.first().map(Vec::len)
            && expected != row.len()
        {
            return Err(MaskError::RaggedRow {
                line: line_number,
                expected,
                actual: row.len(),
            });
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(MaskError::Empty);
    }
    Ok(BinaryImage::from_rows(&rows)?)
}
