//! CSV export of label grids.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ccl_core::LabelMap;
use tracing::{debug, instrument};

use super::commands::CliError;

/// Writes one comma-separated line of labels per image row.
///
/// # Errors
/// Returns [`io::Error`] if writing fails.
///
/// # Examples
/// ```
/// use ccl_cli::cli::render_labels_csv;
/// use ccl_core::{BinaryImage, Connectivity, label_two_pass};
///
/// let image = BinaryImage::from_rows(&[[1, 0], [0, 1]])?;
/// let labels = label_two_pass(&image, Connectivity::Four)?;
/// let mut out = Vec::new();
/// render_labels_csv(&labels, &mut out)?;
/// assert_eq!(String::from_utf8(out)?, "1,0\n0,2\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_labels_csv(labels: &LabelMap, mut writer: impl Write) -> io::Result<()> {
    for row in labels.rows() {
        let mut first = true;
        for label in row {
            if !first {
                writer.write_all(b",")?;
            }
            write!(writer, "{label}")?;
            first = false;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[instrument(name = "cli.export_csv", err, skip(labels), fields(path = %path.display()))]
pub(super) fn write_labels_csv(labels: &LabelMap, path: &Path) -> Result<(), CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    render_labels_csv(labels, &mut writer).map_err(io_error)?;
    writer.flush().map_err(io_error)?;
    debug!(rows = labels.dimensions().height(), "label grid exported");
    Ok(())
}
