//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary mask files and assert error handling
//! behaviour. These helpers keep the test cases concise and consistent.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

use super::{
    Algorithm, Cli, CliError, Command, CompareCommand, ConnectivityArg, LabelCommand, run_cli,
};

/// Two blocks of three and four pixels separated by a diagonal gap.
pub(super) const BLOCKS: &str = "1100\n1000\n0011\n0011\n";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_mask_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn label_command(path: PathBuf, algorithm: Algorithm) -> LabelCommand {
    LabelCommand {
        path,
        connectivity: ConnectivityArg::Four,
        algorithm,
        shuffle_seed: None,
        labels_csv: None,
    }
}

pub(super) fn compare_cli(path: PathBuf, connectivity: ConnectivityArg) -> Cli {
    Cli {
        command: Command::Compare(CompareCommand {
            path,
            connectivity,
            shuffle_seed: Some(7),
        }),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
