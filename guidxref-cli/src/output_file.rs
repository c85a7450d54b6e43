//! Output file naming.
//!
//! Each run writes a new `guidrefNN.txt`; earlier results are never
//! overwritten.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use tracing::debug;

/// Number of candidate names, `guidref00.txt` through `guidref98.txt`.
pub const MAX_OUTPUT_FILES: usize = 99;

pub fn output_name(index: usize) -> String {
    format!("guidref{index:02}.txt")
}

/// Create the first free `guidrefNN.txt` in `dir`, creating `dir` if needed.
///
/// Names are claimed with create-new semantics, so a file appearing between
/// runs is never clobbered.
pub fn create_next(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir)
        .map_err(|e| anyhow!("failed to create output directory {}: {e}", dir.display()))?;

    for index in 0..MAX_OUTPUT_FILES {
        let path = dir.join(output_name(index));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                debug!(path = %path.display(), "created output file");
                return Ok((path, file));
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(anyhow!("failed to create {}: {e}", path.display()));
            }
        }
    }

    bail!(
        "no free output file name in {} ({} through {} all exist)",
        dir.display(),
        output_name(0),
        output_name(MAX_OUTPUT_FILES - 1)
    )
}
