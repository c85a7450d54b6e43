//! # guidxref-scanner
//!
//! GUID definition scanner for UEFI firmware source trees.
//!
//! The crate separates the **extraction engine** (line normalizer and the two
//! GUID grammars, input-agnostic) from the **filesystem strategy** that feeds
//! it (`.h`, `.dec`, `.inf` and `.dsc` files under a root directory).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use guidxref_scanner::{ScanConfig, scan_fs};
//!
//! let mut config = ScanConfig::new("edk2");
//! config.exclude = vec!["*Test*".to_owned()];
//!
//! let report = scan_fs(&config).unwrap();
//! println!("Files scanned: {}", report.scanned_files());
//! for record in &report.records {
//!     println!("{record}");
//! }
//! ```

mod config;
mod error;
pub mod extract;
pub mod grammar;
pub mod lines;
pub mod output;
mod record;
mod report;
mod strategy;

pub use config::{DEFAULT_MAX_DEPTH, DEFAULT_SKIP_DIRS, ScanConfig};
pub use error::{ScanError, ScanErrorKind};
pub use extract::{MalformedLine, extract_line, extract_records};
pub use record::{GuidRecord, OutputSet};
pub use report::{FileTypeTally, ScanReport};
pub use strategy::SourceKind;

use std::ffi::OsStr;
use std::path::Path;

use tracing::{debug, info};

use strategy::fs::{find_files, read_source};

/// Scan a source tree for GUID definitions.
///
/// Equivalent to [`scan_fs_with`] with a no-op per-file callback.
///
/// # Errors
///
/// See [`scan_fs_with`].
pub fn scan_fs(config: &ScanConfig) -> Result<ScanReport, ScanError> {
    scan_fs_with(config, |_, _| {})
}

/// Scan a source tree for GUID definitions, reporting progress per file.
///
/// Files are processed one at a time in path order. `on_file` is called with
/// the path and record count of every file that yields at least one record,
/// as soon as that file has been processed.
///
/// # Errors
///
/// Returns an error if the root does not exist or is not a directory, if an
/// exclude pattern is invalid, on any traversal or read failure, and on the
/// first malformed GUID literal. Nothing is skipped.
pub fn scan_fs_with<F>(config: &ScanConfig, mut on_file: F) -> Result<ScanReport, ScanError>
where
    F: FnMut(&Path, usize),
{
    if !config.root.exists() {
        return Err(ScanError::RootNotFound(config.root.clone()));
    }
    if !config.root.is_dir() {
        return Err(ScanError::RootNotDirectory(config.root.clone()));
    }

    let files = find_files(config)?;
    let mut report = ScanReport::new(config.root.clone(), &config.kinds);

    for (path, kind) in &files {
        report.tally.record(*kind);
        info!(path = %path.display(), "found source file");

        debug!(path = %path.display(), "opening source file");
        let content = read_source(path)?;
        let file_name = path
            .file_name()
            .map(OsStr::to_string_lossy)
            .unwrap_or_default();

        let records = extract_records(&content, &file_name).map_err(|e| {
            ScanError::MalformedGuid {
                path: path.clone(),
                line: e.line,
                source: e.source,
            }
        })?;

        if !records.is_empty() {
            on_file(path, records.len());
            report.files_with_guids += 1;
            report.guids_found += records.len();
            report.records.extend(records);
        }
    }

    info!(
        scanned = report.scanned_files(),
        found = report.guids_found,
        unique = report.guids_written(),
        "scan complete"
    );
    Ok(report)
}
