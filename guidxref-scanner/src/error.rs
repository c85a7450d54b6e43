//! Error types for GUID scanning.
//!
//! Every variant aborts the scan. There is no skip-and-continue mode.

use std::path::PathBuf;

use guidxref_id::GuidIdError;
use serde::Serialize;
use thiserror::Error;

/// Broad classification of a [`ScanError`], used by callers to choose an
/// exit status.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// The scan root or scan options are unusable.
    InvalidInput,
    /// A file or directory could not be read.
    Io,
    /// A GUID initializer field does not fit its canonical width.
    MalformedGuid,
}

/// A fatal scan failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("Invalid directory name: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The scan root exists but is not a directory.
    #[error("Not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    /// An exclude glob could not be parsed.
    #[error("Invalid exclude glob pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A source file could not be opened or read.
    #[error("{} could not be opened, abort! ({source})", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed (permission denied, symlink loop, ...).
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A structured GUID literal has a field too large for its width.
    #[error("{}:{line}: {source}", path.display())]
    MalformedGuid {
        path: PathBuf,
        /// 1-based number of the first physical line of the declaration.
        line: usize,
        #[source]
        source: GuidIdError,
    },
}

impl ScanError {
    #[must_use]
    pub const fn kind(&self) -> ScanErrorKind {
        match self {
            Self::RootNotFound(_)
            | Self::RootNotDirectory(_)
            | Self::InvalidExcludePattern { .. } => ScanErrorKind::InvalidInput,
            Self::Io { .. } | Self::Walk(_) => ScanErrorKind::Io,
            Self::MalformedGuid { .. } => ScanErrorKind::MalformedGuid,
        }
    }
}
