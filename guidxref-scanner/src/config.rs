//! Configuration for GUID scanning.
//!
//! A [`ScanConfig`] is built once by the caller and passed by reference to
//! the scanner; nothing in the crate reads configuration from global state.

use std::path::PathBuf;

use crate::strategy::SourceKind;

/// Directory names skipped anywhere in the tree (version control metadata
/// and EDK II build output).
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".git", ".svn", ".hg", "Build"];

/// Maximum directory traversal depth used by [`ScanConfig::default`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Filesystem scan options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ScanConfig {
    /// Root directory of the source tree. Must exist and be a directory.
    pub root: PathBuf,
    /// Source kinds to scan; files of other kinds are ignored.
    pub kinds: Vec<SourceKind>,
    /// Directory names to skip at any depth (exact, case-sensitive match).
    pub skip_dirs: Vec<String>,
    /// Extra exclude patterns (glob format), matched against the full path
    /// and against the bare file or directory name.
    pub exclude: Vec<String>,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth.
    pub max_depth: usize,
}

impl ScanConfig {
    /// Default configuration rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            kinds: SourceKind::ALL.to_vec(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|&d| d.to_owned()).collect(),
            exclude: Vec::new(),
            follow_links: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
