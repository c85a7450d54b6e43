//! Filesystem scan source.
//!
//! Discovers recognized source files under the scan root and reads them for
//! the extraction pipeline.
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Skip directories are pruned at any depth, never descended into
//! - Device files, pipes, and sockets are skipped
//! - Any traversal or read failure is returned as an error, never skipped

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::strategy::SourceKind;

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be descended into / visited.
/// The root itself is never filtered.
fn is_included(entry: &DirEntry, skip_dirs: &[String], exclude_patterns: &[Pattern]) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
        && skip_dirs.iter().any(|skip| skip == name)
    {
        return false;
    }
    !matches_exclude(entry.path(), exclude_patterns)
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<Pattern>, ScanError> {
    patterns
        .iter()
        .map(|pat_str| {
            Pattern::new(pat_str).map_err(|source| ScanError::InvalidExcludePattern {
                pattern: pat_str.clone(),
                source,
            })
        })
        .collect()
}

/// Determine the source kind of a file from its extension.
///
/// Only kinds listed in `kinds` are recognized. Matching is case-sensitive.
pub fn source_kind_for(path: &Path, kinds: &[SourceKind]) -> Option<SourceKind> {
    let kind = SourceKind::from_extension(path.extension()?.to_str()?)?;
    kinds.contains(&kind).then_some(kind)
}

/// Find all recognized source files under `config.root`.
///
/// Results are sorted by path so that scans are reproducible.
///
/// # Errors
/// Returns an error for an invalid exclude pattern or on the first
/// directory traversal failure.
pub fn find_files(config: &ScanConfig) -> Result<Vec<(PathBuf, SourceKind)>, ScanError> {
    let exclude_patterns = compile_excludes(&config.exclude)?;
    let mut files = Vec::new();

    let walker = WalkDir::new(&config.root)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .into_iter()
        .filter_entry(|entry| is_included(entry, &config.skip_dirs, &exclude_patterns));

    for entry_result in walker {
        let entry = entry_result?;

        // Only regular files; devices, pipes and sockets report false here.
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(kind) = source_kind_for(entry.path(), &config.kinds) else {
            continue;
        };

        files.push((entry.into_path(), kind));
    }

    files.sort();
    Ok(files)
}

/// Read a source file as text.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected;
/// firmware trees routinely carry Latin-1 comments.
///
/// # Errors
/// Returns [`ScanError::Io`] if the file cannot be opened or read.
pub fn read_source(path: &Path) -> Result<String, ScanError> {
    let bytes = std::fs::read(path).map_err(|source| ScanError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn names(files: &[(PathBuf, SourceKind)], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|(p, _)| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_source_kind_for() {
        let all = SourceKind::ALL;
        assert_eq!(
            source_kind_for(Path::new("a/Foo.inf"), &all),
            Some(SourceKind::ModuleInformation)
        );
        assert_eq!(source_kind_for(Path::new("a/Foo.c"), &all), None);
        assert_eq!(source_kind_for(Path::new("a/Makefile"), &all), None);
        assert_eq!(
            source_kind_for(Path::new("a/Foo.h"), &[SourceKind::BuildDescription]),
            None
        );
    }

    #[test]
    fn test_find_files_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Pkg/Include/Guid/B.h");
        touch(tmp.path(), "Pkg/Pkg.dec");
        touch(tmp.path(), "Pkg/Library/A.inf");
        touch(tmp.path(), "Pkg/Library/A.c");
        touch(tmp.path(), "Platform.dsc");

        let config = ScanConfig::new(tmp.path());
        let files = find_files(&config).unwrap();
        assert_eq!(
            names(&files, tmp.path()),
            vec![
                "Pkg/Include/Guid/B.h",
                "Pkg/Library/A.inf",
                "Pkg/Pkg.dec",
                "Platform.dsc"
            ]
        );
    }

    #[test]
    fn test_find_files_prunes_skip_dirs_at_any_depth() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), ".git/objects/x.h");
        touch(tmp.path(), "Pkg/Build/DEBUG/AutoGen.h");
        touch(tmp.path(), "Pkg/Keep.h");

        let files = find_files(&ScanConfig::new(tmp.path())).unwrap();
        assert_eq!(names(&files, tmp.path()), vec!["Pkg/Keep.h"]);
    }

    #[test]
    fn test_find_files_root_named_like_skip_dir_is_scanned() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Build/Keep.h");

        let files = find_files(&ScanConfig::new(tmp.path().join("Build"))).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_find_files_exclude_pattern() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Pkg/Test/UnitTest.h");
        touch(tmp.path(), "Pkg/Real.h");

        let mut config = ScanConfig::new(tmp.path());
        config.exclude = vec!["Test".to_owned()];
        let files = find_files(&config).unwrap();
        assert_eq!(names(&files, tmp.path()), vec!["Pkg/Real.h"]);
    }

    #[test]
    fn test_find_files_invalid_exclude_pattern() {
        let tmp = TempDir::new().unwrap();
        let mut config = ScanConfig::new(tmp.path());
        config.exclude = vec!["[unclosed".to_owned()];
        let err = find_files(&config).unwrap_err();
        assert!(matches!(err, ScanError::InvalidExcludePattern { .. }));
    }

    #[test]
    fn test_read_source_lossy() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Latin1.h");
        fs::write(&path, b"// Copyright \xa9 Vendor\n#define X 1\n").unwrap();
        let content = read_source(&path).unwrap();
        assert!(content.contains("#define X 1"));
        assert!(content.contains('\u{fffd}'));
    }

    #[test]
    fn test_read_source_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_source(&tmp.path().join("missing.h")).unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
