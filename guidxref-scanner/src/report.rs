//! Scan report types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::record::OutputSet;
use crate::strategy::SourceKind;

/// Number of files scanned per source kind.
///
/// Every configured kind is present, zero or not, so summaries list the same
/// rows on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileTypeTally(BTreeMap<SourceKind, usize>);

impl FileTypeTally {
    #[must_use]
    pub fn new(kinds: &[SourceKind]) -> Self {
        Self(kinds.iter().map(|&kind| (kind, 0)).collect())
    }

    /// Count one more file of `kind`.
    pub fn record(&mut self, kind: SourceKind) {
        *self.0.entry(kind).or_insert(0) += 1;
    }

    #[must_use]
    pub fn count(&self, kind: SourceKind) -> usize {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    /// Total files across all kinds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// `(kind, count)` pairs in summary order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceKind, usize)> + '_ {
        self.0.iter().map(|(&kind, &count)| (kind, count))
    }
}

/// Result of a scan run.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ScanReport {
    /// The scanned root, as given.
    pub root: PathBuf,
    /// Files scanned per source kind.
    pub tally: FileTypeTally,
    /// Number of files that contributed at least one record.
    pub files_with_guids: usize,
    /// Records found before deduplication.
    pub guids_found: usize,
    /// Deduplicated, sorted records.
    pub records: OutputSet,
}

impl ScanReport {
    #[must_use]
    pub fn new(root: PathBuf, kinds: &[SourceKind]) -> Self {
        Self {
            root,
            tally: FileTypeTally::new(kinds),
            files_with_guids: 0,
            guids_found: 0,
            records: OutputSet::new(),
        }
    }

    /// Total number of files scanned.
    #[must_use]
    pub fn scanned_files(&self) -> usize {
        self.tally.total()
    }

    /// Number of unique records that will be written.
    #[must_use]
    pub fn guids_written(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_zero_initialized_in_kind_order() {
        let tally = FileTypeTally::new(&[SourceKind::BuildDescription, SourceKind::Header]);
        let rows: Vec<_> = tally.iter().collect();
        assert_eq!(
            rows,
            vec![(SourceKind::Header, 0), (SourceKind::BuildDescription, 0)]
        );
    }

    #[test]
    fn test_tally_record_and_total() {
        let mut tally = FileTypeTally::new(&SourceKind::ALL);
        tally.record(SourceKind::Header);
        tally.record(SourceKind::Header);
        tally.record(SourceKind::ModuleInformation);
        assert_eq!(tally.count(SourceKind::Header), 2);
        assert_eq!(tally.count(SourceKind::PackageDeclaration), 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_tally_serializes_by_extension() {
        let mut tally = FileTypeTally::new(&[SourceKind::Header]);
        tally.record(SourceKind::Header);
        let json = serde_json::to_string(&tally).unwrap_or_default();
        assert_eq!(json, r#"{".h":1}"#);
    }
}
