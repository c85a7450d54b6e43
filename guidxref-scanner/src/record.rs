//! Cross-reference records and the deduplicated output set.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt;
use std::iter;

use guidxref_id::Guid;
use serde::{Serialize, Serializer};

/// One GUID declaration found in the tree.
///
/// Serialized as `"<GUID>  <name>"`. The GUID leads so that sorting groups
/// declarations by value rather than by name.
///
/// Records order exactly as their output lines (terminator included) compare
/// byte-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuidRecord {
    guid: Guid,
    name: String,
}

impl GuidRecord {
    #[must_use]
    pub fn new(guid: Guid, name: impl Into<String>) -> Self {
        Self {
            guid,
            name: name.into(),
        }
    }

    #[must_use]
    pub const fn guid(&self) -> Guid {
        self.guid
    }

    /// The record as one output line, terminator included.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for GuidRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.guid, self.name)
    }
}

/// Bytes of the output line after the GUID and separator.
fn line_tail(name: &str) -> impl Iterator<Item = u8> + '_ {
    name.bytes().chain(iter::once(b'\n'))
}

impl Ord for GuidRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.guid
            .cmp(&other.guid)
            .then_with(|| line_tail(&self.name).cmp(line_tail(&other.name)))
    }
}

impl PartialOrd for GuidRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for GuidRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Deduplicated, sorted collection of records.
///
/// Iteration yields records in ascending output-line order, and two records
/// are equal exactly when their lines are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutputSet {
    records: BTreeSet<GuidRecord>,
}

impl OutputSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; returns `false` if an identical line was already present.
    pub fn insert(&mut self, record: GuidRecord) -> bool {
        self.records.insert(record)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending line order.
    pub fn iter(&self) -> btree_set::Iter<'_, GuidRecord> {
        self.records.iter()
    }
}

impl Extend<GuidRecord> for OutputSet {
    fn extend<T: IntoIterator<Item = GuidRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl FromIterator<GuidRecord> for OutputSet {
    fn from_iter<T: IntoIterator<Item = GuidRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OutputSet {
    type Item = &'a GuidRecord;
    type IntoIter = btree_set::Iter<'a, GuidRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
