//! Scan source strategies.
//!
//! Only the filesystem strategy exists today (`fs` module), driven by the
//! concrete `scan_fs()` API.

use std::fmt;

use serde::{Serialize, Serializer};

pub mod fs;

/// Recognized firmware source file kinds.
///
/// Declaration order is the order used in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    /// C header (`.h`).
    Header,
    /// Package declaration (`.dec`).
    PackageDeclaration,
    /// Module information (`.inf`).
    ModuleInformation,
    /// Platform build description (`.dsc`).
    BuildDescription,
}

impl SourceKind {
    pub const ALL: [Self; 4] = [
        Self::Header,
        Self::PackageDeclaration,
        Self::ModuleInformation,
        Self::BuildDescription,
    ];

    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Header => "h",
            Self::PackageDeclaration => "dec",
            Self::ModuleInformation => "inf",
            Self::BuildDescription => "dsc",
        }
    }

    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

impl Serialize for SourceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(SourceKind::from_extension("h"), Some(SourceKind::Header));
        assert_eq!(
            SourceKind::from_extension("dsc"),
            Some(SourceKind::BuildDescription)
        );
        assert_eq!(SourceKind::from_extension("c"), None);
        assert_eq!(SourceKind::from_extension("H"), None);
    }

    #[test]
    fn test_display_has_dot() {
        assert_eq!(SourceKind::PackageDeclaration.to_string(), ".dec");
    }
}
