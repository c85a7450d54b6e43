//! Registry (dash) form: `A5102DBA-C528-47BD-A992-A2906ED0D22B`.

use std::sync::LazyLock;

use guidxref_id::Guid;
use regex::Regex;

use super::strip_define;
use crate::record::GuidRecord;

/// Five hex groups of widths 8-4-4-4-12, any case, anywhere on the line.
static REGISTRY_GUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        r"(?i)",
        r"[0-9a-f]{8}-",
        r"[0-9a-f]{4}-",
        r"[0-9a-f]{4}-",
        r"[0-9a-f]{4}-",
        r"[0-9a-f]{12}",
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid registry GUID regex: {err}"),
    }
});

/// Characters dropped from the end of the descriptive text, e.g. the `{`
/// in `// {8BE4DF61-...}` or the `("` in `GUID("...")`.
const OPENING_PUNCTUATION: &[char] = &['{', '(', '"', '\'', ' ', '\t'];

/// A dash-form GUID located on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryMatch<'a> {
    /// Everything on the line before the GUID.
    pub prefix: &'a str,
    /// The GUID text as written.
    pub text: &'a str,
}

/// Find the first dash-form GUID on `line`.
///
/// A candidate directly preceded or followed by another hex digit is a
/// slice of a longer hex run and is skipped.
#[must_use]
pub fn find_registry_guid(line: &str) -> Option<RegistryMatch<'_>> {
    REGISTRY_GUID_PATTERN
        .find_iter(line)
        .find(|m| !is_embedded(line, m.start(), m.end()))
        .map(|m| RegistryMatch {
            prefix: &line[..m.start()],
            text: m.as_str(),
        })
}

fn is_embedded(line: &str, start: usize, end: usize) -> bool {
    let hex_before = line[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_hexdigit());
    let hex_after = line[end..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_hexdigit());
    hex_before || hex_after
}

/// Text that opens or closes with a `//` marker is commented out.
fn is_comment_text(context: &str) -> bool {
    context.starts_with("//") || context.ends_with("//")
}

/// Extract a registry-form record from one logical line.
///
/// With assignment syntax before the GUID (`FILE_GUID = ...`) the record is
/// named after the file. Otherwise the name is the file name followed by the
/// text preceding the GUID, minus any `#define` directive. Lines ending in a
/// `//` marker and GUIDs inside `//` comment text yield nothing.
#[must_use]
pub fn extract(line: &str, file_name: &str) -> Option<GuidRecord> {
    let found = find_registry_guid(line)?;
    let guid = Guid::parse_registry(found.text).ok()?;

    let context = strip_define(found.prefix).trim();
    if is_comment_text(context) || line.trim_end().ends_with("//") {
        tracing::debug!(%guid, file = file_name, "ignoring GUID in comment text");
        return None;
    }

    if found.prefix.contains('=') {
        return Some(GuidRecord::new(guid, file_name));
    }

    let context = context.trim_end_matches(OPENING_PUNCTUATION);
    if context.is_empty() {
        Some(GuidRecord::new(guid, file_name))
    } else {
        Some(GuidRecord::new(guid, format!("{file_name} {context}")))
    }
}
