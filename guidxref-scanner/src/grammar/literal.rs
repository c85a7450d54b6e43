//! Structured-literal form:
//! `{ 0xbf9d5465, 0x4fc3, 0x4021, { 0x92, 0x5, 0xfa, 0x5d, 0x3f, 0xe2, 0xa5, 0x95 } }`.
//!
//! Field digit counts vary (`0x5` is common for a byte) and case is mixed;
//! the inner `Data4` braces are optional.

use std::sync::LazyLock;

use guidxref_id::{FIELD_COUNT, Guid, GuidIdError};
use regex::Regex;

use super::strip_define;
use crate::record::GuidRecord;

/// Brace initializer with eleven `0x` fields. Each capture keeps its `0x`
/// prefix so that error messages quote the field as written.
static LITERAL_GUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        r"\{\s*",
        r"(0[xX][0-9a-fA-F]+)\s*,\s*", // Data1
        r"(0[xX][0-9a-fA-F]+)\s*,\s*", // Data2
        r"(0[xX][0-9a-fA-F]+)\s*,\s*", // Data3
        r"\{?\s*",                     // optional Data4 brace
        r"(0[xX][0-9a-fA-F]+)\s*,\s*",
        r"(0[xX][0-9a-fA-F]+)\s*,\s*",
        r"(0[xX][0-9a-fA-F]+)\s*,\s*",
        r"(0[xX][0-9a-fA-F]+)\s*,\s*",
        r"(0[xX][0-9a-fA-F]+)\s*,\s*",
        r"(0[xX][0-9a-fA-F]+)\s*,\s*",
        r"(0[xX][0-9a-fA-F]+)\s*,\s*",
        r"(0[xX][0-9a-fA-F]+)\s*",
        r"\}?\s*\}",
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid literal GUID regex: {err}"),
    }
});

/// A structured GUID literal located on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralMatch<'a> {
    /// The eleven fields as written, `0x` prefix included.
    pub fields: [&'a str; FIELD_COUNT],
    /// Text before the literal.
    pub prefix: &'a str,
    /// Text after the literal.
    pub suffix: &'a str,
}

/// Find the first structured GUID literal on `line`.
#[must_use]
pub fn find_literal_guid(line: &str) -> Option<LiteralMatch<'_>> {
    let caps = LITERAL_GUID_PATTERN.captures(line)?;
    let whole = caps.get(0)?;

    let mut fields = [""; FIELD_COUNT];
    for (i, slot) in fields.iter_mut().enumerate() {
        *slot = caps.get(i + 1)?.as_str();
    }

    Some(LiteralMatch {
        fields,
        prefix: &line[..whole.start()],
        suffix: &line[whole.end()..],
    })
}

/// The identifier around the literal: the text before it, else the text
/// after it (`{ ... }, gFooGuid` style tables).
fn declared_name<'a>(prefix: &'a str, suffix: &'a str) -> Option<&'a str> {
    let before = prefix.trim_matches(|c: char| c.is_whitespace() || c == '=');
    if !before.is_empty() {
        return Some(before);
    }
    let after =
        suffix.trim_matches(|c: char| c.is_whitespace() || matches!(c, '=' | ';' | ','));
    (!after.is_empty()).then_some(after)
}

/// Extract a structured-literal record from one logical line.
///
/// # Errors
/// Returns [`GuidIdError::FieldOverflow`] if a field has more significant
/// digits than its canonical width.
pub fn extract(line: &str, file_name: &str) -> Result<Option<GuidRecord>, GuidIdError> {
    let body = strip_define(line);
    let Some(found) = find_literal_guid(body) else {
        return Ok(None);
    };

    let guid = Guid::from_fields(&found.fields)?;
    let name = declared_name(found.prefix, found.suffix).unwrap_or(file_name);
    Ok(Some(GuidRecord::new(guid, name)))
}
