//! Per-line and per-file GUID extraction.
//!
//! Drives the line normalizer and both grammars over the text of one file.

use guidxref_id::GuidIdError;
use thiserror::Error;

use crate::grammar::{literal, registry};
use crate::lines::logical_lines;
use crate::record::GuidRecord;

/// A logical line whose GUID literal could not be canonicalized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct MalformedLine {
    /// 1-based number of the first physical line of the declaration.
    pub line: usize,
    #[source]
    pub source: GuidIdError,
}

/// Apply both grammars to one logical line.
///
/// Returns zero, one or two records (registry form first).
///
/// # Errors
/// Returns the field error if the line holds a structured literal with an
/// out-of-range field.
pub fn extract_line(line: &str, file_name: &str) -> Result<Vec<GuidRecord>, GuidIdError> {
    let mut records = Vec::new();
    if let Some(record) = registry::extract(line, file_name) {
        records.push(record);
    }
    if let Some(record) = literal::extract(line, file_name)? {
        records.push(record);
    }
    Ok(records)
}

/// Extract every record from the full text of one file.
///
/// `file_name` is the bare file name (no directories); it names records
/// that carry no identifier of their own.
///
/// # Errors
/// Stops at the first malformed line and reports its line number.
pub fn extract_records(content: &str, file_name: &str) -> Result<Vec<GuidRecord>, MalformedLine> {
    let mut records = Vec::new();
    for line in logical_lines(content.lines()) {
        let found = extract_line(&line.text, file_name).map_err(|source| MalformedLine {
            line: line.number,
            source,
        })?;
        for record in &found {
            tracing::debug!(file = file_name, line = line.number, %record, "found GUID");
        }
        records.extend(found);
    }
    Ok(records)
}
