//! GUID declaration grammars.
//!
//! Each grammar is an independent rule over one logical line:
//! - `registry`: dash-delimited `8-4-4-4-12` text (`FILE_GUID = ...` in INF/DSC files)
//! - `literal`: brace initializer with eleven `0x` fields (`#define` in headers, DEC entries)
//!
//! A line may satisfy both; callers emit one record per matching grammar.

use std::sync::LazyLock;

use regex::Regex;

pub mod literal;
pub mod registry;

/// Leading `#define` directive, tolerant of `#  define` spacing.
static DEFINE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^\s*#\s*define\b") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid define directive regex: {err}"),
    }
});

/// Remove a leading `#define` directive, if any.
#[must_use]
pub fn strip_define(line: &str) -> &str {
    DEFINE_DIRECTIVE
        .find(line)
        .map_or(line, |m| &line[m.end()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_define_directive() {
        assert_eq!(strip_define("  #  define X {"), " X {");
        assert_eq!(strip_define("#defineX"), "#defineX");
        assert_eq!(strip_define("X #define"), "X #define");
    }
}
