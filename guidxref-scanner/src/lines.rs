//! Logical line reconstruction.
//!
//! C headers commonly split a GUID `#define` over several physical lines
//! with a trailing backslash. The grammars only ever look at one line, so
//! continued lines are merged first.

/// Continuation marker: a backslash immediately before the line terminator.
pub const CONTINUATION: char = '\\';

/// One logical line of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based number of the first physical line this line was built from.
    pub number: usize,
    /// Merged text, without continuation markers or line terminators.
    pub text: String,
}

/// Merge continued physical lines into logical lines.
///
/// `physical` yields lines without terminators (as produced by
/// [`str::lines`]). A line ending in [`CONTINUATION`] loses the marker and
/// absorbs the next line verbatim, repeatedly. A marker on the final line
/// has nothing to join and is left in place.
#[must_use]
pub fn logical_lines<'a, I>(physical: I) -> Vec<SourceLine>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = physical.into_iter().enumerate();
    let mut logical = Vec::new();

    while let Some((index, first)) = lines.next() {
        let mut text = first.to_owned();
        while text.ends_with(CONTINUATION) {
            let Some((_, next)) = lines.next() else {
                tracing::warn!(
                    line = index + 1,
                    "continuation marker on the last line, nothing to join"
                );
                break;
            };
            text.pop();
            text.push_str(next);
        }
        logical.push(SourceLine {
            number: index + 1,
            text,
        });
    }

    logical
}
