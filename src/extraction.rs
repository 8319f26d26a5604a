//! Field extraction
//!
//! A line carries a field when it starts with a decimal digit and contains the start marker
//! (`p: `) somewhere before the end marker (` k:`). The field is the text between the two.
//!
//! Only the leftmost occurrence of each marker is considered, and each marker is searched
//! independently over the whole line:
//!
//! ```text
//!     42p: hello k: world     => "hello"
//!     5 k: before p: after    => (nothing, start marker comes after end marker)
//!     1p: k:                  => ""
//! ```
//!
//! Lines that do not qualify are skipped silently. Nothing in this module can fail.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Literal that opens a field.
pub const START_MARKER: &str = "p: ";
/// Literal that closes a field.
pub const END_MARKER: &str = " k:";

static DEFAULT_MARKERS: Markers = Markers {
    start: Cow::Borrowed(START_MARKER),
    end: Cow::Borrowed(END_MARKER),
};

/// The pair of literals delimiting a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub start: Cow<'static, str>,
    pub end: Cow<'static, str>,
}

impl Markers {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Cow::Owned(start.into()),
            end: Cow::Owned(end.into()),
        }
    }

    /// Returns the field of `line`, if it has one.
    pub fn extract_from<'a>(&self, line: &'a str) -> Option<&'a str> {
        if !is_qualifying_line(line) {
            return None;
        }

        let start = line.find(self.start.as_ref())?;
        let end = line.find(self.end.as_ref())?;
        if start >= end {
            return None;
        }

        // Markers may share characters (`p: k:`), in which case the span is empty.
        let value_start = start + self.start.len();
        if value_start >= end {
            return Some("");
        }
        Some(&line[value_start..end])
    }
}

impl Default for Markers {
    fn default() -> Self {
        DEFAULT_MARKERS.clone()
    }
}

/// A line qualifies when its very first character is an ASCII digit.
pub fn is_qualifying_line(line: &str) -> bool {
    line.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Lazy iterator over the fields of a sequence of lines, in line order.
#[derive(Debug, Clone)]
pub struct LineExtractor<'m, I> {
    lines: I,
    markers: &'m Markers,
}

impl<'m, I> LineExtractor<'m, I> {
    pub fn with_markers<'a, L>(lines: L, markers: &'m Markers) -> Self
    where
        L: IntoIterator<IntoIter = I>,
        I: Iterator<Item = &'a str>,
    {
        Self {
            lines: lines.into_iter(),
            markers,
        }
    }
}

impl<'a, I> Iterator for LineExtractor<'_, I>
where
    I: Iterator<Item = &'a str>,
{
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let markers = self.markers;
        self.lines.find_map(|line| markers.extract_from(line))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.lines.size_hint().1)
    }
}

/// Extract fields from `lines` using the default markers.
pub fn extract<'a, L>(lines: L) -> LineExtractor<'static, L::IntoIter>
where
    L: IntoIterator<Item = &'a str>,
{
    LineExtractor::with_markers(lines, &DEFAULT_MARKERS)
}

/// Extract fields from a whole document, split on `\n`.
pub fn extract_document(text: &str) -> LineExtractor<'static, std::str::Split<'_, char>> {
    extract(text.split('\n'))
}

/// Single-line form of [`extract`].
pub fn extract_line(line: &str) -> Option<&str> {
    DEFAULT_MARKERS.extract_from(line)
}

/// A field together with the 1-based number of the line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extraction<'a> {
    pub line: usize,
    pub value: &'a str,
}

/// Like [`LineExtractor`], but keeps line numbers.
pub fn extractions<'a, 'm>(
    text: &'a str,
    markers: &'m Markers,
) -> impl Iterator<Item = Extraction<'a>> + 'm
where
    'a: 'm,
{
    text.split('\n')
        .enumerate()
        .filter_map(move |(idx, line)| {
            markers.extract_from(line).map(|value| Extraction {
                line: idx + 1,
                value,
            })
        })
}
