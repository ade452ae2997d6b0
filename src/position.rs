use std::fmt;
use std::ops::Range;

use crate::source::Source;

/// A point in a source text.
///
/// `index` is a 0-based byte offset, `line` and `column` are 1-based and
/// count characters. The bounds of the line containing `index` are kept
/// alongside so that diagnostics can show the offending line without
/// rescanning the text.
///
/// Positions are plain values: copying one yields an independent
/// snapshot of the scanner's cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub index: usize,
    pub line: usize,
    pub column: usize,
    line_start: usize,
    line_end: usize,
}

impl SourcePosition {
    /// The position of the first character of `text`.
    #[must_use]
    pub fn start(text: &str) -> Self {
        Self {
            index: 0,
            line: 1,
            column: 1,
            line_start: 0,
            line_end: line_end(text, 0),
        }
    }

    /// Step over `ch`, the character currently under the cursor.
    ///
    /// Crossing a newline moves to column 1 of the next line and
    /// recomputes the line bounds from `text`.
    pub fn advance(&mut self, ch: char, text: &str) {
        self.index += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
            self.line_start = self.index;
            self.line_end = line_end(text, self.index);
        } else {
            self.column += 1;
        }
    }

    /// Byte range of the current line, newline excluded.
    #[must_use]
    pub const fn line_bounds(&self) -> Range<usize> {
        self.line_start..self.line_end
    }

    /// Text of the line this position is on.
    #[must_use]
    pub fn source_line<'s>(&self, source: &'s Source) -> Option<&'s str> {
        source.slice(self.line_bounds())
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

fn line_end(text: &str, from: usize) -> usize {
    text.get(from..)
        .and_then(|rest| rest.find('\n'))
        .map_or(text.len(), |offset| from + offset)
}
