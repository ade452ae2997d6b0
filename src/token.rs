use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use crate::position::SourcePosition;
use crate::source::Source;

/// A single token with its classification and the source range it covers.
///
/// `kind` and `subkind` borrow the names from the configuration that
/// produced the token; the text itself is read back from `source`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub source: &'a Source,
    /// Position of the first character.
    pub location: SourcePosition,
    pub kind: &'a str,
    /// Empty when the kind has no finer classification.
    pub subkind: &'a str,
    /// Byte range into the source text.
    pub range: Range<usize>,
    /// Numeric base, 10 unless a base prefix was used.
    pub base: u32,
    /// Trailing letters of a decimal literal, e.g. `u8` in `255u8`.
    pub suffix: &'a str,
}

impl<'a> Token<'a> {
    #[must_use]
    pub const fn new(
        source: &'a Source,
        location: SourcePosition,
        kind: &'a str,
        range: Range<usize>,
    ) -> Self {
        Self {
            source,
            location,
            kind,
            subkind: "",
            range,
            base: 10,
            suffix: "",
        }
    }

    #[must_use]
    pub const fn with_subkind(mut self, subkind: &'a str) -> Self {
        self.subkind = subkind;
        self
    }

    #[must_use]
    pub const fn with_number(mut self, base: u32, suffix: &'a str) -> Self {
        self.base = base;
        self.suffix = suffix;
        self
    }

    /// The source text covered by this token.
    #[must_use]
    pub fn value(&self) -> &'a str {
        self.source.slice(self.range.clone()).unwrap_or_default()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.range.start >= self.range.end
    }

    /// The kind as shown to users: `kind`, or `kind + delimiter + subkind`
    /// when a delimiter is given and the subkind adds information.
    #[must_use]
    pub fn display_kind(&self, delimiter: Option<&str>) -> Cow<'a, str> {
        match delimiter {
            Some(delim) if !self.subkind.is_empty() && self.subkind != self.kind => {
                Cow::Owned(format!("{}{delim}{}", self.kind, self.subkind))
            }
            _ => Cow::Borrowed(self.kind),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("source", &self.source.name())
            .field("location", &self.location)
            .field("kind", &self.kind)
            .field("subkind", &self.subkind)
            .field("value", &self.value())
            .field("base", &self.base)
            .field("suffix", &self.suffix)
            .finish()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ {} {} {:?} {} ]",
            self.kind,
            self.subkind,
            self.value(),
            self.location
        )
    }
}
