use std::fmt;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;

/// Error produced when a source file cannot be read.
#[derive(Debug, thiserror::Error)]
#[error("cannot read {name}: {error}")]
pub struct SourceError {
    pub name: String,
    #[source]
    pub error: io::Error,
}

/// A named source text.
///
/// A source without text is "not loaded": every access on it yields
/// `None` instead of panicking. Indices are byte offsets into the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    name: String,
    text: Option<String>,
}

impl Source {
    /// Create a loaded source from in-memory text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
        }
    }

    /// Create a source that only carries a name.
    #[must_use]
    pub fn unloaded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
        }
    }

    /// Read a source file from disk. A leading UTF-8 BOM is dropped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let mut text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) => return Err(SourceError { name, error }),
        };
        if text.starts_with('\u{FEFF}') {
            text.drain(..'\u{FEFF}'.len_utf8());
        }
        tracing::debug!(source = %name, bytes = text.len(), "loaded source");
        Ok(Self::new(name, text))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.text.is_some()
    }

    /// Length of the text in bytes, zero when not loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.as_ref().map_or(0, String::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The character starting at byte `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<char> {
        self.text.as_deref()?.get(index..)?.chars().next()
    }

    /// The text covered by `range`, if loaded and on character boundaries.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Option<&str> {
        self.text.as_deref()?.get(range)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.text.as_ref().map_or(0, |t| t.chars().count());
        write!(f, "[ '{}' | {count} characters ]", self.name)
    }
}
