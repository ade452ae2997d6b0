use std::borrow::Cow;
use std::fmt;

use crate::config::LexerConfig;
use crate::position::SourcePosition;
use crate::source::Source;
use crate::token::Token;

/// Which part of a token a check compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchCategory {
    Value,
    Kind,
    Subkind,
}

impl MatchCategory {
    fn field<'a>(self, token: &Token<'a>) -> &'a str {
        match self {
            Self::Value => token.value(),
            Self::Kind => token.kind,
            Self::Subkind => token.subkind,
        }
    }
}

impl fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::Kind => write!(f, "kind"),
            Self::Subkind => write!(f, "subkind"),
        }
    }
}

/// Error produced while consuming a token stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("unexpected end of tokens in {name}")]
    EndOfTokens { name: String },
    #[error(
        "unexpected token {category} {found:?} at line {}, column {}, expected {}",
        position.line,
        position.column,
        expected.join(" or ")
    )]
    UnexpectedToken {
        category: MatchCategory,
        expected: Vec<String>,
        found: String,
        position: SourcePosition,
    },
}

/// What an unexpected-token handler is told about a failed `expect_*`.
#[derive(Debug)]
pub struct Unexpected<'t, 'a> {
    pub source: &'a Source,
    pub token: &'t Token<'a>,
    pub expected: &'t [&'t str],
    pub category: MatchCategory,
    /// The compared part of `token`.
    pub found: &'a str,
}

type UnexpectedHandler<'a> = Box<dyn FnMut(&Unexpected<'_, 'a>) + 'a>;
type EndOfTokensHandler<'a> = Box<dyn Fn(&'a Source) -> Token<'a> + 'a>;

/// A cursor over the tokens of one source.
///
/// Reading past the last token either asks the end-of-tokens handler for
/// a substitute or fails with [`StreamError::EndOfTokens`]. A failed
/// `expect_*` either reports to the unexpected-token handler and leaves
/// the cursor in place, or fails with [`StreamError::UnexpectedToken`].
pub struct TokenStream<'a> {
    source: &'a Source,
    tokens: Vec<Token<'a>>,
    index: usize,
    subkind_delimiter: Option<String>,
    on_unexpected: Option<UnexpectedHandler<'a>>,
    on_end_of_tokens: Option<EndOfTokensHandler<'a>>,
}

impl<'a> TokenStream<'a> {
    #[must_use]
    pub fn new(source: &'a Source, tokens: Vec<Token<'a>>) -> Self {
        Self {
            source,
            tokens,
            index: 0,
            subkind_delimiter: None,
            on_unexpected: None,
            on_end_of_tokens: None,
        }
    }

    /// A stream that takes its subkind delimiter from `config`.
    #[must_use]
    pub fn with_config(source: &'a Source, tokens: Vec<Token<'a>>, config: &LexerConfig) -> Self {
        let mut stream = Self::new(source, tokens);
        stream.subkind_delimiter.clone_from(&config.subkind_delimiter);
        stream
    }

    #[must_use]
    pub fn with_subkind_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.subkind_delimiter = Some(delimiter.into());
        self
    }

    #[must_use]
    pub fn on_unexpected(mut self, handler: impl FnMut(&Unexpected<'_, 'a>) + 'a) -> Self {
        self.on_unexpected = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_end_of_tokens(mut self, handler: impl Fn(&'a Source) -> Token<'a> + 'a) -> Self {
        self.on_end_of_tokens = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether the cursor has moved past the last token.
    #[must_use]
    pub fn eot(&self) -> bool {
        self.index >= self.tokens.len()
    }

    #[must_use]
    pub const fn source(&self) -> &'a Source {
        self.source
    }

    /// Cursor index, for diagnostics.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.index
    }

    /// The token under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::EndOfTokens`] past the end when no
    /// end-of-tokens handler is set.
    pub fn current(&self) -> Result<Token<'a>, StreamError> {
        if let Some(token) = self.tokens.get(self.index) {
            return Ok(token.clone());
        }
        self.on_end_of_tokens.as_ref().map_or_else(
            || {
                Err(StreamError::EndOfTokens {
                    name: self.source.name().to_string(),
                })
            },
            |handler| Ok(handler(self.source)),
        )
    }

    /// The token `offset` places after the cursor, without moving.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.index.checked_add(offset)?)
    }

    pub fn location(&self) -> Result<SourcePosition, StreamError> {
        self.current().map(|token| token.location)
    }

    pub fn value(&self) -> Result<&'a str, StreamError> {
        self.current().map(|token| token.value())
    }

    /// Kind and subkind of the current token joined by the stream's
    /// subkind delimiter, e.g. `KEYWORD:ACCESS`.
    pub fn composite_kind(&self) -> Result<Cow<'a, str>, StreamError> {
        let token = self.current()?;
        Ok(token.display_kind(self.subkind_delimiter.as_deref()))
    }

    pub fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    /// The current token; the cursor moves past it.
    pub fn get(&mut self) -> Result<Token<'a>, StreamError> {
        let token = self.current()?;
        self.advance();
        Ok(token)
    }

    #[must_use]
    pub fn is_token(&self, values: &[&str]) -> bool {
        self.is(MatchCategory::Value, values)
    }

    pub fn match_token(&mut self, values: &[&str]) -> bool {
        self.match_category(MatchCategory::Value, values)
    }

    pub fn expect_token(&mut self, values: &[&str]) -> Result<bool, StreamError> {
        self.expect(MatchCategory::Value, values)
    }

    #[must_use]
    pub fn is_kind(&self, kinds: &[&str]) -> bool {
        self.is(MatchCategory::Kind, kinds)
    }

    pub fn match_kind(&mut self, kinds: &[&str]) -> bool {
        self.match_category(MatchCategory::Kind, kinds)
    }

    pub fn expect_kind(&mut self, kinds: &[&str]) -> Result<bool, StreamError> {
        self.expect(MatchCategory::Kind, kinds)
    }

    #[must_use]
    pub fn is_subkind(&self, subkinds: &[&str]) -> bool {
        self.is(MatchCategory::Subkind, subkinds)
    }

    pub fn match_subkind(&mut self, subkinds: &[&str]) -> bool {
        self.match_category(MatchCategory::Subkind, subkinds)
    }

    pub fn expect_subkind(&mut self, subkinds: &[&str]) -> Result<bool, StreamError> {
        self.expect(MatchCategory::Subkind, subkinds)
    }

    fn is(&self, category: MatchCategory, expected: &[&str]) -> bool {
        self.current()
            .is_ok_and(|token| expected.contains(&category.field(&token)))
    }

    fn match_category(&mut self, category: MatchCategory, expected: &[&str]) -> bool {
        let matched = self.is(category, expected);
        if matched {
            self.advance();
        }
        matched
    }

    /// `Ok(true)` and advance on a match. On a mismatch the handler, if
    /// any, is called once and `Ok(false)` returned with the cursor left
    /// in place.
    fn expect(&mut self, category: MatchCategory, expected: &[&str]) -> Result<bool, StreamError> {
        let token = self.current()?;
        let found = category.field(&token);
        if expected.contains(&found) {
            self.advance();
            return Ok(true);
        }

        tracing::debug!(%category, found, at = %token.location, "unexpected token");

        if let Some(handler) = self.on_unexpected.as_mut() {
            handler(&Unexpected {
                source: self.source,
                token: &token,
                expected,
                category,
                found,
            });
            return Ok(false);
        }

        Err(StreamError::UnexpectedToken {
            category,
            expected: expected.iter().map(ToString::to_string).collect(),
            found: found.to_string(),
            position: token.location,
        })
    }
}

impl fmt::Debug for TokenStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStream")
            .field("source", &self.source.name())
            .field("index", &self.index)
            .field("len", &self.tokens.len())
            .field("subkind_delimiter", &self.subkind_delimiter)
            .finish_non_exhaustive()
    }
}
