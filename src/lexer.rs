use std::fmt;

use crate::config::{LexerConfig, NumberBase};
use crate::position::SourcePosition;
use crate::source::Source;
use crate::token::Token;

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter,
    /// Character that does not fit the numeric literal being scanned.
    InvalidNumber,
    /// Run of operator characters longer than the configured maximum.
    OperatorTooLong { max: usize },
    /// Identifier longer than the configured maximum.
    IdentifierTooLong { max: usize },
    /// String literal still open at end of input.
    UnterminatedString,
    /// Block comment still open at end of input.
    UnterminatedComment,
    /// The source has no text to scan.
    SourceNotLoaded,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter => write!(f, "unexpected character"),
            Self::InvalidNumber => {
                write!(f, "unexpected character in numeric literal")
            }
            Self::OperatorTooLong { max } => {
                write!(f, "operator longer than {max} characters")
            }
            Self::IdentifierTooLong { max } => {
                write!(f, "identifier longer than {max} characters")
            }
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
            Self::UnterminatedComment => {
                write!(f, "unterminated block comment")
            }
            Self::SourceNotLoaded => write!(f, "source is not loaded"),
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{kind}{} at line {}, column {}{}",
    describe_char(*ch),
    position.line,
    position.column,
    describe_hint(hint.as_deref())
)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// The offending character, `None` at end of input.
    pub ch: Option<char>,
    pub position: SourcePosition,
    pub hint: Option<String>,
}

impl LexError {
    /// Whether this is one of the "unexpected character" family: an
    /// unclassifiable character, a malformed number or an over-long
    /// operator or identifier.
    #[must_use]
    pub const fn is_unexpected_character(&self) -> bool {
        matches!(
            self.kind,
            LexErrorKind::UnexpectedCharacter
                | LexErrorKind::InvalidNumber
                | LexErrorKind::OperatorTooLong { .. }
                | LexErrorKind::IdentifierTooLong { .. }
        )
    }
}

fn describe_char(ch: Option<char>) -> String {
    ch.map_or_else(String::new, |c| format!(" {c:?}"))
}

fn describe_hint(hint: Option<&str>) -> String {
    hint.map_or_else(String::new, |h| format!(" ({h})"))
}

/// Tokenize `source` with the rules of `config`.
///
/// The result always ends with exactly one end-of-file token.
///
/// # Errors
///
/// Returns the first `LexError` encountered; no partial output is kept.
#[tracing::instrument(level = "debug", skip_all, fields(source = %source.name()))]
pub fn tokenize<'a>(
    config: &'a LexerConfig,
    source: &'a Source,
) -> Result<Vec<Token<'a>>, LexError> {
    let result = Lexer::new(config, source).tokenize();
    match &result {
        Ok(tokens) => tracing::debug!(count = tokens.len(), "tokenized"),
        Err(err) => tracing::debug!(error = %err, "tokenize failed"),
    }
    result
}

struct CommentMarker<'a> {
    kind: &'a str,
    subkind: &'a str,
    include: bool,
    /// Block terminator; `None` for line comments.
    end: Option<&'a str>,
}

/// Single-pass scanner over one source.
pub struct Lexer<'a> {
    config: &'a LexerConfig,
    source: &'a Source,
    text: &'a str,
    pos: SourcePosition,
    ch: Option<char>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(config: &'a LexerConfig, source: &'a Source) -> Self {
        let text = source.text().unwrap_or_default();
        Self {
            config,
            source,
            text,
            pos: SourcePosition::start(text),
            ch: text.chars().next(),
        }
    }

    /// Scan the whole source.
    ///
    /// # Errors
    ///
    /// Returns the first lexical error, or `SourceNotLoaded` when the
    /// source has no text.
    pub fn tokenize(mut self) -> Result<Vec<Token<'a>>, LexError> {
        if !self.source.is_loaded() {
            return Err(self.error(LexErrorKind::SourceNotLoaded, None));
        }

        let config = self.config;
        let mut tokens = Vec::new();

        while let Some(ch) = self.ch {
            if config.whitespace.chars.contains(ch) {
                if let Some(token) = self.scan_whitespace() {
                    tokens.push(token);
                }
            } else if let Some(subkind) = config.string.subkind(ch) {
                tokens.push(self.scan_string(ch, subkind)?);
            } else if ch.is_ascii_digit() {
                tokens.push(self.scan_number()?);
            } else if config.delimiter.chars.contains(ch) {
                tokens.push(self.scan_delimiter());
            } else if config.operator.chars.contains(ch) {
                if let Some(token) = self.scan_operator()? {
                    tokens.push(token);
                }
            } else if ch.is_alphabetic() {
                tokens.push(self.scan_word()?);
            } else {
                return Err(self.error(LexErrorKind::UnexpectedCharacter, None));
            }
        }

        let end = self.text.len();
        tokens.push(Token::new(
            self.source,
            self.pos,
            &config.kinds.eof,
            end..end,
        ));
        Ok(tokens)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.ch {
            self.pos.advance(ch, self.text);
            self.ch = self
                .text
                .get(self.pos.index..)
                .and_then(|rest| rest.chars().next());
        }
    }

    fn slice(&self, start: usize) -> &'a str {
        self.text.get(start..self.pos.index).unwrap_or_default()
    }

    fn token(&self, start: SourcePosition, kind: &'a str) -> Token<'a> {
        Token::new(self.source, start, kind, start.index..self.pos.index)
    }

    fn error(&self, kind: LexErrorKind, hint: Option<String>) -> LexError {
        LexError {
            kind,
            ch: self.ch,
            position: self.pos,
            hint,
        }
    }

    fn is_boundary(&self, ch: char) -> bool {
        let config = self.config;
        config.whitespace.chars.contains(ch)
            || config.delimiter.chars.contains(ch)
            || config.operator.chars.contains(ch)
    }

    fn scan_whitespace(&mut self) -> Option<Token<'a>> {
        let config = self.config;
        let start = self.pos;
        while self.ch.is_some_and(|c| config.whitespace.chars.contains(c)) {
            self.advance();
        }
        config
            .whitespace
            .include
            .then(|| self.token(start, &config.kinds.whitespace))
    }

    fn scan_string(&mut self, quote: char, subkind: &'a str) -> Result<Token<'a>, LexError> {
        let config = self.config;
        let start = self.pos;
        self.advance();

        loop {
            match self.ch {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedString,
                        ch: Some(quote),
                        position: start,
                        hint: None,
                    });
                }
                Some(c) if Some(c) == config.string.escape => {
                    // the escaped character is taken verbatim
                    self.advance();
                    self.advance();
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(_) => self.advance(),
            }
        }

        Ok(self.token(start, &config.kinds.string).with_subkind(subkind))
    }

    fn scan_number(&mut self) -> Result<Token<'a>, LexError> {
        let config = self.config;
        let number = &config.number;
        let start = self.pos;
        let mut alphabet: Option<&'a NumberBase> = None;
        let mut subkind = number.subkind.as_str();
        let mut has_decimal = false;
        let mut prefixed_digits = 0usize;
        let mut suffix_start = None;

        if self.ch == Some('0') {
            self.advance();
            if let Some(base) = self.ch.and_then(|c| number.base(c)) {
                alphabet = Some(base);
                subkind = base.subkind.as_str();
                self.advance();
            }
        }

        while let Some(ch) = self.ch {
            let in_suffix = suffix_start.is_some();
            if in_suffix {
                if !(ch.is_alphanumeric() || ch == '_') {
                    if self.is_boundary(ch) {
                        break;
                    }
                    return Err(self.error(LexErrorKind::InvalidNumber, None));
                }
            } else if alphabet.map_or(ch.is_ascii_digit(), |base| base.accepts(ch)) {
                prefixed_digits += 1;
            } else if Some(ch) == number.separator {
                // grouping marks carry no value
            } else if ch == '.' {
                if let Some(base) = alphabet {
                    let hint = format!("no fractional part in base {}", base.radix());
                    return Err(self.error(LexErrorKind::InvalidNumber, Some(hint)));
                }
                if has_decimal {
                    let hint = "second decimal point".to_string();
                    return Err(self.error(LexErrorKind::InvalidNumber, Some(hint)));
                }
                has_decimal = true;
                subkind = number.float_subkind.as_str();
            } else if alphabet.is_none() && ch.is_alphabetic() {
                suffix_start = Some(self.pos.index);
            } else if self.is_boundary(ch) {
                break;
            } else {
                let hint = alphabet.map(|base| format!("not a base {} digit", base.radix()));
                return Err(self.error(LexErrorKind::InvalidNumber, hint));
            }
            self.advance();
        }

        if alphabet.is_some() && prefixed_digits == 0 {
            let hint = "expected digits after the base prefix".to_string();
            return Err(self.error(LexErrorKind::InvalidNumber, Some(hint)));
        }

        let suffix = suffix_start.map_or("", |s| self.slice(s));
        let base = alphabet.map_or(10, NumberBase::radix);
        Ok(self
            .token(start, &config.kinds.number)
            .with_subkind(subkind)
            .with_number(base, suffix))
    }

    fn scan_delimiter(&mut self) -> Token<'a> {
        let config = self.config;
        let start = self.pos;
        self.advance();
        let subkind = config.token_name(self.slice(start.index)).unwrap_or_default();
        self.token(start, &config.kinds.delimiter).with_subkind(subkind)
    }

    fn scan_operator(&mut self) -> Result<Option<Token<'a>>, LexError> {
        let config = self.config;
        let max = config.operator.max_length;
        let start = self.pos;
        let mut length = 0usize;

        while self.ch.is_some_and(|c| config.operator.chars.contains(c)) {
            length += 1;
            if length > max {
                return Err(self.error(LexErrorKind::OperatorTooLong { max }, None));
            }
            self.advance();
        }

        let operator = self.slice(start.index);
        if let Some(marker) = self.comment_marker(operator) {
            self.scan_comment(start, marker.end)?;
            if !marker.include {
                tracing::trace!(kind = marker.kind, at = %start, "skipped comment");
                return Ok(None);
            }
            let token = self.token(start, marker.kind).with_subkind(marker.subkind);
            return Ok(Some(token));
        }

        let subkind = config.token_name(operator).unwrap_or_default();
        Ok(Some(
            self.token(start, &config.kinds.operator).with_subkind(subkind),
        ))
    }

    /// Match an operator run against the comment markers: documentation
    /// before plain comments, line form before block form.
    fn comment_marker(&self, operator: &str) -> Option<CommentMarker<'a>> {
        let config = self.config;
        let families = [
            (&config.document, config.kinds.documentation.as_str()),
            (&config.comment, config.kinds.comment.as_str()),
        ];
        for (family, kind) in families {
            if family.line.as_deref() == Some(operator) {
                return Some(CommentMarker {
                    kind,
                    subkind: family.subkind.as_str(),
                    include: family.include,
                    end: None,
                });
            }
            if let Some(block) = family.block.as_ref().filter(|b| b.begin == operator) {
                return Some(CommentMarker {
                    kind,
                    subkind: block.subkind.as_str(),
                    include: family.include,
                    end: Some(block.end.as_str()),
                });
            }
        }
        None
    }

    /// Consume a comment body. Line comments stop before the newline;
    /// block comments stop after the terminator.
    fn scan_comment(&mut self, start: SourcePosition, end: Option<&str>) -> Result<(), LexError> {
        let Some(end) = end else {
            while self.ch.is_some_and(|c| c != '\n') {
                self.advance();
            }
            return Ok(());
        };

        let body = self.pos.index;
        while self.ch.is_some() {
            self.advance();
            if self.slice(body).ends_with(end) {
                return Ok(());
            }
        }

        Err(LexError {
            kind: LexErrorKind::UnterminatedComment,
            ch: None,
            position: start,
            hint: Some(format!("expected {end:?}")),
        })
    }

    fn scan_word(&mut self) -> Result<Token<'a>, LexError> {
        let config = self.config;
        let max = config.word.max_length;
        let start = self.pos;
        let mut length = 0usize;

        while self.ch.is_some_and(|c| c.is_alphanumeric() || c == '_') {
            length += 1;
            if length > max {
                return Err(self.error(LexErrorKind::IdentifierTooLong { max }, None));
            }
            self.advance();
        }

        let word = self.slice(start.index);
        let (kind, subkind) = config.keyword.classify(word).map_or(
            (config.kinds.word.as_str(), config.word.subkind.as_str()),
            |subkind| (config.kinds.keyword.as_str(), subkind),
        );
        Ok(self.token(start, kind).with_subkind(subkind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LexerConfig {
        LexerConfig::minilang().expect("minilang config")
    }

    fn triples<'a>(tokens: &[Token<'a>]) -> Vec<(&'a str, &'a str, &'a str)> {
        tokens
            .iter()
            .map(|t| (t.kind, t.subkind, t.value()))
            .collect()
    }

    #[test]
    fn simple_statement() {
        let config = config();
        let source = Source::new("test", "x = 42;");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(
            triples(&tokens),
            [
                ("WORD", "IDENTIFIER", "x"),
                ("OPERATOR", "ASSIGN", "="),
                ("NUMBER", "INTEGER", "42"),
                ("DELIMITER", "SEMICOLON", ";"),
                ("EOF", "", ""),
            ]
        );
    }

    #[test]
    fn keywords_and_subsets() {
        let config = config();
        let source = Source::new("test", "if public u8 null counter");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(
            triples(&tokens),
            [
                ("KEYWORD", "RESERVED", "if"),
                ("KEYWORD", "ACCESS", "public"),
                ("KEYWORD", "PRIMITIVE", "u8"),
                ("KEYWORD", "KEYVALUE", "null"),
                ("WORD", "IDENTIFIER", "counter"),
                ("EOF", "", ""),
            ]
        );
    }

    #[test]
    fn underscore_is_a_word_character() {
        let config = config();
        let source = Source::new("test", "snake_case_name");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].value(), "snake_case_name");
    }

    #[test]
    fn hex_literal() {
        let config = config();
        let source = Source::new("test", "0x1A2F");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens[0].base, 16);
        assert_eq!(tokens[0].subkind, "HEXADECIMAL");
        assert_eq!(tokens[0].value(), "0x1A2F");
    }

    #[test]
    fn uppercase_base_prefix() {
        let config = config();
        let source = Source::new("test", "0B1010");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens[0].base, 2);
        assert_eq!(tokens[0].subkind, "BINARY");
    }

    #[test]
    fn float_literal() {
        let config = config();
        let source = Source::new("test", "3.14");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens[0].subkind, "FLOAT");
        assert_eq!(tokens[0].value(), "3.14");
        assert_eq!(tokens[0].base, 10);
    }

    #[test]
    fn second_decimal_point() {
        let config = config();
        let source = Source::new("test", "3.14.5");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidNumber);
        assert!(err.is_unexpected_character());
        assert_eq!(err.ch, Some('.'));
        assert_eq!(err.position.column, 5);
    }

    #[test]
    fn decimal_point_in_hex() {
        let config = config();
        let source = Source::new("test", "0x1.5");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidNumber);
        assert_eq!(err.position.column, 4);
    }

    #[test]
    fn digit_outside_alphabet() {
        let config = config();
        let source = Source::new("test", "0b102");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.ch, Some('2'));
        assert_eq!(err.hint.as_deref(), Some("not a base 2 digit"));
    }

    #[test]
    fn second_base_prefix() {
        let config = config();
        let source = Source::new("test", "0x1x2");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidNumber);
        assert_eq!(err.ch, Some('x'));
    }

    #[test]
    fn prefix_without_digits() {
        let config = config();
        let source = Source::new("test", "0x;");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidNumber);
        assert_eq!(err.ch, Some(';'));
    }

    #[test]
    fn numeric_suffix() {
        let config = config();
        let source = Source::new("test", "255u8 + 1");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens[0].value(), "255u8");
        assert_eq!(tokens[0].suffix, "u8");
        assert_eq!(tokens[0].subkind, "INTEGER");
        assert_eq!(tokens[1].value(), "+");
    }

    #[test]
    fn separator_is_skipped_but_kept_in_text() {
        let config = config();
        let source = Source::new("test", "1_000_000");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens[0].value(), "1_000_000");
        assert_eq!(tokens[0].suffix, "");
    }

    #[test]
    fn number_ends_at_delimiter() {
        let config = config();
        let source = Source::new("test", "f(1,2)");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        let values: Vec<_> = tokens.iter().map(Token::value).collect();
        assert_eq!(values, ["f", "(", "1", ",", "2", ")", ""]);
    }

    #[test]
    fn number_followed_by_quote() {
        let config = config();
        let source = Source::new("test", "12\"x\"");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidNumber);
        assert_eq!(err.ch, Some('"'));
    }

    #[test]
    fn quoted_string() {
        let config = config();
        let source = Source::new("test", r#"print "hello""#);
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens[1].kind, "STRING");
        assert_eq!(tokens[1].subkind, "DOUBLEQUOTE");
        assert_eq!(tokens[1].value(), r#""hello""#);
    }

    #[test]
    fn string_with_escaped_quote() {
        let config = config();
        let source = Source::new("test", r"'it\'s' x");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens[0].value(), r"'it\'s'");
        assert_eq!(tokens[0].subkind, "SINGLEQUOTE");
        assert_eq!(tokens[1].value(), "x");
    }

    #[test]
    fn other_quote_inside_string() {
        let config = config();
        let source = Source::new("test", "`a \"b\" 'c'`");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].subkind, "TEMPLATE");
    }

    #[test]
    fn unterminated_string() {
        let config = config();
        let source = Source::new("test", "x = \"unclosed");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.position.column, 5);
        assert!(!err.is_unexpected_character());
    }

    #[test]
    fn escape_at_end_of_input() {
        let config = config();
        let source = Source::new("test", "\"abc\\");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn operators_use_naming_table() {
        let config = config();
        let source = Source::new("test", "a->b << c += d");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        let ops: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == "OPERATOR")
            .map(|t| (t.value(), t.subkind))
            .collect();
        assert_eq!(ops, [("->", "POINTER"), ("<<", "LSHIFT"), ("+=", "")]);
    }

    #[test]
    fn operator_too_long() {
        let config = config();
        let source = Source::new("test", "a <<<< b");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::OperatorTooLong { max: 3 });
        assert_eq!(err.position.column, 6);
        assert_eq!(err.ch, Some('<'));
    }

    #[test]
    fn excluded_line_comment() {
        let config = config();
        let source = Source::new("test", "x // note\ny");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(
            triples(&tokens),
            [
                ("WORD", "IDENTIFIER", "x"),
                ("WORD", "IDENTIFIER", "y"),
                ("EOF", "", ""),
            ]
        );
        assert_eq!(tokens[1].location.line, 2);
    }

    #[test]
    fn included_line_comment_stops_before_newline() {
        let mut config = config();
        config.comment.include = true;
        let source = Source::new("test", "x // note\ny");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens[1].kind, "COMMENT");
        assert_eq!(tokens[1].subkind, "LINE");
        assert_eq!(tokens[1].value(), "// note");
    }

    #[test]
    fn documentation_comments() {
        let config = config();
        let source = Source::new("test", "/// line docs\n/** block\ndocs */ f");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(
            triples(&tokens),
            [
                ("DOCUMENTATION", "LINE", "/// line docs"),
                ("DOCUMENTATION", "BLOCK", "/** block\ndocs */"),
                ("WORD", "IDENTIFIER", "f"),
                ("EOF", "", ""),
            ]
        );
        assert_eq!(tokens[2].location.line, 3);
        assert_eq!(tokens[2].location.column, 9);
    }

    #[test]
    fn excluded_block_comment() {
        let config = config();
        let source = Source::new("test", "/* a * b */x");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].value(), "x");
        assert_eq!(tokens[0].location.column, 12);
    }

    // Comment markers are read out of an operator run, so a run that
    // packs both markers counts against the operator limit.
    #[test]
    fn empty_block_comment_is_one_operator_run() {
        let config = config();
        let source = Source::new("test", "a/**/b");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::OperatorTooLong { max: 3 });
        assert_eq!((err.position.column, err.ch), (5, Some('/')));

        let source = Source::new("test", "a/* */b");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(
            tokens.iter().map(Token::value).collect::<Vec<_>>(),
            ["a", "b", ""]
        );
    }

    #[test]
    fn unterminated_block_comment() {
        let config = config();
        let source = Source::new("test", "x /* never closed");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
        assert_eq!(err.position.column, 3);
    }

    #[test]
    fn unexpected_character() {
        let config = config();
        let source = Source::new("test", "x\n  # y");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter);
        assert_eq!(err.ch, Some('#'));
        assert_eq!((err.position.line, err.position.column), (2, 3));
        assert_eq!(
            err.to_string(),
            "unexpected character '#' at line 2, column 3"
        );
    }

    #[test]
    fn identifier_too_long() {
        let config = config();
        let text = "a".repeat(65);
        let source = Source::new("test", text);
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IdentifierTooLong { max: 64 });
        assert_eq!(err.position.column, 65);
        assert!(err.is_unexpected_character());
    }

    #[test]
    fn identifier_at_limit() {
        let config = config();
        let source = Source::new("test", "b".repeat(64));
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(tokens[0].value().len(), 64);
    }

    #[test]
    fn eof_token() {
        let config = config();
        let source = Source::new("test", "a\nbc");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        let eof = tokens.last().expect("eof");
        assert_eq!(eof.kind, "EOF");
        assert_eq!(eof.range, 4..4);
        assert_eq!((eof.location.line, eof.location.column), (2, 3));
    }

    #[test]
    fn empty_source() {
        let config = config();
        let source = Source::new("test", "");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(triples(&tokens), [("EOF", "", "")]);
    }

    #[test]
    fn unloaded_source() {
        let config = config();
        let source = Source::unloaded("missing");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::SourceNotLoaded);
    }

    #[test]
    fn included_whitespace() {
        let mut config = config();
        config.whitespace.include = true;
        let source = Source::new("test", "a \t\nb");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!(
            triples(&tokens),
            [
                ("WORD", "IDENTIFIER", "a"),
                ("WS", "", " \t\n"),
                ("WORD", "IDENTIFIER", "b"),
                ("EOF", "", ""),
            ]
        );
    }

    #[test]
    fn span_tracking() {
        let config = config();
        let source = Source::new("test", "a\nbb c");
        let tokens = tokenize(&config, &source).expect("should tokenize");
        assert_eq!((tokens[0].location.line, tokens[0].location.column), (1, 1));
        assert_eq!((tokens[1].location.line, tokens[1].location.column), (2, 1));
        assert_eq!((tokens[2].location.line, tokens[2].location.column), (2, 4));
        assert_eq!(tokens[2].location.source_line(&source), Some("bb c"));
    }

    #[test]
    fn error_message_with_hint() {
        let config = config();
        let source = Source::new("test", "1.2.3");
        let err = tokenize(&config, &source).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected character in numeric literal '.' at line 1, column 4 (second decimal point)"
        );
    }
}
