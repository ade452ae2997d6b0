//! Configuration-driven lexical scanner.
//!
//! Character classes, comment markers, numeric bases, keyword tables and
//! operator names all come from a JSON [`LexerConfig`]; the scanner turns
//! a [`Source`] into a flat list of [`Token`]s ending in one end-of-file
//! token, and a [`TokenStream`] walks that list for a hand-written parser.
//!
//! # Quick start
//!
//! ## Tokenize a source
//!
//! ```
//! use lexconf::{LexerConfig, Source, tokenize};
//!
//! let config = LexerConfig::minilang().unwrap();
//! let source = Source::new("demo", "print 0x1F;");
//! let tokens = tokenize(&config, &source).unwrap();
//!
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, ["KEYWORD", "NUMBER", "DELIMITER", "EOF"]);
//! assert_eq!(tokens[1].base, 16);
//! ```
//!
//! ## Consume tokens
//!
//! ```
//! use lexconf::{LexerConfig, Source, TokenStream, tokenize};
//!
//! let config = LexerConfig::minilang().unwrap();
//! let source = Source::new("demo", "x = 1;");
//! let tokens = tokenize(&config, &source).unwrap();
//! let mut stream = TokenStream::with_config(&source, tokens, &config);
//!
//! assert!(stream.match_kind(&["WORD"]));
//! assert_eq!(stream.expect_token(&["="]), Ok(true));
//! assert_eq!(stream.composite_kind().unwrap(), "NUMBER:INTEGER");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod config;
pub mod lexer;
pub mod position;
pub mod source;
pub mod stream;
pub mod token;
pub mod vocabulary;

use std::path::Path;

pub use config::{ConfigError, LexerConfig};
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use position::SourcePosition;
pub use source::{Source, SourceError};
pub use stream::{MatchCategory, StreamError, TokenStream, Unexpected};
pub use token::Token;
pub use vocabulary::{Constant, Vocabulary};

/// Unified error type for everything the crate can fail on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// A source file could not be read.
    #[error("{0}")]
    Source(#[from] SourceError),
    /// A token stream error.
    #[error("{0}")]
    Stream(#[from] StreamError),
}

/// Load a file and tokenize it, returning the number of tokens produced.
pub fn check_file(config: &LexerConfig, path: impl AsRef<Path>) -> Result<usize, Error> {
    let source = Source::load(path)?;
    Ok(tokenize(config, &source)?.len())
}
