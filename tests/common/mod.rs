#![allow(dead_code)]

use lexconf::{LexerConfig, Token};

pub fn minilang() -> LexerConfig {
    LexerConfig::minilang().expect("minilang config")
}

/// The minilang rules with whitespace and every comment kept, so the
/// token texts cover the whole input.
pub fn lossless() -> LexerConfig {
    let mut config = minilang();
    config.whitespace.include = true;
    config.comment.include = true;
    config.document.include = true;
    config
}

pub fn values<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
    tokens.iter().map(Token::value).collect()
}

pub fn kinds<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
    tokens.iter().map(|t| t.kind).collect()
}

/// Concatenate token texts back into a source string.
pub fn reconstruct(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(Token::value).collect()
}
