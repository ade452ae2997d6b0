//! Scanner configuration.
//!
//! Every lexical rule the scanner follows comes from a [`LexerConfig`],
//! normally deserialized from a JSON document. Loading through
//! [`LexerConfig::from_json_str`], [`LexerConfig::from_path`] and friends
//! runs [`LexerConfig::validate`], so a config that reaches the scanner
//! has consistent character classes and reachable comment markers.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer};

/// The reference configuration for the `minilang` language.
pub const MINILANG_JSON: &str = include_str!("../config/minilang.json");

/// Error produced while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration {path}: {error}")]
    Io {
        path: String,
        #[source]
        error: io::Error,
    },
    /// The document is not valid JSON or does not match the schema.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// The document is well-formed but its rules contradict each other.
    #[error("invalid configuration at `{key}`: {reason}")]
    Invalid { key: String, reason: String },
}

fn invalid(key: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key: key.into(),
        reason: reason.into(),
    }
}

/// A set of characters, written in JSON as a plain string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct CharSet(BTreeSet<char>);

impl CharSet {
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl From<String> for CharSet {
    fn from(chars: String) -> Self {
        Self(chars.chars().collect())
    }
}

/// Names given to each token kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindNames {
    pub whitespace: String,
    pub word: String,
    pub keyword: String,
    pub number: String,
    pub delimiter: String,
    pub operator: String,
    pub string: String,
    pub comment: String,
    pub documentation: String,
    pub eof: String,
}

impl KindNames {
    /// Every kind as `(category, configured name)`, in declaration order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("whitespace", self.whitespace.as_str()),
            ("word", self.word.as_str()),
            ("keyword", self.keyword.as_str()),
            ("number", self.number.as_str()),
            ("delimiter", self.delimiter.as_str()),
            ("operator", self.operator.as_str()),
            ("string", self.string.as_str()),
            ("comment", self.comment.as_str()),
            ("documentation", self.documentation.as_str()),
            ("eof", self.eof.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhitespaceConfig {
    pub chars: CharSet,
    /// Emit whitespace runs as tokens instead of skipping them.
    #[serde(default)]
    pub include: bool,
}

/// Quote characters and the escape marker used inside string literals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringConfig {
    #[serde(default)]
    pub escape: Option<char>,
    /// Opening (and closing) quote character to the literal's subkind.
    pub quotes: BTreeMap<char, String>,
}

impl StringConfig {
    #[must_use]
    pub fn subkind(&self, quote: char) -> Option<&str> {
        self.quotes.get(&quote).map(String::as_str)
    }
}

/// Digit alphabet selected by a base prefix such as the `x` in `0x1F`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberBase {
    pub digits: String,
    pub subkind: String,
}

impl NumberBase {
    /// The numeric base, i.e. the size of the digit alphabet.
    #[must_use]
    pub fn radix(&self) -> u32 {
        u32::try_from(self.digits.chars().count()).unwrap_or(u32::MAX)
    }

    /// Whether `ch` is a digit of this alphabet, ignoring case.
    #[must_use]
    pub fn accepts(&self, ch: char) -> bool {
        self.digits.chars().any(|d| same_letter(d, ch))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberConfig {
    pub subkind: String,
    pub float_subkind: String,
    /// Digit grouping mark, consumed and ignored inside literals.
    #[serde(default)]
    pub separator: Option<char>,
    #[serde(default)]
    pub bases: BTreeMap<char, NumberBase>,
}

impl NumberConfig {
    /// Look up a base prefix, ignoring case.
    #[must_use]
    pub fn base(&self, prefix: char) -> Option<&NumberBase> {
        self.bases
            .iter()
            .find(|(p, _)| same_letter(**p, prefix))
            .map(|(_, base)| base)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorConfig {
    pub chars: CharSet,
    pub max_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelimiterConfig {
    pub chars: CharSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockMarkers {
    pub begin: String,
    pub end: String,
    pub subkind: String,
}

/// Markers for one comment family (plain comments or documentation).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentConfig {
    #[serde(default)]
    pub line: Option<String>,
    /// Subkind of line-form comments.
    pub subkind: String,
    #[serde(default)]
    pub include: bool,
    #[serde(default)]
    pub block: Option<BlockMarkers>,
}

/// A named group of keywords, such as access modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSubset {
    /// Uppercased subset name, used as the token subkind.
    pub name: String,
    pub words: HashSet<String>,
}

/// Reserved words and keyword subsets.
///
/// In JSON the subsets are listed by name under `subkinds`, and each
/// name is a sibling key holding that subset's words.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "KeywordTable")]
pub struct KeywordConfig {
    /// Subkind of reserved words, uppercased.
    pub subkind: String,
    pub reserved: HashSet<String>,
    /// Subsets in the order they are checked.
    pub subsets: Vec<KeywordSubset>,
}

impl KeywordConfig {
    /// The keyword subkind of `word`, or `None` for an ordinary word.
    ///
    /// Reserved words win over subsets; among subsets the first
    /// declared one containing the word wins.
    #[must_use]
    pub fn classify(&self, word: &str) -> Option<&str> {
        if self.reserved.contains(word) {
            return Some(&self.subkind);
        }
        self.subsets
            .iter()
            .find(|subset| subset.words.contains(word))
            .map(|subset| subset.name.as_str())
    }
}

#[derive(Deserialize)]
struct KeywordTable {
    subkind: String,
    reserved: HashSet<String>,
    #[serde(default)]
    subkinds: Vec<String>,
    #[serde(flatten)]
    sets: BTreeMap<String, HashSet<String>>,
}

impl TryFrom<KeywordTable> for KeywordConfig {
    type Error = String;

    fn try_from(mut table: KeywordTable) -> Result<Self, Self::Error> {
        let mut subsets = Vec::with_capacity(table.subkinds.len());
        for name in &table.subkinds {
            let words = table
                .sets
                .remove(name)
                .ok_or_else(|| format!("keyword subset `{name}` has no word list"))?;
            subsets.push(KeywordSubset {
                name: name.to_uppercase(),
                words,
            });
        }
        if let Some(orphan) = table.sets.keys().next() {
            return Err(format!(
                "keyword word list `{orphan}` is not named in `subkinds`"
            ));
        }
        Ok(Self {
            subkind: table.subkind.to_uppercase(),
            reserved: table.reserved,
            subsets,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WordConfig {
    /// Subkind of ordinary words, uppercased.
    #[serde(deserialize_with = "uppercase")]
    pub subkind: String,
    pub max_length: usize,
}

fn uppercase<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| s.to_uppercase())
}

/// The full set of lexical rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexerConfig {
    pub kinds: KindNames,
    pub whitespace: WhitespaceConfig,
    pub string: StringConfig,
    pub number: NumberConfig,
    pub operator: OperatorConfig,
    pub delimiter: DelimiterConfig,
    pub comment: CommentConfig,
    pub document: CommentConfig,
    pub keyword: KeywordConfig,
    pub word: WordConfig,
    /// Literal operator or delimiter text to its name.
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
    /// Joins kind and subkind in display labels, e.g. `KEYWORD:ACCESS`.
    #[serde(default)]
    pub subkind_delimiter: Option<String>,
}

impl LexerConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from an already-built JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.display().to_string(),
            error,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded lexer configuration");
        Ok(config)
    }

    /// The bundled `minilang` configuration.
    pub fn minilang() -> Result<Self, ConfigError> {
        Self::from_json_str(MINILANG_JSON)
    }

    /// Name of a literal operator or delimiter, e.g. `"+"` -> `"ADD"`.
    #[must_use]
    pub fn token_name(&self, text: &str) -> Option<&str> {
        self.tokens.get(text).map(String::as_str)
    }

    /// Literal text of a named operator or delimiter, e.g. `"ADD"` -> `"+"`.
    #[must_use]
    pub fn token_text(&self, name: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(text, _)| text.as_str())
    }

    /// Check that the rules are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_char_classes()?;
        self.validate_strings()?;
        self.validate_numbers()?;
        self.validate_comments()?;

        if self.word.max_length == 0 {
            return Err(invalid("word.max_length", "must be at least 1"));
        }

        let mut names = HashSet::new();
        for name in self.tokens.values() {
            if !names.insert(name.as_str()) {
                return Err(invalid(
                    "tokens",
                    format!("name `{name}` is given to more than one token"),
                ));
            }
        }
        Ok(())
    }

    fn validate_char_classes(&self) -> Result<(), ConfigError> {
        let classes = [
            ("whitespace.chars", &self.whitespace.chars),
            ("operator.chars", &self.operator.chars),
            ("delimiter.chars", &self.delimiter.chars),
        ];
        for (i, (key, set)) in classes.iter().enumerate() {
            if let Some(ch) = set.iter().find(|c| c.is_alphanumeric()) {
                return Err(invalid(
                    *key,
                    format!("'{ch}' would shadow words or numbers"),
                ));
            }
            for (other_key, other) in &classes[i + 1..] {
                if let Some(ch) = set.iter().find(|c| other.contains(*c)) {
                    return Err(invalid(*key, format!("'{ch}' also appears in {other_key}")));
                }
            }
        }
        if self.operator.max_length == 0 {
            return Err(invalid("operator.max_length", "must be at least 1"));
        }
        if self.operator.chars.is_empty() {
            let operator_spelled = self.tokens.keys().find(|text| {
                let mut chars = text.chars();
                !matches!(
                    (chars.next(), chars.next()),
                    (Some(ch), None) if self.delimiter.chars.contains(ch)
                )
            });
            if let Some(text) = operator_spelled {
                return Err(invalid(
                    "operator.chars",
                    format!("must not be empty, token `{text}` is spelled with operators"),
                ));
            }
        }
        Ok(())
    }

    fn validate_strings(&self) -> Result<(), ConfigError> {
        for quote in self.string.quotes.keys() {
            if quote.is_alphanumeric()
                || self.whitespace.chars.contains(*quote)
                || self.operator.chars.contains(*quote)
                || self.delimiter.chars.contains(*quote)
            {
                return Err(invalid(
                    "string.quotes",
                    format!("quote '{quote}' is already used by another character class"),
                ));
            }
        }
        if let Some(escape) = self.string.escape {
            if self.string.quotes.contains_key(&escape) {
                return Err(invalid(
                    "string.escape",
                    format!("'{escape}' is also a quote character"),
                ));
            }
        }
        Ok(())
    }

    fn validate_numbers(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<char> = Vec::new();
        for (prefix, base) in &self.number.bases {
            let key = format!("number.bases.{prefix}");
            if !prefix.is_alphabetic() {
                return Err(invalid(key, "base prefix must be a letter"));
            }
            if seen.iter().any(|p| same_letter(*p, *prefix)) {
                return Err(invalid(key, "base prefix is defined twice ignoring case"));
            }
            seen.push(*prefix);

            let distinct: HashSet<char> = base.digits.chars().flat_map(char::to_lowercase).collect();
            if distinct.len() < 2 || distinct.len() != base.digits.chars().count() {
                return Err(invalid(
                    key,
                    "digits must hold at least two distinct symbols",
                ));
            }
            if base.digits.contains('.') || self.number.separator.is_some_and(|s| base.accepts(s)) {
                return Err(invalid(key, "digits may not contain '.' or the separator"));
            }
        }
        if let Some(separator) = self.number.separator {
            if separator.is_ascii_digit() || separator == '.' {
                return Err(invalid(
                    "number.separator",
                    format!("'{separator}' cannot separate digits"),
                ));
            }
        }
        Ok(())
    }

    fn validate_comments(&self) -> Result<(), ConfigError> {
        for (family, config) in [("comment", &self.comment), ("document", &self.document)] {
            if let Some(line) = &config.line {
                self.validate_marker(&format!("{family}.line"), line)?;
            }
            if let Some(block) = &config.block {
                self.validate_marker(&format!("{family}.block.begin"), &block.begin)?;
                if block.end.is_empty() {
                    return Err(invalid(format!("{family}.block.end"), "must not be empty"));
                }
            }
        }
        Ok(())
    }

    /// Comment markers are recognised from operator runs, so they must
    /// be spelled with operator characters and fit within one run.
    fn validate_marker(&self, key: &str, marker: &str) -> Result<(), ConfigError> {
        if marker.is_empty() {
            return Err(invalid(key, "must not be empty"));
        }
        if let Some(ch) = marker.chars().find(|c| !self.operator.chars.contains(*c)) {
            return Err(invalid(key, format!("'{ch}' is not an operator character")));
        }
        if marker.chars().count() > self.operator.max_length {
            return Err(invalid(key, "is longer than operator.max_length"));
        }
        Ok(())
    }
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
