//! Named constants derived from a [`LexerConfig`].
//!
//! Parsers built on the scanner compare kinds, subkinds and keywords by
//! name. The vocabulary lists every such name once, with a prefix per
//! family: `TK_` for token kinds, `SK_` for subkinds, `KW_` for keywords,
//! and the bare name for literal operators and delimiters.

use std::collections::HashMap;
use std::fmt;

use crate::config::LexerConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub value: String,
}

/// An ordered table of constants.
///
/// When two entries would share a name the first one is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    constants: Vec<Constant>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    #[must_use]
    pub fn from_config(config: &LexerConfig) -> Self {
        let mut vocabulary = Self::default();

        for (key, kind) in config.kinds.entries() {
            vocabulary.push(format!("TK_{}", key.to_uppercase()), kind);
        }
        for (text, name) in &config.tokens {
            vocabulary.push(name.to_uppercase(), text);
        }
        for subkind in config.string.quotes.values() {
            vocabulary.push_subkind(subkind);
        }

        let keyword = &config.keyword;
        vocabulary.push_subkind(&keyword.subkind);
        for word in sorted(keyword.reserved.iter()) {
            vocabulary.push_keyword(word);
        }
        for subset in &keyword.subsets {
            vocabulary.push_subkind(&subset.name);
            for word in sorted(subset.words.iter()) {
                vocabulary.push_keyword(word);
            }
        }

        vocabulary.push_subkind(&config.word.subkind);
        vocabulary.push_subkind(&config.number.subkind);
        vocabulary.push_subkind(&config.number.float_subkind);

        tracing::debug!(constants = vocabulary.len(), "built vocabulary");
        vocabulary
    }

    fn push(&mut self, name: String, value: &str) {
        if self.index.contains_key(&name) {
            tracing::trace!(%name, "duplicate constant skipped");
            return;
        }
        self.index.insert(name.clone(), self.constants.len());
        self.constants.push(Constant {
            name,
            value: value.to_string(),
        });
    }

    fn push_subkind(&mut self, subkind: &str) {
        let subkind = subkind.to_uppercase();
        self.push(format!("SK_{subkind}"), &subkind);
    }

    fn push_keyword(&mut self, word: &str) {
        self.push(format!("KW_{}", word.to_uppercase()), word);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let &position = self.index.get(name)?;
        self.constants.get(position).map(|c| c.value.as_str())
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &Constant> {
        self.constants.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

fn sorted<'s>(words: impl Iterator<Item = &'s String>) -> Vec<&'s String> {
    let mut words: Vec<_> = words.collect();
    words.sort();
    words
}

/// Renders the table as Rust `pub const` items, one per line.
impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for constant in &self.constants {
            writeln!(
                f,
                "pub const {}: &str = {:?};",
                constant.name, constant.value
            )?;
        }
        Ok(())
    }
}
