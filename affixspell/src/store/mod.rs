//! The word-form store that can back a speller instead of an in-memory set.
//!
//! A store keeps one row per lowercase word form and case style, answers
//! exact and pattern lookups, and holds one configuration blob so that a
//! speller can be reopened without parsing the affix file again.
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::tokenizer::case_handling::CaseStyle;

pub mod error;
pub mod memory;

pub use self::error::StoreError;
pub use self::memory::MemoryStore;

/// A stored word form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordForm {
    /// The word, lowercased.
    pub word: SmolStr,
    /// Language tag of the dictionary the word came from.
    pub lang: SmolStr,
    /// One of `Mixed`, `AllUpper` or `Title`.
    pub case: CaseStyle,
}

impl WordForm {
    /// Builds a row for `word`, normalizing the word and its style for storage.
    pub fn new(word: &str, lang: &str, style: CaseStyle) -> WordForm {
        WordForm {
            word: crate::tokenizer::case_handling::lower_case(word),
            lang: lang.into(),
            case: style.stored(),
        }
    }
}

/// A fixed-length pattern over lowercase words: each position is either a
/// literal character or a single-character wildcard.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WordPattern {
    symbols: Vec<Option<char>>,
}

impl WordPattern {
    /// A pattern matching exactly `word`.
    pub fn literal(word: &str) -> WordPattern {
        WordPattern {
            symbols: word.chars().map(Some).collect(),
        }
    }

    /// `word` with the character at `index` replaced by a wildcard.
    pub fn with_wildcard(word: &str, index: usize) -> WordPattern {
        WordPattern {
            symbols: word
                .chars()
                .enumerate()
                .map(|(i, ch)| if i == index { None } else { Some(ch) })
                .collect(),
        }
    }

    /// Number of characters a matching word has.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the pattern only matches the empty string.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether `word` matches, comparing characters exactly.
    pub fn matches(&self, word: &str) -> bool {
        let mut chars = word.chars();
        for symbol in self.symbols.iter() {
            match (chars.next(), symbol) {
                (None, _) => return false,
                (Some(_), None) => {}
                (Some(ch), Some(expected)) if ch == *expected => {}
                _ => return false,
            }
        }
        chars.next().is_none()
    }
}

/// Renders the pattern in SQL `LIKE` syntax, escaping with `\`.
impl fmt::Display for WordPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.symbols.iter() {
            match symbol {
                None => f.write_str("_")?,
                Some(ch @ ('_' | '%' | '\\')) => write!(f, "\\{}", ch)?,
                Some(ch) => write!(f, "{}", ch)?,
            }
        }
        Ok(())
    }
}

/// Capabilities a backing store must provide.
///
/// Reads must be safe to run concurrently; writes only happen while a
/// speller is being built or extended through `&mut` access.
pub trait WordStore: Send + Sync {
    /// All rows whose word equals `word` (already lowercased).
    fn lookup(&self, word: &str) -> Result<Vec<WordForm>, StoreError>;

    /// Distinct words matching any of `patterns`, in ascending order.
    fn find_matching(&self, patterns: &[WordPattern]) -> Result<Vec<SmolStr>, StoreError>;

    /// Inserts rows in bulk.
    fn insert(&mut self, forms: &[WordForm]) -> Result<(), StoreError>;

    /// Replaces the stored configuration blob.
    fn save_config(&mut self, config: &str) -> Result<(), StoreError>;

    /// Reads the stored configuration blob, if any.
    fn load_config(&self) -> Result<Option<String>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns() {
        let p = WordPattern::with_wildcard("wrold", 1);
        assert!(p.matches("wxold"));
        assert!(p.matches("w_old"));
        assert!(!p.matches("wold"));
        assert!(!p.matches("wrolds"));
        assert_eq!(p.len(), 5);

        assert!(WordPattern::literal("öl").matches("öl"));
        assert!(!WordPattern::literal("öl").matches("ol"));
        assert!(WordPattern::literal("").matches(""));
    }

    #[test]
    fn like_rendering() {
        assert_eq!(WordPattern::with_wildcard("cat", 0).to_string(), "_at");
        assert_eq!(WordPattern::literal("50%_off").to_string(), "50\\%\\_off");
    }

    #[test]
    fn rows_are_normalized() {
        let row = WordForm::new("Cats", "en-US", CaseStyle::AllLower);
        assert_eq!(row.word, "cats");
        assert_eq!(row.case, CaseStyle::Mixed);
    }
}
