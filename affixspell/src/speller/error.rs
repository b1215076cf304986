//! Errors and recoverable diagnostics for building a speller.
use std::fmt;

use smol_str::SmolStr;

use crate::affix::AffixError;
use crate::store::StoreError;

/// Errors that abort loading a speller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    /// An input file could not be opened
    #[error("Unable to open '{0}'")]
    File(String, #[source] std::io::Error),

    /// I/O error while reading an input stream
    #[error("I/O error while reading input")]
    Io(#[source] std::io::Error),

    /// The affix file has a structural error
    #[error("Malformed affix file")]
    MalformedAffixFile(#[source] AffixError),

    /// The first line of the stem dictionary is not an entry count
    #[error("Malformed stem dictionary header {0:?}, expected an entry count")]
    MalformedStemHeader(String),

    /// The backing store failed
    #[error("Store error")]
    Store(#[from] StoreError),

    /// The store holds no affix configuration
    #[error("Not found affix configuration in store")]
    MissingConfig,

    /// The stored affix configuration could not be decoded
    #[error("Stored affix configuration is invalid")]
    InvalidConfig(#[source] serde_json::Error),
}

impl From<AffixError> for LoadError {
    fn from(e: AffixError) -> Self {
        match e {
            AffixError::Io(e) => LoadError::Io(e),
            e => LoadError::MalformedAffixFile(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// Problems that were recovered from while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A compound rule did not compile and was left out.
    MalformedCompoundPattern {
        /// The rule as written
        pattern: SmolStr,
        /// Why it failed
        reason: String,
    },
    /// A stem dictionary line was skipped.
    MalformedStemEntry {
        /// 1-based line number
        line: usize,
        /// Why it was skipped
        reason: String,
    },
    /// A stem appeared more than once in the stem dictionary.
    DuplicateWordEntry(SmolStr),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedCompoundPattern { pattern, reason } => {
                write!(f, "compound rule {:?} dropped: {}", pattern, reason)
            }
            Diagnostic::MalformedStemEntry { line, reason } => {
                write!(f, "line {} skipped: {}", line, reason)
            }
            Diagnostic::DuplicateWordEntry(word) => write!(f, "duplicate entry {:?}", word),
        }
    }
}
