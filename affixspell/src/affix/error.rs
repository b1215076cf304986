//! Affix file and stem entry errors.
use smol_str::SmolStr;

use super::Flag;

/// Errors that make an affix file unusable.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AffixError {
    /// A directive has the wrong number of fields
    #[error("line {line}: {directive} expects {expected} fields, found {found}")]
    FieldCount {
        /// 1-based line number
        line: usize,
        /// The directive name
        directive: SmolStr,
        /// Human readable expectation
        expected: &'static str,
        /// Number of fields found
        found: usize,
    },

    /// Rule lines appear for a flag without a header
    #[error("line {line}: rules for flag {flag:?} but no definition")]
    UndeclaredFlag {
        /// 1-based line number
        line: usize,
        /// The flag
        flag: Flag,
    },

    /// The same flag is declared twice
    #[error("line {line}: multiple affix definitions for {flag:?}")]
    DuplicateFlag {
        /// 1-based line number
        line: usize,
        /// The flag
        flag: Flag,
    },

    /// Cross product field is not `Y` or `N`
    #[error("line {line}: cross product is not Y or N: got {value:?}")]
    CrossProduct {
        /// 1-based line number
        line: usize,
        /// The offending value
        value: SmolStr,
    },

    /// A numeric field could not be parsed
    #[error("line {line}: invalid number {value:?}")]
    Number {
        /// 1-based line number
        line: usize,
        /// The offending value
        value: SmolStr,
    },

    /// A flag could not be read in the declared flag mode
    #[error("line {line}: invalid flag {value:?}")]
    Flag {
        /// 1-based line number
        line: usize,
        /// The offending value
        value: SmolStr,
    },

    /// An affix condition could not be parsed
    #[error("line {line}: unable to compile condition {condition:?}")]
    Condition {
        /// 1-based line number
        line: usize,
        /// The offending condition
        condition: SmolStr,
    },

    /// Reading the affix stream failed
    #[error("failed to read affix file")]
    Io(#[from] std::io::Error),
}

/// Errors for a single stem dictionary line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StemError {
    /// The flag separator is the first or last character
    #[error("slash char found in first or last position")]
    SlashPosition,

    /// Flags could not be read in the declared flag mode
    #[error("invalid flags {0:?}")]
    InvalidFlags(SmolStr),

    /// A flag names neither an affix class nor a compound class
    #[error("unable to find affix key {0:?}")]
    UnknownFlag(Flag),
}
