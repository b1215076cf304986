//! Recognizers for tokens that are correct without being in a dictionary.
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+([.,-][0-9]+)*$").expect("number regex"));
static NUMBER_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[xX][0-9A-Fa-f]+$").expect("hex regex"));
static NUMBER_BINARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[bB][01]+$").expect("binary regex"));
static NUMBER_UNITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:[.,][0-9]+)*(\p{L}+)$").expect("units regex"));
static ROMAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^M{0,3}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$").expect("roman regex")
});
static HASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-f]{7,64}$").expect("hash regex"));
static INITIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{L}\.?$").expect("initial regex"));

/// Decimal numbers with optional sign and `.`, `,` or `-` separators.
pub fn is_number(word: &str) -> bool {
    NUMBER.is_match(word)
}

/// `0x1F`-style literals.
pub fn is_number_hex(word: &str) -> bool {
    NUMBER_HEX.is_match(word)
}

/// `0b1010`-style literals.
pub fn is_number_binary(word: &str) -> bool {
    NUMBER_BINARY.is_match(word)
}

/// Roman numerals in canonical subtractive notation. The empty string is not one.
pub fn is_roman_numeral(word: &str) -> bool {
    !word.is_empty() && ROMAN.is_match(word)
}

/// Lowercase hex digests, such as abbreviated or full commit hashes.
pub fn is_hash(word: &str) -> bool {
    HASH.is_match(word) && word.bytes().any(|b| b.is_ascii_digit())
}

/// A single letter, optionally followed by a period.
pub fn is_initial(word: &str) -> bool {
    INITIAL.is_match(word)
}

/// Any of the numeric literal forms, tried in a fixed order.
pub fn is_literal(word: &str) -> bool {
    is_number(word)
        || is_number_hex(word)
        || is_number_binary(word)
        || is_roman_numeral(word)
        || is_hash(word)
}

/// For a number followed by letters, such as `100GB`, returns the letters.
pub fn number_unit(word: &str) -> Option<&str> {
    NUMBER_UNITS
        .captures(word)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Splits a camel-case word into its parts.
///
/// A boundary falls before an uppercase letter that follows a lowercase one,
/// and before the last uppercase letter of a run that is followed by a
/// lowercase letter (`HTTPServer` is `HTTP` + `Server`). Returns an empty
/// list when the word is not made of letters only, has no lowercase letter or
/// does not split.
pub fn split_camel_case(word: &str) -> Vec<&str> {
    let chars = word.char_indices().collect::<Vec<_>>();

    if !chars.iter().all(|(_, c)| c.is_alphabetic()) || !chars.iter().any(|(_, c)| c.is_lowercase())
    {
        return vec![];
    }

    let mut parts = vec![];
    let mut start = 0;

    for i in 1..chars.len() {
        let (offset, ch) = chars[i];
        if !ch.is_uppercase() {
            continue;
        }
        let prev = chars[i - 1].1;
        let next_is_lower = chars.get(i + 1).map(|(_, c)| c.is_lowercase()).unwrap_or(false);

        if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
            parts.push(&word[start..offset]);
            start = offset;
        }
    }

    if parts.is_empty() {
        return vec![];
    }

    parts.push(&word[start..]);
    parts
}
