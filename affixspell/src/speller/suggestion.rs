//! Candidate patterns for correcting a misspelled word.
use hashbrown::HashSet;
use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

use crate::store::WordPattern;

static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-[\p{L}\-]").expect("hyphen regex"));

/// All single-edit patterns for `word`, which should already be lowercase.
///
/// Produces a wildcard at every position, the word without its first
/// character, the word with hyphen runs removed, every adjacent
/// transposition and every `REP` replacement. Duplicates are dropped and the
/// first occurrence keeps its place.
pub fn candidate_patterns(word: &str, replacements: &[(SmolStr, SmolStr)]) -> Vec<WordPattern> {
    let chars = word.chars().collect::<Vec<_>>();
    let mut seen = HashSet::new();
    let mut patterns = vec![];
    let mut push = |p: WordPattern| {
        if !p.is_empty() && seen.insert(p.clone()) {
            patterns.push(p);
        }
    };

    for i in 0..chars.len() {
        push(WordPattern::with_wildcard(word, i));
    }

    if let Some((first, _)) = word.char_indices().nth(1) {
        push(WordPattern::literal(&word[first..]));
    }

    if HYPHEN_RUN.is_match(word) {
        push(WordPattern::literal(&HYPHEN_RUN.replace_all(word, "")));
    }

    for i in 1..chars.len() {
        if chars[i - 1] == chars[i] {
            continue;
        }
        let mut swapped = chars.clone();
        swapped.swap(i - 1, i);
        push(WordPattern::literal(&swapped.into_iter().collect::<String>()));
    }

    for (from, to) in replacements {
        for candidate in replace_each(word, from, to) {
            push(WordPattern::literal(&candidate));
        }
    }

    patterns
}

/// Applies one `REP` pair at every place it fits, one occurrence at a time.
///
/// A leading `^` or trailing `$` anchors `from` to the start or end of the
/// word; `_` stands for a space in both halves.
fn replace_each(word: &str, from: &str, to: &str) -> Vec<String> {
    let anchored_start = from.starts_with('^');
    let anchored_end = from.len() > 1 && from.ends_with('$');
    let from = from.trim_start_matches('^').trim_end_matches('$').replace('_', " ");
    let to = to.replace('_', " ");

    if from.is_empty() {
        return vec![];
    }

    word.match_indices(from.as_str())
        .filter(|(at, _)| !anchored_start || *at == 0)
        .filter(|(at, m)| !anchored_end || at + m.len() == word.len())
        .map(|(at, m)| format!("{}{}{}", &word[..at], to, &word[at + m.len()..]))
        .collect()
}
