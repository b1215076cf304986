//! The two ways a speller can hold its known word forms.
use std::collections::BTreeSet;

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};
use smol_str::SmolStr;

use crate::store::{StoreError, WordForm, WordPattern, WordStore};
use crate::tokenizer::case_handling::{case_style, lower_case, CaseStyle};

/// Membership and pattern queries over known word forms.
pub trait Dictionary: Send + Sync {
    /// Whether `word` is known in a casing its stored style accepts.
    fn contains(&self, word: &str) -> bool;

    /// Whether a unit such as `GB` is known as is or lowercased.
    fn contains_unit(&self, unit: &str) -> bool {
        self.contains(unit) || self.contains(&lower_case(unit))
    }

    /// Lowercase known words matching any of `patterns`, sorted and distinct.
    fn find_matching(&self, patterns: &[WordPattern]) -> Vec<SmolStr>;

    /// Adds each word in its own case style. Returns the words that were
    /// already known in that style.
    fn insert_new(&mut self, words: &[SmolStr]) -> Result<Vec<SmolStr>, StoreError>;
}

/// Known forms keyed by lowercase word, each with the case styles it was
/// added in. Answers the same way as a [`StoreDictionary`] over the same forms.
#[derive(Debug, Default)]
pub struct MemoryDictionary {
    styles: HashMap<SmolStr, Vec<CaseStyle>>,
    by_len: HashMap<usize, Vec<SmolStr>>,
}

impl MemoryDictionary {
    /// Reserves room for at least `additional` more words.
    pub fn reserve(&mut self, additional: usize) {
        self.styles.reserve(additional);
    }

    /// Adds `word` in `style`. Returns false if it was already known in that
    /// style.
    pub fn insert(&mut self, word: &str, style: CaseStyle) -> bool {
        let style = style.stored();
        match self.styles.entry(lower_case(word)) {
            Entry::Occupied(mut entry) => {
                if entry.get().contains(&style) {
                    return false;
                }
                entry.get_mut().push(style);
            }
            Entry::Vacant(entry) => {
                self.by_len
                    .entry(entry.key().chars().count())
                    .or_default()
                    .push(entry.key().clone());
                entry.insert(vec![style]);
            }
        }
        true
    }

    /// Number of distinct (word, style) entries.
    pub fn len(&self) -> usize {
        self.styles.values().map(Vec::len).sum()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Dictionary for MemoryDictionary {
    fn contains(&self, word: &str) -> bool {
        match self.styles.get(lower_case(word).as_str()) {
            Some(styles) => styles.iter().any(|style| style.accepts(word)),
            None => false,
        }
    }

    fn find_matching(&self, patterns: &[WordPattern]) -> Vec<SmolStr> {
        let mut by_len: HashMap<usize, Vec<&WordPattern>> = HashMap::new();
        for pattern in patterns {
            by_len.entry(pattern.len()).or_default().push(pattern);
        }

        by_len
            .iter()
            .filter_map(|(len, candidates)| Some((self.by_len.get(len)?, candidates)))
            .flat_map(|(words, candidates)| {
                words
                    .iter()
                    .filter(move |word| candidates.iter().any(|p| p.matches(word)))
            })
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn insert_new(&mut self, words: &[SmolStr]) -> Result<Vec<SmolStr>, StoreError> {
        Ok(words
            .iter()
            .filter(|word| !self.insert(word, case_style(word)))
            .cloned()
            .collect())
    }
}

/// Delegation to a [`WordStore`] keyed by lowercase word and case style.
///
/// Store failures during queries count as "not found".
pub struct StoreDictionary {
    store: Box<dyn WordStore>,
    lang: SmolStr,
}

impl StoreDictionary {
    /// Wraps `store`; new rows are tagged with `lang`.
    pub fn new(store: Box<dyn WordStore>, lang: SmolStr) -> StoreDictionary {
        StoreDictionary { store, lang }
    }
}

impl std::fmt::Debug for StoreDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreDictionary")
            .field("lang", &self.lang)
            .finish()
    }
}

impl Dictionary for StoreDictionary {
    fn contains(&self, word: &str) -> bool {
        match self.store.lookup(&lower_case(word)) {
            Ok(rows) => rows.iter().any(|row| row.case.accepts(word)),
            Err(e) => {
                log::debug!("store lookup for {:?} failed: {}", word, e);
                false
            }
        }
    }

    fn find_matching(&self, patterns: &[WordPattern]) -> Vec<SmolStr> {
        match self.store.find_matching(patterns) {
            Ok(words) => words,
            Err(e) => {
                log::debug!("store pattern query failed: {}", e);
                vec![]
            }
        }
    }

    fn insert_new(&mut self, words: &[SmolStr]) -> Result<Vec<SmolStr>, StoreError> {
        let mut duplicates = vec![];
        let mut pending = HashSet::new();
        let mut rows = vec![];

        for word in words {
            let row = WordForm::new(word, &self.lang, case_style(word));
            let known = self
                .store
                .lookup(&row.word)?
                .iter()
                .any(|r| r.case == row.case);

            if known || !pending.insert(row.clone()) {
                duplicates.push(word.clone());
            } else {
                rows.push(row);
            }
        }

        if !rows.is_empty() {
            self.store.insert(&rows)?;
        }

        Ok(duplicates)
    }
}
