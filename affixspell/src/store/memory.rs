use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{StoreError, WordForm, WordPattern, WordStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Contents {
    config: Option<String>,
    forms: BTreeMap<SmolStr, Vec<WordForm>>,
}

/// A sorted in-process word store, optionally written through to a JSON file.
///
/// Reopening the file with [`MemoryStore::open`] restores both the rows and
/// the configuration blob.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: Contents,
    path: Option<PathBuf>,
}

impl MemoryStore {
    /// An empty store that lives only in memory.
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// An empty store that writes itself to `path` after every change.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<MemoryStore, StoreError> {
        let store = MemoryStore {
            contents: Contents::default(),
            path: Some(path.as_ref().to_path_buf()),
        };
        store.persist()?;
        Ok(store)
    }

    /// Reopens a store previously written by [`MemoryStore::create`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<MemoryStore, StoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| StoreError::Io(path.display().to_string(), e))?;
        let contents: Contents = serde_json::from_reader(BufReader::new(file))?;

        log::debug!(
            "opened store {} with {} words",
            path.display(),
            contents.forms.len()
        );

        Ok(MemoryStore {
            contents,
            path: Some(path.to_path_buf()),
        })
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.contents.forms.values().map(Vec::len).sum()
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.contents.forms.is_empty()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let path = match self.path.as_ref() {
            Some(p) => p,
            None => return Ok(()),
        };
        let io_err = |e| StoreError::Io(path.display().to_string(), e);

        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        serde_json::to_writer(&mut writer, &self.contents)?;
        writer.flush().map_err(io_err)
    }
}

impl WordStore for MemoryStore {
    fn lookup(&self, word: &str) -> Result<Vec<WordForm>, StoreError> {
        Ok(self.contents.forms.get(word).cloned().unwrap_or_default())
    }

    fn find_matching(&self, patterns: &[WordPattern]) -> Result<Vec<SmolStr>, StoreError> {
        let mut by_len: HashMap<usize, Vec<&WordPattern>> = HashMap::new();
        for pattern in patterns {
            by_len.entry(pattern.len()).or_default().push(pattern);
        }

        Ok(self
            .contents
            .forms
            .keys()
            .filter(|word| match by_len.get(&word.chars().count()) {
                Some(candidates) => candidates.iter().any(|p| p.matches(word)),
                None => false,
            })
            .cloned()
            .collect())
    }

    fn insert(&mut self, forms: &[WordForm]) -> Result<(), StoreError> {
        for form in forms {
            let rows = self.contents.forms.entry(form.word.clone()).or_default();
            if !rows.contains(form) {
                rows.push(form.clone());
            }
        }
        self.persist()
    }

    fn save_config(&mut self, config: &str) -> Result<(), StoreError> {
        self.contents.config = Some(config.to_string());
        self.persist()
    }

    fn load_config(&self) -> Result<Option<String>, StoreError> {
        Ok(self.contents.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::case_handling::CaseStyle;

    fn rows() -> Vec<WordForm> {
        vec![
            WordForm::new("world", "en", CaseStyle::AllLower),
            WordForm::new("word", "en", CaseStyle::AllLower),
            WordForm::new("NASA", "en", CaseStyle::AllUpper),
            WordForm::new("Paris", "en", CaseStyle::Title),
            WordForm::new("world", "en", CaseStyle::AllLower),
        ]
    }

    #[test]
    fn lookup_and_dedup() {
        let mut store = MemoryStore::new();
        store.insert(&rows()).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.lookup("nasa").unwrap()[0].case, CaseStyle::AllUpper);
        assert!(store.lookup("NASA").unwrap().is_empty());
        assert!(store.lookup("missing").unwrap().is_empty());
    }

    #[test]
    fn pattern_queries_are_sorted() {
        let mut store = MemoryStore::new();
        store.insert(&rows()).unwrap();

        let found = store
            .find_matching(&[
                WordPattern::with_wildcard("worle", 4),
                WordPattern::literal("word"),
                WordPattern::with_wildcard("wor_d", 3),
            ])
            .unwrap();
        assert_eq!(found, vec!["word", "world"]);
    }

    #[test]
    fn reopen_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");

        let mut store = MemoryStore::create(&path).unwrap();
        store.insert(&rows()).unwrap();
        store.save_config("{\"flag_mode\":\"Char\"}").unwrap();
        drop(store);

        let store = MemoryStore::open(&path).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(
            store.load_config().unwrap().as_deref(),
            Some("{\"flag_mode\":\"Char\"}")
        );
        assert!(matches!(
            MemoryStore::open(dir.path().join("missing.json")),
            Err(StoreError::Io(..))
        ));
    }
}
