//! The spell-checking engine.
//!
//! An [`Engine`] owns the parsed affix configuration, the compiled compound
//! patterns and a [`Dictionary`] of known word forms. Once built it is only
//! read, so it can be shared across threads.
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::affix::{AffixConfig, IconvTable, StemEntry, WordExpander};
use crate::store::{StoreError, WordForm, WordStore};
use crate::tokenizer::case_handling::{case_style, lower_case, CaseStyle};
use crate::tokenizer::Splitter;

pub mod compound;
pub mod dictionary;
pub mod error;
pub mod literal;
pub mod suggestion;

pub use self::compound::CompoundPattern;
pub use self::dictionary::{Dictionary, MemoryDictionary, StoreDictionary};
pub use self::error::{Diagnostic, LoadError};

/// Upper bound on what a stem dictionary header may preallocate.
const MAX_RESERVE: usize = 1 << 20;

/// How tokens such as `fooBar` are treated when they are not in the dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CamelCaseMode {
    /// Any token that splits into camel-case parts is correct.
    Permissive,
    /// Every camel-case part must itself be a known word.
    Strict,
}

impl Default for CamelCaseMode {
    fn default() -> Self {
        CamelCaseMode::Permissive
    }
}

/// Query-time behaviour of an [`Engine`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpellerConfig {
    /// Treatment of camel-case tokens.
    pub camel_case: CamelCaseMode,
    /// Language tag written to store rows, `und` when unset.
    pub lang: Option<SmolStr>,
}

impl SpellerConfig {
    /// Permissive camel case, no language tag.
    pub const fn default() -> SpellerConfig {
        SpellerConfig {
            camel_case: CamelCaseMode::Permissive,
            lang: None,
        }
    }

    fn lang(&self) -> SmolStr {
        self.lang.clone().unwrap_or_else(|| SmolStr::from("und"))
    }
}

/// The outcome of checking one word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WordCheck {
    /// The word as given.
    pub word: SmolStr,
    /// Result of [`Engine::spell`].
    pub is_correct: bool,
    /// Empty when the word is correct.
    pub suggestions: Vec<SmolStr>,
}

/// Receives the forms of each stem while a stem dictionary is read.
trait FormSink {
    fn reserve(&mut self, entries: usize);
    fn add(&mut self, forms: &[SmolStr], style: CaseStyle);
}

impl FormSink for MemoryDictionary {
    fn reserve(&mut self, entries: usize) {
        MemoryDictionary::reserve(self, entries);
    }

    fn add(&mut self, forms: &[SmolStr], style: CaseStyle) {
        for form in forms {
            self.insert(form, style);
        }
    }
}

struct RowSink<'a> {
    lang: &'a str,
    rows: Vec<WordForm>,
}

impl FormSink for RowSink<'_> {
    fn reserve(&mut self, entries: usize) {
        self.rows.reserve(entries);
    }

    fn add(&mut self, forms: &[SmolStr], style: CaseStyle) {
        let lang = self.lang;
        self.rows
            .extend(forms.iter().map(|form| WordForm::new(form, lang, style)));
    }
}

fn skip_line(diagnostics: &mut Vec<Diagnostic>, line: usize, reason: impl std::fmt::Display) {
    log::warn!("stem dictionary line {} skipped: {}", line, reason);
    diagnostics.push(Diagnostic::MalformedStemEntry {
        line,
        reason: reason.to_string(),
    });
}

/// Reads a stem dictionary, expanding each entry into `sink` and recording
/// compound class members in `affix`. Returns the number of forms produced.
fn read_stems<R: Read>(
    affix: &mut AffixConfig,
    dic: R,
    sink: &mut dyn FormSink,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<usize, LoadError> {
    let mut reader = BufReader::new(dic);
    let mut buf = Vec::with_capacity(128);

    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Err(LoadError::MalformedStemHeader(String::new()));
    }
    let count = {
        let header = String::from_utf8_lossy(&buf);
        let header = header.trim().trim_start_matches('\u{feff}');
        header
            .parse::<usize>()
            .map_err(|_| LoadError::MalformedStemHeader(header.to_string()))?
    };
    let reserve = count.min(MAX_RESERVE);
    sink.reserve(reserve);

    let mut stems = HashSet::with_capacity(reserve);
    let mut forms = Vec::with_capacity(16);
    let mut line_no = 1;
    let mut total = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        if line.starts_with('\t') || line.starts_with('#') {
            continue;
        }

        let entry = match StemEntry::parse(&line, affix.flag_mode) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(e) => {
                skip_line(diagnostics, line_no, e);
                continue;
            }
        };

        if let Err(e) = WordExpander::new(affix).expand(&entry, &mut forms) {
            skip_line(diagnostics, line_no, e);
            continue;
        }
        affix.add_compound_members(&entry);

        if !stems.insert(entry.stem.clone()) {
            diagnostics.push(Diagnostic::DuplicateWordEntry(entry.stem));
        }

        if let Some(stem) = forms.first() {
            sink.add(&forms, case_style(stem));
            total += forms.len();
        }
    }

    if count != stems.len() {
        log::debug!("header announced {} stems, read {}", count, stems.len());
    }
    log::debug!("stem dictionary: {} lines, {} word forms", line_no, total);

    Ok(total)
}

fn open_file(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| LoadError::File(path.display().to_string(), e))
}

/// A loaded speller.
pub struct Engine {
    affix: AffixConfig,
    config: SpellerConfig,
    dictionary: Box<dyn Dictionary>,
    compounds: Vec<CompoundPattern>,
    iconv: IconvTable,
    oconv: IconvTable,
    splitter: Splitter,
    diagnostics: Vec<Diagnostic>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("compounds", &self.compounds.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}

impl Engine {
    /// Loads an affix file and a stem dictionary from disk into memory.
    pub fn load_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        aff: P,
        dic: Q,
    ) -> Result<Engine, LoadError> {
        Engine::load_from_files_with_config(aff, dic, SpellerConfig::default())
    }

    /// [`Engine::load_from_files`] with a custom configuration.
    pub fn load_from_files_with_config<P: AsRef<Path>, Q: AsRef<Path>>(
        aff: P,
        dic: Q,
        config: SpellerConfig,
    ) -> Result<Engine, LoadError> {
        let aff = open_file(aff.as_ref())?;
        let dic = open_file(dic.as_ref())?;
        Engine::load_from_readers_with_config(aff, dic, config)
    }

    /// Loads an affix file and a stem dictionary from streams into memory.
    pub fn load_from_readers<A: Read, D: Read>(aff: A, dic: D) -> Result<Engine, LoadError> {
        Engine::load_from_readers_with_config(aff, dic, SpellerConfig::default())
    }

    /// [`Engine::load_from_readers`] with a custom configuration.
    pub fn load_from_readers_with_config<A: Read, D: Read>(
        aff: A,
        dic: D,
        config: SpellerConfig,
    ) -> Result<Engine, LoadError> {
        let mut affix = AffixConfig::from_reader(aff)?;
        let mut diagnostics = vec![];
        let mut dictionary = MemoryDictionary::default();

        read_stems(&mut affix, dic, &mut dictionary, &mut diagnostics)?;
        if dictionary.is_empty() {
            log::warn!("stem dictionary produced no word forms");
        } else {
            log::debug!("memory dictionary holds {} forms", dictionary.len());
        }

        Ok(Engine::assemble(
            affix,
            config,
            Box::new(dictionary),
            diagnostics,
        ))
    }

    /// Loads an affix file and a stem dictionary into `store`, tagging rows
    /// with `lang`, and saves the affix configuration alongside them.
    pub fn load_into_store<A, D, S>(aff: A, dic: D, store: S, lang: &str) -> Result<Engine, LoadError>
    where
        A: Read,
        D: Read,
        S: WordStore + 'static,
    {
        let config = SpellerConfig {
            lang: Some(lang.into()),
            ..SpellerConfig::default()
        };
        Engine::load_into_store_with_config(aff, dic, store, config)
    }

    /// [`Engine::load_into_store`] with a custom configuration; rows are
    /// tagged with its language.
    pub fn load_into_store_with_config<A, D, S>(
        aff: A,
        dic: D,
        mut store: S,
        config: SpellerConfig,
    ) -> Result<Engine, LoadError>
    where
        A: Read,
        D: Read,
        S: WordStore + 'static,
    {
        let lang = config.lang();
        let mut affix = AffixConfig::from_reader(aff)?;
        let mut diagnostics = vec![];
        let mut sink = RowSink {
            lang: &lang,
            rows: vec![],
        };

        read_stems(&mut affix, dic, &mut sink, &mut diagnostics)?;
        log::debug!("inserting {} rows for {}", sink.rows.len(), lang);
        store.insert(&sink.rows)?;

        let blob = serde_json::to_string(&affix).map_err(StoreError::from)?;
        store.save_config(&blob)?;

        let dictionary = StoreDictionary::new(Box::new(store), lang);
        Ok(Engine::assemble(
            affix,
            config,
            Box::new(dictionary),
            diagnostics,
        ))
    }

    /// Reopens a store filled by [`Engine::load_into_store`] without reading
    /// any affix or stem file.
    pub fn open_store<S: WordStore + 'static>(store: S) -> Result<Engine, LoadError> {
        Engine::open_store_with_config(store, SpellerConfig::default())
    }

    /// [`Engine::open_store`] with a custom configuration.
    pub fn open_store_with_config<S: WordStore + 'static>(
        store: S,
        config: SpellerConfig,
    ) -> Result<Engine, LoadError> {
        let blob = store.load_config()?.ok_or(LoadError::MissingConfig)?;
        let affix: AffixConfig = serde_json::from_str(&blob).map_err(LoadError::InvalidConfig)?;

        let dictionary = StoreDictionary::new(Box::new(store), config.lang());
        Ok(Engine::assemble(affix, config, Box::new(dictionary), vec![]))
    }

    fn assemble(
        affix: AffixConfig,
        config: SpellerConfig,
        dictionary: Box<dyn Dictionary>,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Engine {
        let (compounds, compound_diagnostics) = compound::compile_all(&affix);
        diagnostics.extend(compound_diagnostics);

        Engine {
            iconv: IconvTable::new(&affix.iconv),
            oconv: IconvTable::new(&affix.oconv),
            splitter: Splitter::new(&affix.word_chars),
            compounds,
            affix,
            config,
            dictionary,
            diagnostics,
        }
    }

    /// Whether `word` is spelled correctly.
    pub fn spell(&self, word: &str) -> bool {
        let converted = self.iconv.convert(word);
        let word: &str = &converted;

        if word.is_empty() {
            return false;
        }

        if self.dictionary.contains(word) {
            return true;
        }

        if literal::is_literal(word) {
            log::trace!("{:?} is a literal", word);
            return true;
        }

        if let Some(p) = self.compounds.iter().find(|p| p.is_match(word)) {
            log::trace!("{:?} matches compound rule {}", word, p.source());
            return true;
        }

        if let Some(unit) = literal::number_unit(word) {
            if self.dictionary.contains_unit(unit) {
                return true;
            }
        }

        self.is_camel_case(word)
    }

    fn is_camel_case(&self, word: &str) -> bool {
        let parts = literal::split_camel_case(word);
        if parts.is_empty() {
            return false;
        }

        match self.config.camel_case {
            CamelCaseMode::Permissive => true,
            CamelCaseMode::Strict => parts.iter().all(|part| self.dictionary.contains(part)),
        }
    }

    /// Known words one edit away from `word`, lowercase and sorted.
    ///
    /// Returns nothing for correct words, Roman numerals and initials.
    pub fn suggest(&self, word: &str) -> Vec<SmolStr> {
        if word.is_empty() || self.spell(word) {
            return vec![];
        }

        let lower = lower_case(&self.iconv.convert(word));
        if self.spell(&lower) || literal::is_roman_numeral(word) || literal::is_initial(word) {
            return vec![];
        }

        let patterns = suggestion::candidate_patterns(&lower, &self.affix.replacements);
        let found = self.dictionary.find_matching(&patterns);
        log::trace!(
            "{:?}: {} patterns, {} matches",
            word,
            patterns.len(),
            found.len()
        );

        if self.oconv.is_empty() {
            return found;
        }

        let mut converted = found
            .iter()
            .map(|w| SmolStr::from(&*self.oconv.convert(w)))
            .collect::<Vec<_>>();
        converted.sort();
        converted.dedup();
        converted
    }

    /// Checks `word` and collects suggestions when it is not correct.
    pub fn spell_with_suggestions(&self, word: &str) -> WordCheck {
        let is_correct = self.spell(word);
        WordCheck {
            word: word.into(),
            is_correct,
            suggestions: if is_correct {
                vec![]
            } else {
                self.suggest(word)
            },
        }
    }

    /// Splits text into the words this speller checks.
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.splitter.split(text)
    }

    /// The word splitter configured from `WORDCHARS`.
    pub fn splitter(&self) -> &Splitter {
        &self.splitter
    }

    /// Applies the `ICONV` table to raw input, decoding it lossily as UTF-8.
    pub fn input_conversion(&self, raw: &[u8]) -> String {
        self.iconv.convert_bytes(raw)
    }

    /// Adds one word with the case variants of its own style.
    pub fn add_word(&mut self, word: &str) -> Result<(), LoadError> {
        self.add_words(vec![SmolStr::from(word.trim())]).map(|_| ())
    }

    /// Adds a list of words, one per line. Blank lines and lines starting
    /// with `#` are skipped.
    ///
    /// Returns the entries that were already known; they are also recorded
    /// as [`Diagnostic::DuplicateWordEntry`].
    pub fn add_word_list<R: Read>(&mut self, reader: R) -> Result<Vec<SmolStr>, LoadError> {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::with_capacity(64);
        let mut words = vec![];

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            words.push(SmolStr::from(word));
        }

        self.add_words(words)
    }

    /// Adds a word list read from `path`. See [`Engine::add_word_list`].
    pub fn add_word_list_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<SmolStr>, LoadError> {
        let file = open_file(path.as_ref())?;
        self.add_word_list(file)
    }

    fn add_words(&mut self, words: Vec<SmolStr>) -> Result<Vec<SmolStr>, LoadError> {
        let words = words
            .into_iter()
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>();
        let duplicates = self.dictionary.insert_new(&words)?;

        log::debug!(
            "added {} words, {} already known",
            words.len(),
            duplicates.len()
        );
        self.diagnostics.extend(
            duplicates
                .iter()
                .cloned()
                .map(Diagnostic::DuplicateWordEntry),
        );

        Ok(duplicates)
    }

    /// Problems recovered from while loading or extending the speller.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The parsed affix configuration, including compound class members.
    pub fn affix_config(&self) -> &AffixConfig {
        &self.affix
    }

    /// The query-time configuration.
    pub fn config(&self) -> &SpellerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const AFF: &str = "\
SET UTF-8
TRY esianrtolcdugmphbyfvkwz
WORDCHARS 0123456789'
NOSUGGEST !
ONLYINCOMPOUND c
ICONV 1
ICONV ’ '
REP 1
REP f ph
COMPOUNDRULE 1
COMPOUNDRULE n*mp

SFX S Y 4
SFX S   y     ies        [^aeiou]y
SFX S   0     s          [aeiou]y
SFX S   0     es         [sxzh]
SFX S   0     s          [^sxzhy]
";

    const DIC: &str = "\
14
cat/S
iPhone
world
word
hello
phone
NASA
Paris
GB
don't
1/nm
2/nm
th/pc
darn/!
";

    const PROBES: &[&str] = &[
        "cat", "Cat", "CAT", "cats", "Cats", "CATS", "catss", "world", "World", "NASA", "Nasa",
        "nasa", "Paris", "PARIS", "paris", "don't", "don’t", "12th", "2th", "th", "darn", "100GB",
        "100gb", "5kg", "MCMXCIV", "MCMXCIVQ", "0x1F", "0b101", "3f2a1bc", "helloWorld", "dog",
        "iPhone", "iphone", "Iphone", "IPHONE", "cAt", "caT", "pARIS", "nAsa", "xYzzy", "qWERty",
        "",
    ];

    fn memory_engine() -> Engine {
        Engine::load_from_readers(AFF.as_bytes(), DIC.as_bytes()).unwrap()
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn suffixes_and_case_styles() {
        let engine = memory_engine();

        for word in ["cat", "Cat", "CAT", "cats", "Cats", "CATS", "cAt", "caTS"] {
            assert!(engine.spell(word), "{}", word);
        }
        for word in ["catss", "dog"] {
            assert!(!engine.spell(word), "{}", word);
        }
        for word in ["iPhone", "iphone", "Iphone", "IPHONE"] {
            assert!(engine.spell(word), "{}", word);
        }

        assert!(engine.spell("NASA"));
        assert!(!engine.spell("Nasa"));
        assert!(engine.spell("Paris"));
        assert!(engine.spell("PARIS"));
        assert!(!engine.spell("paris"));
    }

    #[test]
    fn literals_and_units() {
        let engine = memory_engine();

        assert!(engine.spell("MCMXCIV"));
        assert!(!engine.spell("MCMXCIVQ"));
        assert!(engine.spell("0x1F"));
        assert!(engine.spell("0b101"));
        assert!(engine.spell("1,000.5"));
        assert!(engine.spell("3f2a1bc"));
        assert!(engine.spell("100GB"));
        assert!(!engine.spell("5kg"));
    }

    #[test]
    fn compounds_and_flags() {
        let engine = memory_engine();

        assert!(engine.spell("12th"));
        assert!(engine.spell("2th"));
        assert!(!engine.spell("3th"));
        assert!(!engine.spell("th"));
        assert!(!engine.spell("darn"));
        assert_eq!(
            engine.affix_config().compound_map["p"].iter().collect::<Vec<_>>(),
            vec!["th"]
        );
    }

    #[test]
    fn empty_and_initials() {
        let engine = memory_engine();

        assert!(!engine.spell(""));
        assert!(engine.suggest("").is_empty());
        assert!(engine.suggest("A.").is_empty());
        assert!(engine.suggest("cat").is_empty());
        assert!(engine.suggest("CATS").is_empty());
    }

    #[test]
    fn suggestions() {
        let engine = memory_engine();

        assert_eq!(engine.suggest("wrold"), vec!["world"]);
        assert_eq!(engine.suggest("Wrold"), vec!["world"]);
        assert_eq!(engine.suggest("fone"), vec!["phone"]);
        assert_eq!(engine.suggest("cet"), vec!["cat"]);
        assert!(engine.suggest("zzzzzz").is_empty());

        let check = engine.spell_with_suggestions("wrold");
        assert!(!check.is_correct);
        assert_eq!(check.suggestions, vec!["world"]);
        assert!(engine.spell_with_suggestions("world").suggestions.is_empty());
    }

    #[test]
    fn input_conversion() {
        let engine = memory_engine();

        assert!(engine.spell("don't"));
        assert!(engine.spell("don’t"));
        assert_eq!(engine.input_conversion("don’t".as_bytes()), "don't");
    }

    #[test]
    fn output_conversion() {
        let engine =
            Engine::load_from_readers("OCONV 1\nOCONV o 0\n".as_bytes(), "1\nworld\n".as_bytes())
                .unwrap();
        assert_eq!(engine.suggest("wrold"), vec!["w0rld"]);
    }

    #[test]
    fn splitting() {
        let engine = memory_engine();
        assert_eq!(
            engine.split("Hello, world! don't 'quote' 12th"),
            vec!["Hello", "world", "don't", "quote", "12th"]
        );
    }

    #[test]
    fn camel_case_modes() {
        let engine = memory_engine();
        assert!(engine.spell("helloWorld"));
        assert!(engine.spell("fooBar"));
        assert!(engine.spell("xYzzy"));
        assert!(engine.spell("qWERty"));

        let strict = SpellerConfig {
            camel_case: CamelCaseMode::Strict,
            ..SpellerConfig::default()
        };
        let engine =
            Engine::load_from_readers_with_config(AFF.as_bytes(), DIC.as_bytes(), strict).unwrap();
        assert!(engine.spell("helloWorld"));
        assert!(!engine.spell("fooBar"));
        assert!(!engine.spell("xYzzy"));
        assert!(!engine.spell("qWERty"));
        assert!(engine.spell("cAt"));
    }

    #[test]
    fn word_lists_are_idempotent() {
        let mut engine = memory_engine();
        let list = "alpha\nbeta\n# comment\n\n  Gamma  \n";

        assert!(engine.add_word_list(list.as_bytes()).unwrap().is_empty());
        assert!(engine.spell("alpha"));
        assert!(engine.spell("Gamma"));
        assert!(!engine.spell("gamma"));
        assert!(engine.diagnostics().is_empty());

        let duplicates = engine.add_word_list(list.as_bytes()).unwrap();
        for word in ["alpha", "beta", "Gamma"] {
            assert!(duplicates.contains(&SmolStr::from(word)), "{}", word);
        }
        assert!(engine
            .diagnostics()
            .contains(&Diagnostic::DuplicateWordEntry("alpha".into())));

        engine.add_word("delta").unwrap();
        assert!(engine.spell("Delta"));
    }

    #[test]
    fn word_list_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.txt");
        std::fs::write(&path, "epsilon\n").unwrap();

        let mut engine = memory_engine();
        assert!(engine.add_word_list_file(&path).unwrap().is_empty());
        assert!(engine.spell("epsilon"));
        assert!(matches!(
            engine.add_word_list_file(dir.path().join("missing.txt")),
            Err(LoadError::File(..))
        ));
    }

    #[test]
    fn store_agrees_with_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.json");
        let memory = memory_engine();

        let store = MemoryStore::create(&path).unwrap();
        let stored = Engine::load_into_store(AFF.as_bytes(), DIC.as_bytes(), store, "en").unwrap();
        for word in PROBES {
            assert_eq!(memory.spell(word), stored.spell(word), "{:?}", word);
        }
        assert_eq!(stored.suggest("wrold"), vec!["world"]);
        drop(stored);

        let mut reopened = Engine::open_store(MemoryStore::open(&path).unwrap()).unwrap();
        for word in PROBES {
            assert_eq!(memory.spell(word), reopened.spell(word), "{:?}", word);
        }
        assert_eq!(reopened.suggest("wrold"), vec!["world"]);

        let list = "alpha\nNASA\n";
        assert_eq!(reopened.add_word_list(list.as_bytes()).unwrap(), vec!["NASA"]);
        assert_eq!(
            reopened.add_word_list(list.as_bytes()).unwrap(),
            vec!["alpha", "NASA"]
        );
        assert!(reopened.spell("Alpha"));
    }

    #[test]
    fn store_without_config() {
        assert!(matches!(
            Engine::open_store(MemoryStore::new()),
            Err(LoadError::MissingConfig)
        ));

        let mut store = MemoryStore::new();
        store.save_config("not json").unwrap();
        assert!(matches!(
            Engine::open_store(store),
            Err(LoadError::InvalidConfig(_))
        ));
    }

    #[test]
    fn recoverable_problems_become_diagnostics() {
        let aff = "COMPOUNDRULE 2\nCOMPOUNDRULE (ab\nCOMPOUNDRULE ab\nSFX S Y 1\nSFX S 0 s .\n";
        let dic = "5\n/x\nfoo/Z\ncat/S\n\tmorphology\ncat\nbar/ab\n";
        let engine = Engine::load_from_readers(aff.as_bytes(), dic.as_bytes()).unwrap();

        let diagnostics = engine.diagnostics();
        assert!(diagnostics.contains(&Diagnostic::MalformedStemEntry {
            line: 2,
            reason: "slash char found in first or last position".into(),
        }));
        assert!(diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::MalformedStemEntry { line: 3, .. })));
        assert!(diagnostics.contains(&Diagnostic::DuplicateWordEntry("cat".into())));
        assert!(diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::MalformedCompoundPattern { pattern, .. } if pattern == "(ab")));

        assert!(engine.spell("cats"));
        assert!(!engine.spell("foo"));
        assert!(engine.spell("bar"));
        assert!(engine.spell("barbar"));
    }

    #[test]
    fn fatal_errors() {
        assert!(matches!(
            Engine::load_from_readers(AFF.as_bytes(), "".as_bytes()),
            Err(LoadError::MalformedStemHeader(h)) if h.is_empty()
        ));
        assert!(matches!(
            Engine::load_from_readers(AFF.as_bytes(), "cat\n".as_bytes()),
            Err(LoadError::MalformedStemHeader(h)) if h == "cat"
        ));
        assert!(matches!(
            Engine::load_from_readers("SFX S 0 s .\n".as_bytes(), DIC.as_bytes()),
            Err(LoadError::MalformedAffixFile(_))
        ));
        assert!(matches!(
            Engine::load_from_files("/nonexistent/en.aff", "/nonexistent/en.dic"),
            Err(LoadError::File(..))
        ));
    }

    #[test]
    fn load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let aff = dir.path().join("en_US.aff");
        let dic = dir.path().join("en_US.dic");
        std::fs::write(&aff, AFF).unwrap();
        std::fs::write(&dic, DIC).unwrap();

        let engine = Engine::load_from_files(&aff, &dic).unwrap();
        assert!(engine.spell("cats"));
        assert!(engine.diagnostics().is_empty());
    }
}
