use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use gumdrop::Options;
use language_tags::LanguageTag;
use serde::Serialize;
use smol_str::SmolStr;

use affixspell::affix::AffixConfig;
use affixspell::paths::{affix_path_for, lang_tag_from_path};
use affixspell::speller::{CamelCaseMode, Engine, SpellerConfig};
use affixspell::store::MemoryStore;
use affixspell::tokenizer::{Splitter, Tokenize};

trait OutputWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool);
    fn write_suggestions(&mut self, word: &str, suggestions: &[SmolStr]);
    fn finish(&mut self) -> anyhow::Result<()>;
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        println!(
            "Input: {}\t\t[{}]",
            &word,
            if is_correct { "CORRECT" } else { "INCORRECT" }
        );
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[SmolStr]) {
        for sugg in suggestions {
            println!("{}", sugg);
        }
        println!();
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
struct SuggestionRequest {
    word: String,
    is_correct: bool,
    suggestions: Vec<SmolStr>,
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<SuggestionRequest>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        self.results.push(SuggestionRequest {
            word: word.to_owned(),
            is_correct,
            suggestions: vec![],
        });
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[SmolStr]) {
        if let Some(last) = self.results.last_mut() {
            last.suggestions = suggestions.to_vec();
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

fn run(
    engine: &Engine,
    words: Vec<String>,
    writer: &mut dyn OutputWriter,
    is_suggesting: bool,
    is_always_suggesting: bool,
) {
    for word in words {
        let is_correct = engine.spell(&word);
        writer.write_correction(&word, is_correct);

        if is_suggesting && (is_always_suggesting || !is_correct) {
            let suggestions = engine.suggest(&word);
            writer.write_suggestions(&word, &suggestions);
        }
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "check whether the provided words are spelled correctly")]
    Spell(CheckArgs),

    #[options(help = "get suggestions for provided input")]
    Suggest(CheckArgs),

    #[options(help = "print input in word-separated tokenized form")]
    Tokenize(TokenizeArgs),
}

#[derive(Debug, Options)]
struct CheckArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "affix file, defaults to the .aff next to the stem dictionary")]
    aff: Option<PathBuf>,

    #[options(help = "stem dictionary (.dic) to be used")]
    dic: Option<PathBuf>,

    #[options(
        no_short,
        help = "JSON word store; built from --aff/--dic when given, reopened otherwise"
    )]
    store: Option<PathBuf>,

    #[options(no_short, help = "language tag for store rows, taken from --dic by default")]
    lang: Option<String>,

    #[options(short = "w", long = "word-list", help = "extra words, one per line")]
    word_list: Option<PathBuf>,

    #[options(short = "S", help = "always show suggestions even if word is correct")]
    always_suggest: bool,

    #[options(
        no_short,
        long = "strict-camel-case",
        help = "require every camel-case part to be a known word"
    )]
    strict_camel_case: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "affix file whose WORDCHARS are used")]
    aff: Option<PathBuf>,

    #[options(free, help = "text to be tokenized")]
    inputs: Vec<String>,
}

fn read_stdin() -> anyhow::Result<Vec<u8>> {
    eprintln!("Reading from stdin...");
    let mut buffer = vec![];
    io::stdin()
        .read_to_end(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}

fn open(path: &Path) -> anyhow::Result<File> {
    File::open(path).with_context(|| format!("opening {}", path.display()))
}

fn load_engine(args: &CheckArgs) -> anyhow::Result<Engine> {
    let mut config = SpellerConfig::default();
    if args.strict_camel_case {
        config.camel_case = CamelCaseMode::Strict;
    }

    if let Some(lang) = args.lang.as_deref() {
        let tag = LanguageTag::parse(lang).with_context(|| format!("invalid language tag {lang:?}"))?;
        config.lang = Some(tag.as_str().into());
    } else {
        config.lang = args.dic.as_deref().and_then(lang_tag_from_path);
    }

    let aff = args
        .aff
        .clone()
        .or_else(|| args.dic.as_deref().map(affix_path_for));

    let mut engine = match (aff, args.dic.as_ref(), args.store.as_ref()) {
        (Some(aff), Some(dic), Some(store)) => {
            let store = MemoryStore::create(store)?;
            Engine::load_into_store_with_config(open(&aff)?, open(dic)?, store, config)?
        }
        (_, None, Some(store)) => {
            Engine::open_store_with_config(MemoryStore::open(store)?, config)?
        }
        (Some(aff), Some(dic), None) => Engine::load_from_files_with_config(aff, dic, config)?,
        _ => anyhow::bail!("a stem dictionary (--dic) or a word store (--store) is required"),
    };

    if let Some(path) = args.word_list.as_ref() {
        let duplicates = engine.add_word_list_file(path)?;
        log::info!(
            "{}: {} entries were already known",
            path.display(),
            duplicates.len()
        );
    }

    for diagnostic in engine.diagnostics() {
        log::warn!("{}", diagnostic);
    }

    Ok(engine)
}

fn check(args: CheckArgs, is_suggesting: bool) -> anyhow::Result<()> {
    let engine = load_engine(&args)?;

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let text = if args.inputs.is_empty() {
        engine.input_conversion(&read_stdin()?)
    } else {
        args.inputs.join(" ")
    };

    let words = engine
        .split(&text)
        .into_iter()
        .map(str::to_string)
        .collect();

    run(
        &engine,
        words,
        &mut *writer,
        is_suggesting,
        args.always_suggest,
    );

    writer.finish()
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let splitter = match args.aff.as_ref() {
        Some(path) => {
            let config = AffixConfig::from_reader(open(path)?)?;
            Splitter::new(&config.word_chars)
        }
        None => Splitter::default(),
    };

    let inputs: String = if args.inputs.is_empty() {
        String::from_utf8_lossy(&read_stdin()?).into_owned()
    } else {
        args.inputs.join(" ")
    };

    for (index, token) in inputs.word_indices_with(&splitter) {
        println!("{:>4}: \"{}\"", index, token);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Spell(args)) => check(args, false),
        Some(Command::Suggest(args)) => check(args, true),
        Some(Command::Tokenize(args)) => tokenize(args),
    }
}
