/*! Regression testing for affix-rule dictionaries

Runs a list of expectations against a dictionary and reports the ones that no
longer hold. Can be used in automated scripts to cap the amount of breakage
when a dictionary is updated.

The word file is tab separated, one expectation per line:

```text
# word	verdict	expected suggestion (optional)
cats	correct
wrold	incorrect	world
```

# Usage examples

It's a command-line tool:
```console
$ cargo run -- --aff en_US.aff --dic en_US.dic --words expectations.tsv --threshold 0.1
```
will expect less than 10 % of the expectations to fail.
*/

use std::error::Error;
use std::path::PathBuf;

use affixspell::speller::Engine;

use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "AFFFILE")]
    aff: PathBuf,
    #[arg(short, long, value_name = "DICFILE")]
    dic: PathBuf,
    #[arg(short, long, value_name = "WORDFILE")]
    words: PathBuf,
    #[arg(short, long, value_name = "THOLD")]
    threshold: f32,
}

struct Expectation {
    word: String,
    is_correct: bool,
    suggestion: Option<String>,
}

fn load_expectations(path: PathBuf) -> Result<Vec<Expectation>, Box<dyn Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut expectations = vec![];
    for record in rdr.records() {
        let record = record?;
        let (word, verdict) = match (record.get(0), record.get(1)) {
            (Some(word), Some(verdict)) => (word, verdict),
            _ => continue,
        };
        let is_correct = match verdict.trim() {
            "correct" | "true" | "1" => true,
            "incorrect" | "false" | "0" => false,
            other => return Err(format!("unknown verdict {:?} for {:?}", other, word).into()),
        };
        expectations.push(Expectation {
            word: word.trim().to_string(),
            is_correct,
            suggestion: record
                .get(2)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        });
    }

    Ok(expectations)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let engine = Engine::load_from_files(&cli.aff, &cli.dic)?;
    let expectations = load_expectations(cli.words)?;

    if expectations.is_empty() {
        return Err("Could not find any words to check".into());
    }

    let mut regressions = 0;
    for exp in &expectations {
        let check = engine.spell_with_suggestions(&exp.word);

        if check.is_correct != exp.is_correct {
            println!(
                "Regression: {} expected {} but was {}",
                exp.word,
                verdict(exp.is_correct),
                verdict(check.is_correct)
            );
            regressions += 1;
            continue;
        }

        if let Some(expected) = exp.suggestion.as_deref() {
            if !check.suggestions.iter().any(|s| s == expected) {
                println!(
                    "Regression: {} -> {} not suggested, got [{}]",
                    exp.word,
                    expected,
                    check
                        .suggestions
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                regressions += 1;
                continue;
            }
        }

        print!(".");
    }
    println!();

    let regressionrate = regressions as f32 / expectations.len() as f32;
    if cli.threshold > regressionrate {
        Ok(())
    } else {
        Err(format!(
            "regressions more than threshold {} > {}",
            regressionrate, cli.threshold
        ))?
    }
}

fn verdict(is_correct: bool) -> &'static str {
    if is_correct {
        "correct"
    } else {
        "incorrect"
    }
}
