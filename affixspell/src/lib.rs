/*! Spell-checking and correction with affix-rule dictionaries.

Loads a stem dictionary (`.dic`) together with its affix-rule file (`.aff`),
expands every stem into its surface word forms and answers membership
queries for them. On top of the dictionary the speller recognizes numeric
literals, Roman numerals, hash-like tokens, unit-suffixed numbers, camel-case
compounds and the compound patterns declared by `COMPOUNDRULE`.

Word forms live either in memory or in an external [`store::WordStore`].

# Usage examples

```no_run
use affixspell::speller::Engine;

let engine = Engine::load_from_files("en_US.aff", "en_US.dic").unwrap();

for word in engine.split("Ths is a sentense.") {
    if !engine.spell(word) {
        println!("{}: {:?}", word, engine.suggest(word));
    }
}
```

Further examples can be found in `affixspell-bin` in the same repository.
*/

#![warn(missing_docs)]
pub mod affix;
pub mod paths;
pub mod speller;
pub mod store;
pub mod tokenizer;
