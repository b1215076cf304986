//! Splitting text into checkable words.
use hashbrown::HashSet;
use unic_ucd_category::GeneralCategory;

pub mod case_handling;

/// Splits text into words made of letters, numbers, combining marks and the
/// extra characters declared by `WORDCHARS`.
///
/// Extra characters that are not themselves letters or numbers, such as `'`
/// or `-`, are only kept inside a word and are trimmed from its ends.
#[derive(Debug, Clone, Default)]
pub struct Splitter {
    extra: HashSet<char>,
}

#[inline(always)]
fn is_alphanumeric(ch: char) -> bool {
    let cat = GeneralCategory::of(ch);
    cat.is_letter() || cat.is_number() || cat.is_mark()
}

impl Splitter {
    /// Creates a splitter from a `WORDCHARS` value.
    pub fn new(word_chars: &str) -> Splitter {
        Splitter {
            extra: word_chars.chars().collect(),
        }
    }

    /// Whether `ch` may appear in a word.
    pub fn is_word_char(&self, ch: char) -> bool {
        is_alphanumeric(ch) || self.extra.contains(&ch)
    }

    fn is_edge_char(&self, ch: char) -> bool {
        !is_alphanumeric(ch)
    }

    /// Iterates over the words of `text` with their byte offsets.
    pub fn word_indices<'t>(&self, text: &'t str) -> WordIndices<'_, 't> {
        WordIndices {
            splitter: self,
            text,
            pos: 0,
        }
    }

    /// Collects the words of `text`, in order.
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.word_indices(text).map(|(_, word)| word).collect()
    }
}

/// Iterator over `(offset, word)` pairs. Words are never empty.
#[derive(Debug, Clone)]
pub struct WordIndices<'s, 't> {
    splitter: &'s Splitter,
    text: &'t str,
    pos: usize,
}

impl<'s, 't> Iterator for WordIndices<'s, 't> {
    type Item = (usize, &'t str);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];

            let start = match rest.find(|c: char| self.splitter.is_word_char(c)) {
                Some(i) => self.pos + i,
                None => {
                    self.pos = self.text.len();
                    return None;
                }
            };
            let end = self.text[start..]
                .find(|c: char| !self.splitter.is_word_char(c))
                .map(|i| start + i)
                .unwrap_or(self.text.len());
            self.pos = end;

            let run = &self.text[start..end];
            let word = run.trim_start_matches(|c: char| self.splitter.is_edge_char(c));
            let offset = start + (run.len() - word.len());
            let word = word.trim_end_matches(|c: char| self.splitter.is_edge_char(c));

            if !word.is_empty() {
                return Some((offset, word));
            }
        }

        None
    }
}

/// Word splitting directly on strings.
pub trait Tokenize {
    /// Iterates over words with their byte offsets.
    fn word_indices_with<'s>(&self, splitter: &'s Splitter) -> WordIndices<'s, '_>;
}

impl Tokenize for str {
    fn word_indices_with<'s>(&self, splitter: &'s Splitter) -> WordIndices<'s, '_> {
        splitter.word_indices(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic() {
        let splitter = Splitter::new("'");
        assert_eq!(
            splitter.split("this is an ordinary sentence! \"Don't\", she said."),
            vec!["this", "is", "an", "ordinary", "sentence", "Don't", "she", "said"]
        );
        assert_eq!(splitter.split("'quoted'"), vec!["quoted"]);
        assert_eq!(splitter.split(" ' -- ' "), Vec::<&str>::new());
        assert_eq!(splitter.split(""), Vec::<&str>::new());
    }

    #[test]
    fn word_chars() {
        let msg = "an ordinary-sentence, 100GB and 3.14";

        assert_eq!(
            Splitter::new("").split(msg),
            vec!["an", "ordinary", "sentence", "100GB", "and", "3", "14"]
        );
        assert_eq!(
            Splitter::new("-.").split(msg),
            vec!["an", "ordinary-sentence", "100GB", "and", "3.14"]
        );
    }

    #[test]
    fn offsets() {
        let splitter = Splitter::new("'");
        assert_eq!(
            "ça va? 'bien'".word_indices_with(&splitter).collect::<Vec<_>>(),
            vec![(0, "ça"), (4, "va"), (9, "bien")]
        );
    }

    #[test]
    fn reconstructs_input() {
        let splitter = Splitter::new("'-");
        let inputs = [
            "Hello, world!",
            "  leading and trailing  ",
            "-dash- 'quote' mid-word don't",
            "unicode: Davvisámegiella, 東京, بِسْمِ",
            "",
        ];

        for text in inputs.iter() {
            let mut rebuilt = String::new();
            let mut last = 0;
            for (offset, word) in splitter.word_indices(text) {
                assert!(!word.is_empty());
                let separator = &text[last..offset];
                assert!(separator.chars().all(|c| !c.is_alphanumeric()));
                rebuilt.push_str(separator);
                rebuilt.push_str(word);
                last = offset + word.len();
            }
            rebuilt.push_str(&text[last..]);
            assert_eq!(rebuilt.as_str(), *text);
        }
    }
}
