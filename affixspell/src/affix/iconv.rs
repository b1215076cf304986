use std::borrow::Cow;

use smol_str::SmolStr;

/// Ordered string replacement table built from `ICONV`/`OCONV` pairs.
///
/// At each position of the input the first pair whose source text matches
/// wins; matches do not overlap and are taken left to right. Sources are
/// compared literally.
#[derive(Clone, Debug, Default)]
pub struct IconvTable {
    pairs: Vec<(SmolStr, SmolStr)>,
}

impl IconvTable {
    /// Builds a table, dropping pairs with an empty source.
    pub fn new(pairs: &[(SmolStr, SmolStr)]) -> IconvTable {
        IconvTable {
            pairs: pairs
                .iter()
                .filter(|(from, _)| !from.is_empty())
                .cloned()
                .collect(),
        }
    }

    /// Whether the table has no replacements.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Applies the table to `input`, borrowing it when nothing changes.
    pub fn convert<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if self.pairs.is_empty() {
            return Cow::Borrowed(input);
        }

        let mut out: Option<String> = None;
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];
            match self.pairs.iter().find(|(from, _)| rest.starts_with(from.as_str())) {
                Some((from, to)) => {
                    let buf = out.get_or_insert_with(|| input[..pos].to_string());
                    buf.push_str(to);
                    pos += from.len();
                }
                None => {
                    let ch = match rest.chars().next() {
                        Some(ch) => ch,
                        None => break,
                    };
                    if let Some(buf) = out.as_mut() {
                        buf.push(ch);
                    }
                    pos += ch.len_utf8();
                }
            }
        }

        match out {
            Some(s) => Cow::Owned(s),
            None => Cow::Borrowed(input),
        }
    }

    /// Converts raw input bytes, decoding them as UTF-8 first.
    pub fn convert_bytes(&self, raw: &[u8]) -> String {
        let text = String::from_utf8_lossy(raw);
        self.convert(&text).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> IconvTable {
        IconvTable::new(
            &pairs
                .iter()
                .map(|(a, b)| (SmolStr::from(*a), SmolStr::from(*b)))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn first_pair_wins() {
        let t = table(&[("a", "1"), ("ab", "2")]);
        assert_eq!(t.convert("abab"), "1b1b");

        let t = table(&[("ab", "2"), ("a", "1")]);
        assert_eq!(t.convert("abab"), "22");
        assert_eq!(t.convert("aab"), "12");
    }

    #[test]
    fn no_rescan_of_replacements() {
        let t = table(&[("’", "'"), ("'", "’")]);
        assert_eq!(t.convert("don’t"), "don't");
    }

    #[test]
    fn borrows_when_unchanged() {
        let t = table(&[("x", "y")]);
        assert!(matches!(t.convert("abc"), Cow::Borrowed(_)));
        assert!(matches!(table(&[]).convert("abc"), Cow::Borrowed(_)));
        assert_eq!(t.convert_bytes("xäx".as_bytes()), "yäy");
    }
}
