//! Expansion of stem dictionary entries into surface word forms.
use hashbrown::HashSet;
use smol_str::SmolStr;

use super::{Affix, AffixConfig, AffixKind, Flag, FlagMode, StemError};

/// A line of the stem dictionary: a stem and the flags attached to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StemEntry {
    /// The base word.
    pub stem: SmolStr,
    /// Flags in the order they were written.
    pub flags: Vec<Flag>,
}

impl StemEntry {
    /// Parses a `stem[/flags] [morphology...]` line.
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str, mode: FlagMode) -> Result<Option<StemEntry>, StemError> {
        let word = match line.split_whitespace().next() {
            Some(w) => w,
            None => return Ok(None),
        };

        let (stem, flags) = match word.split_once('/') {
            None => (word, ""),
            Some(("", _)) | Some((_, "")) => return Err(StemError::SlashPosition),
            Some((stem, flags)) => (stem, flags),
        };

        let flags = mode
            .parse_flags(flags)
            .ok_or_else(|| StemError::InvalidFlags(flags.into()))?;

        Ok(Some(StemEntry {
            stem: stem.into(),
            flags,
        }))
    }

    fn has_flag(&self, flag: Option<&Flag>) -> bool {
        match flag {
            Some(flag) => self.flags.contains(flag),
            None => false,
        }
    }
}

/// Turns stems and their flags into every word form the affix rules allow.
///
/// Forms are produced in this order: the stem; forms of affixes that do not
/// cross; cross-product suffixes; then each cross-product prefix followed by
/// every cross-product suffix applied to the prefixed forms. A form already
/// produced is not repeated.
pub struct WordExpander<'a> {
    config: &'a AffixConfig,
}

impl<'a> WordExpander<'a> {
    /// Creates an expander over the rule tables of `config`.
    pub fn new(config: &'a AffixConfig) -> WordExpander<'a> {
        WordExpander { config }
    }

    /// Expands `entry` into `out`, which is cleared first.
    pub fn expand(&self, entry: &StemEntry, out: &mut Vec<SmolStr>) -> Result<(), StemError> {
        out.clear();

        if entry.has_flag(self.config.no_suggest.as_ref())
            || entry.has_flag(self.config.only_in_compound.as_ref())
        {
            return Ok(());
        }

        let mut seen = HashSet::new();
        let mut push = |out: &mut Vec<SmolStr>, word: SmolStr| {
            if seen.insert(word.clone()) {
                out.push(word);
            }
        };

        push(out, entry.stem.clone());

        let mut prefixes: Vec<&Affix> = vec![];
        let mut suffixes: Vec<&Affix> = vec![];

        for flag in entry.flags.iter() {
            let affix = match self.config.affix(flag) {
                Some(affix) => affix,
                None if self.is_marker(flag) => continue,
                None => return Err(StemError::UnknownFlag(flag.clone())),
            };

            if !affix.cross_product {
                for word in affix.apply(&entry.stem) {
                    push(out, word);
                }
                continue;
            }

            match affix.kind {
                AffixKind::Prefix => prefixes.push(affix),
                AffixKind::Suffix => suffixes.push(affix),
            }
        }

        for suffix in suffixes.iter() {
            for word in suffix.apply(&entry.stem) {
                push(out, word);
            }
        }

        for prefix in prefixes.iter() {
            let prefixed = prefix.apply(&entry.stem).collect::<Vec<_>>();
            for word in prefixed.iter() {
                push(out, word.clone());
            }
            for suffix in suffixes.iter() {
                for word in prefixed.iter() {
                    for form in suffix.apply(word) {
                        push(out, form);
                    }
                }
            }
        }

        Ok(())
    }

    fn is_marker(&self, flag: &Flag) -> bool {
        self.config.is_compound_flag(flag)
            || self.config.no_suggest.as_ref() == Some(flag)
            || self.config.only_in_compound.as_ref() == Some(flag)
    }
}
