//! Affix rule files: parsing and the model of prefixes, suffixes and compounds.
//!
//! An affix file is line oriented. Each line starts with a directive name;
//! unknown directives are skipped so that dictionaries written for richer
//! engines still load.
use std::collections::BTreeSet;
use std::io::{BufRead, BufReader, Read};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

pub mod error;
pub mod expand;
pub mod iconv;
pub mod rule;

pub use self::error::{AffixError, StemError};
pub use self::expand::{StemEntry, WordExpander};
pub use self::iconv::IconvTable;
pub use self::rule::{Affix, AffixKind, AffixRule, Condition, Flag, FlagMode};

/// One element of a `COMPOUNDRULE` pattern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundToken {
    /// A compound class flag
    Flag(Flag),
    /// One of `(`, `)`, `+`, `?`, `*`
    Op(char),
}

/// A `COMPOUNDRULE` pattern, tokenized according to the flag mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundRule {
    /// The pattern as written in the affix file.
    pub source: SmolStr,
    /// The tokenized pattern.
    pub tokens: Vec<CompoundToken>,
}

impl CompoundRule {
    fn parse(source: &str, mode: FlagMode) -> CompoundRule {
        let mut tokens = vec![];
        let mut chars = source.chars();

        while let Some(ch) = chars.next() {
            match (mode, ch) {
                (FlagMode::Char, '(' | ')') | (_, '+' | '?' | '*') => {
                    tokens.push(CompoundToken::Op(ch));
                }
                (FlagMode::Long | FlagMode::Numeric, '(') => {
                    let flag = chars.by_ref().take_while(|c| *c != ')').collect::<SmolStr>();
                    tokens.push(CompoundToken::Flag(flag));
                }
                _ => tokens.push(CompoundToken::Flag(SmolStr::from(ch.to_string()))),
            }
        }

        CompoundRule {
            source: source.into(),
            tokens,
        }
    }

    /// Flags referenced by this rule, in order of appearance.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.tokens.iter().filter_map(|t| match t {
            CompoundToken::Flag(f) => Some(f),
            CompoundToken::Op(_) => None,
        })
    }
}

/// The parsed contents of an affix file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AffixConfig {
    /// How flags are written, from `FLAG`.
    pub flag_mode: FlagMode,
    /// Extra characters allowed inside words, from `WORDCHARS`.
    pub word_chars: SmolStr,
    /// Stems carrying this flag are left out of the dictionary, from `NOSUGGEST`.
    pub no_suggest: Option<Flag>,
    /// Stems carrying this flag only appear inside compounds, from `ONLYINCOMPOUND`.
    pub only_in_compound: Option<Flag>,
    /// Input conversion pairs, from `ICONV`.
    pub iconv: Vec<(SmolStr, SmolStr)>,
    /// Output conversion pairs, from `OCONV`.
    pub oconv: Vec<(SmolStr, SmolStr)>,
    /// Typical misspelling pairs, from `REP`.
    pub replacements: Vec<(SmolStr, SmolStr)>,
    /// Prefix classes by flag.
    pub prefixes: HashMap<Flag, Affix>,
    /// Suffix classes by flag.
    pub suffixes: HashMap<Flag, Affix>,
    /// Compound patterns, from `COMPOUNDRULE`.
    pub compound_rules: Vec<CompoundRule>,
    /// Stems belonging to each compound class flag.
    pub compound_map: HashMap<Flag, BTreeSet<SmolStr>>,
    #[serde(skip)]
    compound_rules_started: bool,
}

impl AffixConfig {
    /// Parses an affix file.
    pub fn from_reader<R: Read>(reader: R) -> Result<AffixConfig, AffixError> {
        let mut reader = BufReader::new(reader);
        let mut config = AffixConfig::default();
        let mut buf = Vec::with_capacity(256);
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let line = String::from_utf8_lossy(&buf);
            config.parse_line(line_no, line.trim_start_matches('\u{feff}'))?;
        }

        log::debug!(
            "affix file: {} prefixes, {} suffixes, {} compound rules",
            config.prefixes.len(),
            config.suffixes.len(),
            config.compound_rules.len()
        );

        Ok(config)
    }

    fn parse_line(&mut self, line: usize, text: &str) -> Result<(), AffixError> {
        let parts = text.split_whitespace().collect::<Vec<_>>();
        let directive = match parts.first() {
            Some(d) if !d.starts_with('#') => *d,
            _ => return Ok(()),
        };

        let expect = |n: usize| {
            if parts.len() == n {
                Ok(())
            } else {
                Err(AffixError::FieldCount {
                    line,
                    directive: directive.into(),
                    expected: if n == 2 { "2" } else { "3" },
                    found: parts.len(),
                })
            }
        };

        match directive {
            "FLAG" => {
                expect(2)?;
                self.flag_mode =
                    FlagMode::from_directive(parts[1]).ok_or_else(|| AffixError::Flag {
                        line,
                        value: parts[1].into(),
                    })?;
            }
            "WORDCHARS" => {
                expect(2)?;
                self.word_chars = parts[1].into();
            }
            "NOSUGGEST" | "ONLYINCOMPOUND" => {
                expect(2)?;
                let flag = self.parse_flag(line, parts[1])?;
                if directive == "NOSUGGEST" {
                    self.no_suggest = Some(flag);
                } else {
                    self.only_in_compound = Some(flag);
                }
            }
            "ICONV" | "OCONV" | "REP" => {
                // The first line of each table only carries a count.
                if parts.len() == 2 {
                    return Ok(());
                }
                expect(3)?;
                let pair = (SmolStr::from(parts[1]), SmolStr::from(parts[2]));
                match directive {
                    "ICONV" => self.iconv.push(pair),
                    "OCONV" => self.oconv.push(pair),
                    _ => self.replacements.push(pair),
                }
            }
            "COMPOUNDRULE" => {
                expect(2)?;
                // Only the first line can be the count.
                if !std::mem::replace(&mut self.compound_rules_started, true) {
                    if let Ok(count) = parts[1].parse::<usize>() {
                        self.compound_rules.reserve(count);
                        return Ok(());
                    }
                }
                let rule = CompoundRule::parse(parts[1], self.flag_mode);
                for flag in rule.flags() {
                    self.compound_map.entry(flag.clone()).or_default();
                }
                self.compound_rules.push(rule);
            }
            "PFX" | "SFX" => {
                let kind = if directive == "PFX" {
                    AffixKind::Prefix
                } else {
                    AffixKind::Suffix
                };
                self.parse_affix_line(line, kind, &parts)?;
            }
            _ => log::trace!("line {}: skipping directive {}", line, directive),
        }

        Ok(())
    }

    fn parse_affix_line(
        &mut self,
        line: usize,
        kind: AffixKind,
        parts: &[&str],
    ) -> Result<(), AffixError> {
        if parts.len() < 4 {
            return Err(AffixError::FieldCount {
                line,
                directive: parts[0].into(),
                expected: "at least 4",
                found: parts.len(),
            });
        }

        let flag = self.parse_flag(line, parts[1])?;

        if parts.len() > 4 {
            let strip = match parts[2] {
                "0" => "",
                s => s,
            };
            // Continuation flags after the slash are not supported and dropped.
            let add = match parts[3].split('/').next() {
                Some("0") | None => "",
                Some(s) => s,
            };
            let condition = Condition::parse(parts[4]).ok_or_else(|| AffixError::Condition {
                line,
                condition: parts[4].into(),
            })?;

            let table = match kind {
                AffixKind::Prefix => &mut self.prefixes,
                AffixKind::Suffix => &mut self.suffixes,
            };
            let affix = table
                .get_mut(&flag)
                .ok_or_else(|| AffixError::UndeclaredFlag {
                    line,
                    flag: flag.clone(),
                })?;
            affix.rules.push(AffixRule {
                strip: strip.into(),
                add: add.into(),
                condition,
            });
            return Ok(());
        }

        if self.prefixes.contains_key(&flag) || self.suffixes.contains_key(&flag) {
            return Err(AffixError::DuplicateFlag { line, flag });
        }

        let cross_product = match parts[2] {
            "Y" => true,
            "N" => false,
            value => {
                return Err(AffixError::CrossProduct {
                    line,
                    value: value.into(),
                })
            }
        };

        let count = parts[3].parse::<usize>().map_err(|_| AffixError::Number {
            line,
            value: parts[3].into(),
        })?;

        let mut affix = Affix::new(kind, cross_product);
        affix.rules.reserve(count);

        match kind {
            AffixKind::Prefix => self.prefixes.insert(flag, affix),
            AffixKind::Suffix => self.suffixes.insert(flag, affix),
        };

        Ok(())
    }

    fn parse_flag(&self, line: usize, value: &str) -> Result<Flag, AffixError> {
        self.flag_mode
            .parse_flag(value)
            .ok_or_else(|| AffixError::Flag {
                line,
                value: value.into(),
            })
    }

    /// Looks up a prefix or suffix class by flag.
    pub fn affix(&self, flag: &str) -> Option<&Affix> {
        self.prefixes.get(flag).or_else(|| self.suffixes.get(flag))
    }

    /// Whether `flag` is a compound class flag.
    pub fn is_compound_flag(&self, flag: &str) -> bool {
        self.compound_map.contains_key(flag)
    }

    /// Records the stem of `entry` as a member of each compound class it carries.
    pub fn add_compound_members(&mut self, entry: &StemEntry) {
        for flag in entry.flags.iter() {
            if let Some(members) = self.compound_map.get_mut(flag) {
                members.insert(entry.stem.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFF: &str = "\
# sample
SET UTF-8
TRY esianrtolcdugmphbyfvkwz
WORDCHARS 0123456789'.-
NOSUGGEST !
ONLYINCOMPOUND c
ICONV 2
ICONV ’ '
ICONV ﬁ fi
REP 1
REP f ph
COMPOUNDRULE 2
COMPOUNDRULE n*1t
COMPOUNDRULE n*mp

PFX A Y 1
PFX A   0     re         .

SFX S Y 4
SFX S   y     ies        [^aeiou]y
SFX S   0     s          [aeiou]y
SFX S   0     es         [sxzh]
SFX S   0     s          [^sxzhy]

SFX G N 1
SFX G   e     ing/X      e
";

    #[test]
    fn parses_directives() {
        let aff = AffixConfig::from_reader(AFF.as_bytes()).unwrap();

        assert_eq!(aff.flag_mode, FlagMode::Char);
        assert_eq!(aff.word_chars, "0123456789'.-");
        assert_eq!(aff.no_suggest.as_deref(), Some("!"));
        assert_eq!(aff.only_in_compound.as_deref(), Some("c"));
        assert_eq!(aff.iconv.len(), 2);
        assert_eq!(aff.iconv[0], (SmolStr::from("’"), SmolStr::from("'")));
        assert_eq!(
            aff.replacements,
            vec![(SmolStr::from("f"), SmolStr::from("ph"))]
        );

        assert_eq!(aff.compound_rules.len(), 2);
        assert_eq!(
            aff.compound_rules[0].tokens,
            vec![
                CompoundToken::Flag("n".into()),
                CompoundToken::Op('*'),
                CompoundToken::Flag("1".into()),
                CompoundToken::Flag("t".into()),
            ]
        );
        for flag in ["n", "1", "t", "m", "p"] {
            assert!(aff.is_compound_flag(flag), "{}", flag);
        }

        let a = aff.affix("A").unwrap();
        assert_eq!(a.kind, AffixKind::Prefix);
        assert_eq!(a.rules.len(), 1);

        let s = aff.affix("S").unwrap();
        assert_eq!(s.kind, AffixKind::Suffix);
        assert!(s.cross_product);
        assert_eq!(s.rules.len(), 4);
        assert_eq!(s.rules[0].strip, "y");
        assert_eq!(s.rules[1].strip, "");

        let g = aff.affix("G").unwrap();
        assert!(!g.cross_product);
        assert_eq!(g.rules[0].add, "ing");
    }

    #[test]
    fn long_flags_in_compound_rules() {
        let aff = AffixConfig::from_reader("FLAG long\nCOMPOUNDRULE (aa)*(bb)?\n".as_bytes())
            .unwrap();
        assert_eq!(
            aff.compound_rules[0].tokens,
            vec![
                CompoundToken::Flag("aa".into()),
                CompoundToken::Op('*'),
                CompoundToken::Flag("bb".into()),
                CompoundToken::Op('?'),
            ]
        );
    }

    #[test]
    fn digit_flags_in_compound_rules() {
        let aff = AffixConfig::from_reader(
            "COMPOUNDRULE 2\nCOMPOUNDRULE 12\nCOMPOUNDRULE 3*\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(aff.compound_rules.len(), 2);
        assert_eq!(
            aff.compound_rules[0].tokens,
            vec![
                CompoundToken::Flag("1".into()),
                CompoundToken::Flag("2".into()),
            ]
        );
        assert!(aff.compound_map.contains_key("3"));

        let headless = AffixConfig::from_reader("COMPOUNDRULE n*\nCOMPOUNDRULE 7\n".as_bytes())
            .unwrap();
        assert_eq!(headless.compound_rules.len(), 2);
        assert_eq!(
            headless.compound_rules[1].tokens,
            vec![CompoundToken::Flag("7".into())]
        );
    }

    #[test]
    fn structural_errors_are_fatal() {
        let undeclared = "SFX S 0 s .\n";
        assert!(matches!(
            AffixConfig::from_reader(undeclared.as_bytes()),
            Err(AffixError::UndeclaredFlag { line: 1, .. })
        ));

        let duplicate = "SFX S Y 1\nPFX S Y 1\n";
        assert!(matches!(
            AffixConfig::from_reader(duplicate.as_bytes()),
            Err(AffixError::DuplicateFlag { line: 2, .. })
        ));

        let cross = "SFX S X 1\n";
        assert!(matches!(
            AffixConfig::from_reader(cross.as_bytes()),
            Err(AffixError::CrossProduct { .. })
        ));

        let condition = "SFX S Y 1\nSFX S 0 s [abc\n";
        assert!(matches!(
            AffixConfig::from_reader(condition.as_bytes()),
            Err(AffixError::Condition { line: 2, .. })
        ));

        let iconv = "ICONV a b c\n";
        assert!(matches!(
            AffixConfig::from_reader(iconv.as_bytes()),
            Err(AffixError::FieldCount { .. })
        ));
    }

    #[test]
    fn unknown_directives_are_skipped() {
        let aff = AffixConfig::from_reader("KEY qwerty\nMAXNGRAMSUGS 4\n\n".as_bytes()).unwrap();
        assert!(aff.prefixes.is_empty());
        assert!(aff.suffixes.is_empty());
    }

    #[test]
    fn serde_round_trip() {
        let aff = AffixConfig::from_reader(AFF.as_bytes()).unwrap();
        let json = serde_json::to_string(&aff).unwrap();
        let back: AffixConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.suffixes, aff.suffixes);
        assert_eq!(back.compound_rules, aff.compound_rules);
    }
}
