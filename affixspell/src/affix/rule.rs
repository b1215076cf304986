//! Affix classes, their rules and rule conditions.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A flag links a stem to affix classes and compound classes.
pub type Flag = SmolStr;

/// How flags are written in the dictionary, as declared by `FLAG`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagMode {
    /// One character per flag (`ASCII` and `UTF-8`).
    Char,
    /// Two characters per flag.
    Long,
    /// Comma-separated decimal numbers.
    Numeric,
}

impl Default for FlagMode {
    fn default() -> Self {
        FlagMode::Char
    }
}

impl FlagMode {
    pub(crate) fn from_directive(value: &str) -> Option<FlagMode> {
        match value {
            "ASCII" | "UTF-8" => Some(FlagMode::Char),
            "long" => Some(FlagMode::Long),
            "num" => Some(FlagMode::Numeric),
            _ => None,
        }
    }

    /// Splits a flag string into its individual flags.
    ///
    /// Returns `None` when the string cannot be read in this mode.
    pub fn parse_flags(&self, s: &str) -> Option<Vec<Flag>> {
        match self {
            FlagMode::Char => Some(s.chars().map(|ch| SmolStr::from(ch.to_string())).collect()),
            FlagMode::Long => {
                let chars = s.chars().collect::<Vec<_>>();
                if chars.len() % 2 != 0 {
                    return None;
                }
                Some(
                    chars
                        .chunks(2)
                        .map(|pair| pair.iter().copied().collect::<SmolStr>())
                        .collect(),
                )
            }
            FlagMode::Numeric => s
                .split(',')
                .map(|n| n.trim().parse::<u16>().ok().map(|n| SmolStr::from(n.to_string())))
                .collect(),
        }
    }

    /// Reads a single flag, as used by directives such as `NOSUGGEST`.
    pub fn parse_flag(&self, s: &str) -> Option<Flag> {
        self.parse_flags(s)?.into_iter().next()
    }
}

/// Whether an affix class attaches to the start or the end of a stem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffixKind {
    /// `PFX`
    Prefix,
    /// `SFX`
    Suffix,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Segment {
    Any,
    Char(char),
    OneOf(Vec<char>),
    NoneOf(Vec<char>),
}

impl Segment {
    fn matches(&self, ch: char) -> bool {
        match self {
            Segment::Any => true,
            Segment::Char(c) => *c == ch,
            Segment::OneOf(set) => set.contains(&ch),
            Segment::NoneOf(set) => !set.contains(&ch),
        }
    }
}

/// The condition part of an affix rule, e.g. `[^aeiou]y`.
///
/// Conditions are matched against the end of a stem for suffixes and the
/// start of a stem for prefixes. The condition `.` always matches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    source: SmolStr,
    segments: Vec<Segment>,
}

impl Condition {
    /// Parses a condition. Returns `None` on an unterminated bracket group.
    pub fn parse(source: &str) -> Option<Condition> {
        if source == "." {
            return Some(Condition {
                source: source.into(),
                segments: vec![],
            });
        }

        let mut segments = vec![];
        let mut chars = source.chars();

        while let Some(ch) = chars.next() {
            let segment = match ch {
                '.' => Segment::Any,
                '[' => {
                    let mut set = vec![];
                    let mut negated = false;
                    let mut closed = false;
                    for (i, c) in chars.by_ref().enumerate() {
                        match c {
                            '^' if i == 0 => negated = true,
                            ']' => {
                                closed = true;
                                break;
                            }
                            c => set.push(c),
                        }
                    }
                    if !closed {
                        return None;
                    }
                    if negated {
                        Segment::NoneOf(set)
                    } else {
                        Segment::OneOf(set)
                    }
                }
                c => Segment::Char(c),
            };
            segments.push(segment);
        }

        Some(Condition {
            source: source.into(),
            segments,
        })
    }

    /// The condition as written in the affix file.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    fn matches_end(&self, word: &str) -> bool {
        let mut chars = word.chars().rev();
        self.segments
            .iter()
            .rev()
            .all(|seg| chars.next().map(|ch| seg.matches(ch)).unwrap_or(false))
    }

    fn matches_start(&self, word: &str) -> bool {
        let mut chars = word.chars();
        self.segments
            .iter()
            .all(|seg| chars.next().map(|ch| seg.matches(ch)).unwrap_or(false))
    }
}

/// A single `PFX`/`SFX` rule line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixRule {
    /// Text removed from the stem before attaching, if present.
    pub strip: SmolStr,
    /// Text attached to the stem.
    pub add: SmolStr,
    /// When the rule applies.
    pub condition: Condition,
}

/// An affix class: the header line plus every rule declared under its flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affix {
    /// Prefix or suffix.
    pub kind: AffixKind,
    /// Whether this affix may combine with an affix of the other kind.
    pub cross_product: bool,
    /// Rules in declaration order.
    pub rules: Vec<AffixRule>,
}

impl Affix {
    pub(crate) fn new(kind: AffixKind, cross_product: bool) -> Affix {
        Affix {
            kind,
            cross_product,
            rules: vec![],
        }
    }

    /// Applies every rule whose condition matches `word`, in rule order.
    pub fn apply<'a>(&'a self, word: &'a str) -> impl Iterator<Item = SmolStr> + 'a {
        self.rules.iter().filter_map(move |rule| match self.kind {
            AffixKind::Prefix => {
                if !rule.condition.matches_start(word) {
                    return None;
                }
                let rest = word.strip_prefix(rule.strip.as_str()).unwrap_or(word);
                Some(SmolStr::from(format!("{}{}", rule.add, rest)))
            }
            AffixKind::Suffix => {
                if !rule.condition.matches_end(word) {
                    return None;
                }
                let rest = word.strip_suffix(rule.strip.as_str()).unwrap_or(word);
                Some(SmolStr::from(format!("{}{}", rest, rule.add)))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(strip: &str, add: &str, condition: &str) -> AffixRule {
        AffixRule {
            strip: strip.into(),
            add: add.into(),
            condition: Condition::parse(condition).unwrap(),
        }
    }

    #[test]
    fn conditions() {
        let c = Condition::parse("[^aeiou]y").unwrap();
        assert!(c.matches_end("fly"));
        assert!(!c.matches_end("day"));
        assert!(!c.matches_end("y"));

        let c = Condition::parse(".").unwrap();
        assert!(c.matches_end(""));
        assert!(c.matches_start("anything"));

        let c = Condition::parse("[ae]").unwrap();
        assert!(c.matches_start("apple"));
        assert!(!c.matches_start("pear"));

        assert_eq!(Condition::parse("[abc"), None);
    }

    #[test]
    fn suffix_strips_and_adds() {
        let mut affix = Affix::new(AffixKind::Suffix, true);
        affix.rules.push(rule("y", "ies", "[^aeiou]y"));
        affix.rules.push(rule("", "s", "[aeiou]y"));
        affix.rules.push(rule("", "s", "[^y]"));

        assert_eq!(affix.apply("fly").collect::<Vec<_>>(), vec!["flies"]);
        assert_eq!(affix.apply("day").collect::<Vec<_>>(), vec!["days"]);
        assert_eq!(affix.apply("cat").collect::<Vec<_>>(), vec!["cats"]);
    }

    #[test]
    fn prefix_strips_and_adds() {
        let mut affix = Affix::new(AffixKind::Prefix, true);
        affix.rules.push(rule("", "un", "."));
        affix.rules.push(rule("e", "in", "e"));

        assert_eq!(affix.apply("do").collect::<Vec<_>>(), vec!["undo"]);
        assert_eq!(
            affix.apply("exact").collect::<Vec<_>>(),
            vec!["unexact", "inxact"]
        );
    }

    #[test]
    fn flag_modes() {
        assert_eq!(
            FlagMode::Char.parse_flags("AB").unwrap(),
            vec![SmolStr::from("A"), SmolStr::from("B")]
        );
        assert_eq!(
            FlagMode::Long.parse_flags("AaBb").unwrap(),
            vec![SmolStr::from("Aa"), SmolStr::from("Bb")]
        );
        assert_eq!(
            FlagMode::Long.parse_flags("ÅåØø").unwrap(),
            vec![SmolStr::from("Åå"), SmolStr::from("Øø")]
        );
        assert_eq!(FlagMode::Long.parse_flags("AaB"), None);
        assert_eq!(
            FlagMode::Numeric.parse_flags("101,2").unwrap(),
            vec![SmolStr::from("101"), SmolStr::from("2")]
        );
        assert_eq!(FlagMode::Numeric.parse_flags("x"), None);
    }
}
