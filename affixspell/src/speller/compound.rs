//! Matchers compiled from `COMPOUNDRULE` patterns.
use std::collections::BTreeSet;

use hashbrown::HashMap;
use itertools::Itertools;
use regex::{Regex, RegexBuilder};
use smol_str::SmolStr;

use super::error::Diagnostic;
use crate::affix::{AffixConfig, CompoundRule, CompoundToken, Flag};

const SIZE_LIMIT: usize = 64 * (1 << 20);

/// A compound rule with every flag replaced by the alternation of the stems
/// in its class, anchored at both ends.
#[derive(Debug, Clone)]
pub struct CompoundPattern {
    source: SmolStr,
    regex: Regex,
}

impl CompoundPattern {
    /// Compiles `rule` against the compound classes in `members`.
    ///
    /// A flag without members compiles to an empty group.
    pub fn compile(
        rule: &CompoundRule,
        members: &HashMap<Flag, BTreeSet<SmolStr>>,
    ) -> Result<CompoundPattern, regex::Error> {
        let mut pattern = String::from("^");

        for token in rule.tokens.iter() {
            match token {
                CompoundToken::Op(op) => pattern.push(*op),
                CompoundToken::Flag(flag) => {
                    let group = members
                        .get(flag)
                        .map(|stems| stems.iter().map(|s| regex::escape(s)).join("|"))
                        .unwrap_or_default();
                    pattern.push_str("(?:");
                    pattern.push_str(&group);
                    pattern.push(')');
                }
            }
        }
        pattern.push('$');

        let regex = RegexBuilder::new(&pattern).size_limit(SIZE_LIMIT).build()?;

        Ok(CompoundPattern {
            source: rule.source.clone(),
            regex,
        })
    }

    /// The rule as written in the affix file.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the whole of `word` matches.
    pub fn is_match(&self, word: &str) -> bool {
        self.regex.is_match(word)
    }
}

/// Compiles every compound rule of `config`. Rules that fail to compile are
/// logged, reported as diagnostics and left out.
pub fn compile_all(config: &AffixConfig) -> (Vec<CompoundPattern>, Vec<Diagnostic>) {
    let mut patterns = Vec::with_capacity(config.compound_rules.len());
    let mut diagnostics = vec![];

    for rule in config.compound_rules.iter() {
        match CompoundPattern::compile(rule, &config.compound_map) {
            Ok(p) => patterns.push(p),
            Err(e) => {
                log::warn!("compound rule {:?} failed to compile: {}", rule.source, e);
                diagnostics.push(Diagnostic::MalformedCompoundPattern {
                    pattern: rule.source.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (patterns, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affix::StemEntry;

    fn config(aff: &str, stems: &[&str]) -> AffixConfig {
        let mut config = AffixConfig::from_reader(aff.as_bytes()).unwrap();
        for line in stems {
            let entry = StemEntry::parse(line, config.flag_mode).unwrap().unwrap();
            config.add_compound_members(&entry);
        }
        config
    }

    #[test]
    fn ordinals() {
        let config = config(
            "ONLYINCOMPOUND c\nCOMPOUNDRULE 1\nCOMPOUNDRULE n+t\n",
            &["1/n", "2/n", "3/n", "th/tc", "x.y/n"],
        );
        let (patterns, diagnostics) = compile_all(&config);
        assert!(diagnostics.is_empty());
        assert_eq!(patterns.len(), 1);

        let p = &patterns[0];
        assert_eq!(p.source(), "n+t");
        assert!(p.is_match("12th"));
        assert!(p.is_match("3th"));
        assert!(!p.is_match("th"));
        assert!(!p.is_match("12"));
        assert!(!p.is_match("4th"));
        assert!(p.is_match("x.yth"));
        assert!(!p.is_match("xzyth"));
    }

    #[test]
    fn groups_and_optional() {
        let config = config(
            "COMPOUNDRULE (ab)*c?\n",
            &["foo/a", "bar/b", "baz/c"],
        );
        let (patterns, _) = compile_all(&config);
        let p = &patterns[0];
        assert!(p.is_match("foobar"));
        assert!(p.is_match("foobarfoobarbaz"));
        assert!(p.is_match("baz"));
        assert!(!p.is_match("foo"));
        assert!(!p.is_match("barfoo"));
    }

    #[test]
    fn broken_rules_are_dropped() {
        let config = config(
            "COMPOUNDRULE 2\nCOMPOUNDRULE (ab\nCOMPOUNDRULE ab\n",
            &["foo/a", "bar/b"],
        );
        let (patterns, diagnostics) = compile_all(&config);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].source(), "ab");
        assert!(matches!(
            &diagnostics[..],
            [Diagnostic::MalformedCompoundPattern { pattern, .. }] if pattern == "(ab"
        ));
    }
}
