use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[inline(always)]
pub fn lower_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_lowercase().collect::<String>())
        .collect::<SmolStr>()
}

#[inline(always)]
pub fn upper_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_uppercase().collect::<String>())
        .collect::<SmolStr>()
}

#[inline(always)]
pub fn upper_first(s: &str) -> SmolStr {
    let mut c = s.chars();
    match c.next() {
        None => SmolStr::new(""),
        Some(f) => SmolStr::from(f.to_uppercase().collect::<String>() + c.as_str()),
    }
}

/// Uppercases the first character and lowercases the rest.
#[inline(always)]
pub fn title_case(s: &str) -> SmolStr {
    upper_first(&lower_case(s))
}

pub fn is_all_caps(word: &str) -> bool {
    upper_case(word) == word
}

pub fn is_title_case(word: &str) -> bool {
    title_case(word) == word
}

/// Capitalization pattern of a word form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStyle {
    /// No uppercase letters, e.g. `cat`. Caseless strings also land here.
    AllLower,
    /// No lowercase letters, e.g. `NASA`.
    AllUpper,
    /// Only the first character is uppercase, e.g. `Paris`.
    Title,
    /// Anything else, e.g. `McDonald`.
    Mixed,
}

impl CaseStyle {
    /// Classifies `word` by counting its cased letters.
    pub fn of(word: &str) -> CaseStyle {
        let mut upper = 0;
        let mut lower = 0;

        for ch in word.chars() {
            if ch.is_uppercase() {
                upper += 1;
            } else if ch.is_lowercase() {
                lower += 1;
            }
        }

        let first_upper = word.chars().next().map(char::is_uppercase).unwrap_or(false);

        match (upper, lower) {
            (0, _) => CaseStyle::AllLower,
            (_, 0) => CaseStyle::AllUpper,
            (1, _) if first_upper => CaseStyle::Title,
            _ => CaseStyle::Mixed,
        }
    }

    /// The style recorded in a store: anything but `AllUpper` and `Title`
    /// becomes `Mixed`.
    pub fn stored(self) -> CaseStyle {
        match self {
            CaseStyle::AllUpper | CaseStyle::Title => self,
            _ => CaseStyle::Mixed,
        }
    }

    /// Whether a stored entry of this style accepts the casing of `query`.
    ///
    /// `Mixed` accepts any casing, `AllUpper` only an all-uppercase query,
    /// `Title` an all-uppercase or title-cased query.
    pub fn accepts(self, query: &str) -> bool {
        match self {
            CaseStyle::AllLower | CaseStyle::Mixed => true,
            CaseStyle::AllUpper => is_all_caps(query),
            CaseStyle::Title => is_all_caps(query) || is_title_case(query),
        }
    }

    /// Styles that `case_variations` may produce for this style.
    pub fn variant_styles(self) -> &'static [CaseStyle] {
        match self {
            CaseStyle::AllLower => &[CaseStyle::AllLower, CaseStyle::Title, CaseStyle::AllUpper],
            CaseStyle::AllUpper => &[CaseStyle::AllUpper],
            CaseStyle::Title => &[CaseStyle::Title, CaseStyle::AllUpper],
            CaseStyle::Mixed => &[CaseStyle::Mixed, CaseStyle::AllUpper],
        }
    }
}

/// Classifies the capitalization of `word`.
pub fn case_style(word: &str) -> CaseStyle {
    CaseStyle::of(word)
}

/// Every surface string that counts as the same word as `word`, given the
/// style it was declared in.
pub fn case_variations(word: &str, style: CaseStyle) -> Vec<SmolStr> {
    let variants = match style {
        CaseStyle::AllLower => vec![lower_case(word), title_case(word), upper_case(word)],
        CaseStyle::AllUpper => vec![upper_case(word)],
        CaseStyle::Title => vec![title_case(word), upper_case(word)],
        CaseStyle::Mixed => vec![SmolStr::from(word), upper_case(word)],
    };

    variants.into_iter().unique().collect()
}
