//! Finding dictionaries on disk by language tag.
use std::path::{Path, PathBuf};

use language_tags::LanguageTag;
use smol_str::SmolStr;

/// The language tag a dictionary file is named after, `en-US` for
/// `en_US.dic`. Returns `None` when the file stem is not a valid tag.
pub fn lang_tag_from_path(path: &Path) -> Option<SmolStr> {
    let stem = path.file_stem()?.to_str()?;
    let tag = LanguageTag::parse(&stem.replace('_', "-")).ok()?;
    Some(tag.as_str().into())
}

/// The `.aff` and `.dic` pair for `tag` in `dir`. Files may separate the
/// region with `-` or `_`.
pub fn find_dictionary(dir: &Path, tag: &LanguageTag) -> Option<(PathBuf, PathBuf)> {
    let tag = tag.as_str();

    [tag.to_string(), tag.replace('-', "_")]
        .iter()
        .find_map(|name| {
            let aff = dir.join(format!("{name}.aff"));
            let dic = dir.join(format!("{name}.dic"));
            if aff.is_file() && dic.is_file() {
                Some((aff, dic))
            } else {
                None
            }
        })
}

/// The affix file that accompanies a stem dictionary.
pub fn affix_path_for(dic: &Path) -> PathBuf {
    dic.with_extension("aff")
}
