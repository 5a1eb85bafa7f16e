use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

/// Strips diacritics: canonical decomposition with combining marks removed.
pub fn fold_marks(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Substring test that ignores accent marks but is otherwise exact
/// (case-sensitive, no word boundaries).
pub fn contains_ignoring_marks(haystack: &str, needle: &str) -> bool {
    fold_marks(haystack).contains(&fold_marks(needle))
}
