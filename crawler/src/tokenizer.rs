use once_cell::sync::Lazy;
use regex::Regex;

static SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}'\s-]+").expect("valid special character pattern"));
static SPACES_AND_DASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\p{Zs}-]+").expect("valid separator pattern"));

/// Splits a run of visible text into raw word tokens.
///
/// Anything that is not a letter, an apostrophe, a hyphen or whitespace is
/// dropped, then every run of whitespace and hyphens becomes one space.
/// Tokens may be empty (`"-word"` yields `["", "word"]`); callers only count
/// non-empty ones.
pub fn normalize(content: &str) -> Vec<String> {
    let content = SPECIAL_CHARS.replace_all(content, "");
    let content = SPACES_AND_DASHES.replace_all(&content, " ");

    content.split(' ').map(str::to_owned).collect()
}
