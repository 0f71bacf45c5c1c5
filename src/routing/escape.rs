//! Separator and regex-quoting helpers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters treated as segment delimiters in host and path patterns.
pub const SEPARATORS: &str = "/,;.:-_~+*=@|";

/// Characters backslash-escaped when literal text is embedded in a regex.
///
/// `<` and `>` are absent: the regex dialect reads `\<` and `\>` as word
/// boundaries, while the bare characters are already literals.
const REGEX_META: &str = "\\.+*?[^]$(){}=!|:-";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\w+\}").expect("valid regex"));

pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(c)
}

/// Escape regex metacharacters in `text`.
pub fn regex_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len());
    for c in text.chars() {
        push_quoted(&mut quoted, c);
    }
    quoted
}

/// Append `c` to `out`, escaped if it is a regex metacharacter.
pub fn push_quoted(out: &mut String, c: char) {
    if REGEX_META.contains(c) {
        out.push('\\');
    }
    out.push(c);
}

/// First separator of the static text following a placeholder.
///
/// Placeholders are removed before looking, so `{a}{b}.json` yields `.`.
pub fn find_next_separator(following: &str) -> Option<char> {
    if following.is_empty() {
        return None;
    }
    let stripped = PLACEHOLDER.replace_all(following, "");
    stripped.chars().next().filter(|c| is_separator(*c))
}

/// Negated character class matching one or more characters that are neither
/// the default separator nor the next separator.
pub fn default_constraint(default_separator: char, next_separator: Option<char>) -> String {
    let mut class = String::from("[^");
    push_quoted(&mut class, default_separator);
    if let Some(next) = next_separator.filter(|n| *n != default_separator) {
        push_quoted(&mut class, next);
    }
    class.push_str("]+");
    class
}
