//! Internal helpers for label validation and normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so the store enforces consistent invariants.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, ResultEngine};

/// Trim and collapse inner whitespace. Returns `None` for blank input.
pub(crate) fn normalize_display(input: &str) -> Option<String> {
    let mut out = String::new();
    for token in input.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    if out.is_empty() { None } else { Some(out) }
}

/// Comparison key for labels: accents stripped, lower-cased, punctuation and
/// whitespace runs collapsed to a single space.
///
/// `"  Farmácia "` and `"farmacia"` share the key `farmacia`.
pub(crate) fn normalize_key(input: &str) -> Option<String> {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    let normalized = out.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    normalize_display(value)
        .ok_or_else(|| EngineError::InvalidName(format!("{label} name must not be empty")))
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value.and_then(normalize_display)
}

/// A single tag in stored form, `None` when blank.
pub(crate) fn normalize_tag(tag: &str) -> Option<String> {
    normalize_display(tag).map(|display| display.to_lowercase())
}

/// Tags are lower-cased, trimmed and de-duplicated keeping the first
/// occurrence. Blank tags are dropped.
pub(crate) fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let Some(tag) = normalize_tag(tag.as_ref()) else {
            continue;
        };
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_collapses_whitespace() {
        assert_eq!(normalize_display("  Mercado   Mensal "), Some("Mercado Mensal".to_string()));
        assert_eq!(normalize_display(" \t "), None);
    }

    #[test]
    fn key_strips_accents_and_case() {
        assert_eq!(normalize_key("Farmácia"), Some("farmacia".to_string()));
        assert_eq!(normalize_key("  LATICÍNIOS "), Some("laticinios".to_string()));
        assert_eq!(normalize_key("Pet-Shop!"), Some("pet shop".to_string()));
        assert_eq!(normalize_key("--"), None);
    }

    #[test]
    fn tags_are_lowercased_and_deduplicated() {
        assert_eq!(
            normalize_tags(["Food", " essentials", "food", "", "FOOD "]),
            vec!["food".to_string(), "essentials".to_string()]
        );
    }

    #[test]
    fn single_tag_collapses_inner_whitespace() {
        assert_eq!(normalize_tag("  Fixed   Cost "), Some("fixed cost".to_string()));
        assert_eq!(normalize_tag("   "), None);
    }
}
