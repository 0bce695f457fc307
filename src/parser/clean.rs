use super::rules;
use crate::models::RecommendationItem;
use once_cell::sync::Lazy;
use regex::Regex;

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());
static SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,!?])").unwrap());
static MULTI_PERIOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());
// Upstream generation sometimes ends a sentence with a stray "just".
static TRAILING_JUST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:[,;:]\s*|\s+)just[\s.,;:]*$").unwrap());

const TERMINAL: &[char] = &['.', '!', '?'];

// Output is a fixed point: normalizing it again changes nothing.
pub fn normalize_text(text: &str) -> String {
    let text = MULTI_SPACE.replace_all(text.trim(), " ");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    let mut text = MULTI_PERIOD.replace_all(&text, ".").into_owned();

    // Stripping one artifact can expose another ("just just", "just,").
    loop {
        let stripped = TRAILING_JUST
            .replace(&text, "")
            .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':'))
            .to_string();
        if stripped.len() == text.len() {
            break;
        }
        text = stripped;
    }

    if !text.is_empty() && !text.ends_with(TERMINAL) {
        text.push('.');
    }
    text
}

pub fn clean_and_extract_distance(text: &str) -> RecommendationItem {
    let text = normalize_text(text);
    let distance = rules::distance(&text).map(str::to_string);
    RecommendationItem { text, distance }
}
