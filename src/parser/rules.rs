use crate::models::Category;
use once_cell::sync::Lazy;
use regex::Regex;

static DISTANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:miles?|km|kilometers?)\s*away").unwrap()
});

static FOOD_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)Food[^"]*"([^"]+)""#).unwrap());
static ACTIVITY_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)Activity[^"]*"([^"]+)""#).unwrap());
static ENTERTAINMENT_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)Entertainment[^"]*"([^"]+)""#).unwrap());

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());
static AT_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+at\s+").unwrap());
static VENUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bat\s+\*\*([^*]+)\*\*").unwrap());
static MARKDOWN_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static BARE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s)]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Captured<'a> {
    pub matched: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkMatch<'a> {
    pub matched: &'a str,
    pub text: &'a str,
    pub url: &'a str,
}

pub fn distance(text: &str) -> Option<&str> {
    DISTANCE.find(text).map(|m| m.as_str())
}

pub fn labeled_section(text: &str, category: Category) -> Option<&str> {
    let pattern = match category {
        Category::Food => &FOOD_SECTION,
        Category::Activity => &ACTIVITY_SECTION,
        Category::Entertainment => &ENTERTAINMENT_SECTION,
        Category::Event => return None,
    };

    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|section| !section.is_empty())
}

pub fn quoted_name(text: &str) -> Option<Captured<'_>> {
    let caps = QUOTED.captures(text)?;
    Some(Captured {
        matched: caps.get(0)?.as_str(),
        value: caps.get(1)?.as_str(),
    })
}

// Shorter of the text before the first ` at ` and before the first comma.
pub fn leading_clause(text: &str) -> &str {
    let before_at = AT_SEPARATOR.split(text).next().unwrap_or(text);
    let before_comma = text.split(',').next().unwrap_or(text);

    if before_at.len() < before_comma.len() {
        before_at
    } else {
        before_comma
    }
}

pub fn venue(text: &str) -> Option<Captured<'_>> {
    let caps = VENUE.captures(text)?;
    Some(Captured {
        matched: caps.get(0)?.as_str(),
        value: caps.get(1)?.as_str().trim(),
    })
}

pub fn markdown_link(text: &str) -> Option<LinkMatch<'_>> {
    let caps = MARKDOWN_LINK.captures(text)?;
    Some(LinkMatch {
        matched: caps.get(0)?.as_str(),
        text: caps.get(1)?.as_str(),
        url: caps.get(2)?.as_str(),
    })
}

pub fn bare_url(text: &str) -> Option<&str> {
    BARE_URL.find(text).map(|m| m.as_str())
}
