use super::clean::normalize_text;
use super::rules;
use crate::models::ExtractedDetails;

pub const DEFAULT_LINK_TEXT: &str = "View Details";

pub fn extract_recommendation_details(text: &str) -> ExtractedDetails {
    let quoted = rules::quoted_name(text);
    let name = match quoted {
        Some(hit) => hit.value,
        None => rules::leading_clause(text),
    };

    let venue = rules::venue(text);

    let (link_text, link_url, link_span) = match rules::markdown_link(text) {
        Some(link) => (link.text, link.url, Some(link.matched)),
        None => match rules::bare_url(text) {
            Some(url) => (DEFAULT_LINK_TEXT, url, Some(url)),
            None => ("", "", None),
        },
    };

    let mut remainder = text.to_string();
    let spans = [quoted.map(|hit| hit.matched), venue.map(|hit| hit.matched), link_span];
    for span in spans.into_iter().flatten() {
        remainder = remainder.replacen(span, "", 1);
    }

    let remainder = remainder.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '-')
    });

    ExtractedDetails {
        name: name.trim().to_string(),
        venue: venue.map(|hit| hit.value.to_string()).unwrap_or_default(),
        description: normalize_text(remainder),
        link_text: link_text.trim().to_string(),
        link_url: link_url.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_name_and_venue() {
        let details = extract_recommendation_details(r#""Pasta Primavera" at **Bella Italia**. A tasty dish."#);
        assert_eq!(details.name, "Pasta Primavera");
        assert_eq!(details.venue, "Bella Italia");
        assert_eq!(details.description, "A tasty dish.");
        assert!(details.link_url.is_empty());
        assert!(details.link_text.is_empty());
    }

    #[test]
    fn test_markdown_link_is_removed_from_description() {
        let details = extract_recommendation_details(
            "Jazz at the Blue Note, 1 mile away. Tickets [here](https://bluenote.example/tix).",
        );
        assert_eq!(details.name, "Jazz");
        assert_eq!(details.link_text, "here");
        assert_eq!(details.link_url, "https://bluenote.example/tix");
        assert_eq!(details.description, "Jazz at the Blue Note, 1 mile away. Tickets.");
    }

    #[test]
    fn test_bare_url_gets_default_link_text() {
        let details = extract_recommendation_details("Kayak tour, see https://kayak.example/tours for times");
        assert_eq!(details.name, "Kayak tour");
        assert_eq!(details.link_text, DEFAULT_LINK_TEXT);
        assert_eq!(details.link_url, "https://kayak.example/tours");
        assert!(!details.description.contains("https://"));
    }

    #[test]
    fn test_plain_sentence() {
        let details = extract_recommendation_details("Walk in the park.");
        assert_eq!(details.name, "Walk in the park.");
        assert_eq!(details.venue, "");
        assert_eq!(details.description, "Walk in the park.");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_recommendation_details(""), ExtractedDetails::default());
    }
}
