pub mod clean;
pub mod details;
pub mod rules;

pub use clean::{clean_and_extract_distance, normalize_text};
pub use details::extract_recommendation_details;

use crate::error::ParseError;
use crate::models::*;
use serde::Deserialize;
use std::borrow::Cow;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct JsonSections {
    food: String,
    activity: String,
    entertainment: String,
}

pub fn parse_recommendation_response(raw: &str) -> Result<RecommendationResponse, ParseError> {
    if let Some(response) = parse_json_sections(raw) {
        debug!("Parsed recommendation response as JSON");
        return Ok(response);
    }

    let text = unwrap_json_string(raw);
    match parse_labeled_sections(&text) {
        Some(response) => {
            debug!("Parsed recommendation response from labelled text");
            Ok(response)
        }
        None => {
            warn!("Failed to parse recommendations from: {}", raw);
            Err(ParseError::UnparsableResponse { raw: raw.to_string() })
        }
    }
}

fn parse_json_sections(raw: &str) -> Option<RecommendationResponse> {
    let sections: JsonSections = serde_json::from_str(raw.trim()).ok()?;

    let non_empty = |s: &str| !s.trim().is_empty();
    if !(non_empty(&sections.food) && non_empty(&sections.activity) && non_empty(&sections.entertainment)) {
        return None;
    }

    Some(RecommendationResponse {
        food: clean_and_extract_distance(&sections.food),
        activity: clean_and_extract_distance(&sections.activity),
        entertainment: clean_and_extract_distance(&sections.entertainment),
    })
}

fn unwrap_json_string(raw: &str) -> Cow<'_, str> {
    match serde_json::from_str::<String>(raw.trim()) {
        Ok(inner) => Cow::Owned(inner),
        Err(_) => Cow::Borrowed(raw),
    }
}

fn parse_labeled_sections(text: &str) -> Option<RecommendationResponse> {
    let food = rules::labeled_section(text, Category::Food)?;
    let activity = rules::labeled_section(text, Category::Activity)?;
    let entertainment = rules::labeled_section(text, Category::Entertainment)?;

    Some(RecommendationResponse {
        food: clean_and_extract_distance(food),
        activity: clean_and_extract_distance(activity),
        entertainment: clean_and_extract_distance(entertainment),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body() {
        let response =
            parse_recommendation_response(r#"{"food":"A","activity":"B","entertainment":"C"}"#).unwrap();
        assert_eq!(response.food.text, "A.");
        assert_eq!(response.activity.text, "B.");
        assert_eq!(response.entertainment.text, "C.");
        assert!(response.food.distance.is_none());
    }

    #[test]
    fn test_json_with_missing_key_falls_back_to_text() {
        let err = parse_recommendation_response(r#"{"food":"A","activity":"B"}"#).unwrap_err();
        assert!(matches!(err, ParseError::UnparsableResponse { .. }));
    }

    #[test]
    fn test_json_string_literal_is_unwrapped() {
        let raw = serde_json::to_string(
            r#"Food: "Dumplings, 3 miles away" Activity: "Rock climbing" Entertainment: "Comedy club""#,
        )
        .unwrap();
        let response = parse_recommendation_response(&raw).unwrap();
        assert_eq!(response.food.distance.as_deref(), Some("3 miles away"));
        assert_eq!(response.entertainment.text, "Comedy club.");
    }

    #[test]
    fn test_error_keeps_raw_text() {
        let err = parse_recommendation_response("nothing useful").unwrap_err();
        assert_eq!(err.raw(), "nothing useful");
    }
}
