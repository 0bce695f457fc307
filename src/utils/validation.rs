use crate::models::*;
use anyhow::{Result, anyhow};

pub fn validate_interaction(interaction: &Interaction) -> Result<()> {
    if interaction.user_id.is_nil() {
        return Err(anyhow!("User ID cannot be nil"));
    }

    if interaction.item_name.trim().is_empty() {
        return Err(anyhow!("Interaction item name cannot be empty"));
    }

    if interaction.item_name.len() > 500 {
        return Err(anyhow!("Interaction item name too long (max 500 characters)"));
    }

    if interaction.category.is_none() {
        return Err(anyhow!("Interaction category is required"));
    }

    // Validate timestamp is not too far in the future
    let max_future = chrono::Utc::now() + chrono::Duration::hours(1);
    if interaction.created_at > max_future {
        return Err(anyhow!("Timestamp cannot be more than 1 hour in the future"));
    }

    if let Some(ref url) = interaction.url {
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!("Interaction URL must be http(s): {}", url));
        }
    }

    Ok(())
}

pub fn validate_preference_answers(answers: &[PreferenceAnswer]) -> Result<()> {
    if answers.is_empty() {
        return Err(anyhow!("Please complete all preference questions before continuing"));
    }

    for answer in answers {
        if answer.preference.trim().is_empty() {
            return Err(anyhow!("Preference answer cannot be empty"));
        }
        if answer.category == Category::Event {
            return Err(anyhow!("Preferences can only be set for food, activity or entertainment"));
        }
    }

    Ok(())
}

pub fn validate_budget(budget: f64) -> Result<()> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(anyhow!("Budget must be a non-negative amount"));
    }
    Ok(())
}

pub fn validate_location(location: &LocationCoordinates) -> Result<()> {
    if !(-90.0..=90.0).contains(&location.latitude) {
        return Err(anyhow!("Latitude out of range: {}", location.latitude));
    }
    if !(-180.0..=180.0).contains(&location.longitude) {
        return Err(anyhow!("Longitude out of range: {}", location.longitude));
    }
    Ok(())
}
