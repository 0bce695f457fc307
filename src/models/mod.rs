pub mod locale;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Excited,
    Peaceful,
    Sad,
    Anxious,
    Tired,
    Energetic,
    Creative,
    Stressed,
    Relaxed,
    Bored,
    Surprise,
}

impl Mood {
    pub const ALL: [Mood; 12] = [
        Mood::Happy,
        Mood::Excited,
        Mood::Peaceful,
        Mood::Sad,
        Mood::Anxious,
        Mood::Tired,
        Mood::Energetic,
        Mood::Creative,
        Mood::Stressed,
        Mood::Relaxed,
        Mood::Bored,
        Mood::Surprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Excited => "excited",
            Mood::Peaceful => "peaceful",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Tired => "tired",
            Mood::Energetic => "energetic",
            Mood::Creative => "creative",
            Mood::Stressed => "stressed",
            Mood::Relaxed => "relaxed",
            Mood::Bored => "bored",
            Mood::Surprise => "surprise",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.as_str() == wanted)
            .ok_or_else(|| anyhow::anyhow!("Unknown mood: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Click,
    View,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Activity,
    Entertainment,
    Event,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Activity => "activity",
            Category::Entertainment => "entertainment",
            Category::Event => "event",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Unrecognised moods or categories in stored rows degrade to None.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: Uuid,
    #[serde(rename = "type", default)]
    pub interaction_type: InteractionType,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<Category>,
    pub item_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(
        user_id: Uuid,
        interaction_type: InteractionType,
        category: Category,
        item_name: impl Into<String>,
        mood: Mood,
    ) -> Self {
        Self {
            user_id,
            interaction_type,
            category: Some(category),
            item_name: item_name.into(),
            url: None,
            mood: Some(mood),
            metadata: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn recorded_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplicitPreference {
    pub user_id: Uuid,
    pub mood: Mood,
    pub category: Category,
    pub preference: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ExplicitPreference {
    pub fn new(user_id: Uuid, mood: Mood, category: Category, preference: impl Into<String>) -> Self {
        Self {
            user_id,
            mood,
            category,
            preference: preference.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceAnswer {
    pub mood: Mood,
    pub category: Category,
    pub preference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceAnalysis {
    pub top_preferences: BTreeMap<Category, Vec<String>>,
    pub weights: BTreeMap<Category, f64>,
}

impl PreferenceAnalysis {
    pub fn is_empty(&self) -> bool {
        self.top_preferences.is_empty() && self.weights.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub text: String,
    pub distance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub food: RecommendationItem,
    pub activity: RecommendationItem,
    pub entertainment: RecommendationItem,
}

impl RecommendationResponse {
    pub fn items(&self) -> [(Category, &RecommendationItem); 3] {
        [
            (Category::Food, &self.food),
            (Category::Activity, &self.activity),
            (Category::Entertainment, &self.entertainment),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDetails {
    pub name: String,
    pub venue: String,
    pub description: String,
    pub link_text: String,
    pub link_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub location: Option<LocationCoordinates>,
}

impl UserProfile {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            given_name: None,
            age: None,
            gender: None,
            nationality: None,
            language: None,
            location: None,
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(LocationCoordinates { latitude, longitude });
        self
    }

    pub fn display_name(&self) -> String {
        match self.given_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.email.split('@').next().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPrompts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entertainment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPayload {
    pub name: String,
    pub age: String,
    pub sex: String,
    pub nationality: String,
    pub mother_tongue: String,
    pub location: LocationCoordinates,
    pub mood: Mood,
    pub budget: f64,
    pub preferences: BTreeMap<Category, Vec<String>>,
    pub category_weights: BTreeMap<Category, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompts: Option<CustomPrompts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_recommendations: Option<RecommendationResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub user: UserProfile,
    pub mood: Mood,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub custom_prompts: Option<CustomPrompts>,
    #[serde(default)]
    pub previous_recommendations: Option<RecommendationResponse>,
}

impl RecommendationRequest {
    pub fn new(user: UserProfile, mood: Mood) -> Self {
        Self {
            user,
            mood,
            budget: None,
            custom_prompts: None,
            previous_recommendations: None,
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_previous(mut self, previous: RecommendationResponse) -> Self {
        self.previous_recommendations = Some(previous);
        self
    }
}
