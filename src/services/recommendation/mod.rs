use crate::algorithms::{AnalysisInput, PreferenceAnalyzer, StrategyKind};
use crate::config::Config;
use crate::error::ServiceError;
use crate::models::locale;
use crate::models::*;
use crate::parser::parse_recommendation_response;
use crate::services::store::{InteractionStore, PreferenceStore};
use crate::services::webhook::RecommendationSource;
use crate::utils::validation::{
    validate_budget, validate_interaction, validate_location, validate_preference_answers,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

const NOT_SPECIFIED: &str = "not_specified";

pub struct RecommendationService {
    interactions: Arc<dyn InteractionStore>,
    preferences: Arc<dyn PreferenceStore>,
    source: Arc<dyn RecommendationSource>,
    analyzer: PreferenceAnalyzer,
    config: Arc<Config>,
}

impl RecommendationService {
    pub fn new(
        interactions: Arc<dyn InteractionStore>,
        preferences: Arc<dyn PreferenceStore>,
        source: Arc<dyn RecommendationSource>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            interactions,
            preferences,
            source,
            analyzer: PreferenceAnalyzer::new(&config.analyzer),
            config,
        }
    }

    pub async fn get_recommendations(&self, request: &RecommendationRequest) -> Result<RecommendationResponse, ServiceError> {
        self.recommend(request, StrategyKind::WeightedRecency).await
    }

    pub async fn get_group_recommendations(&self, request: &RecommendationRequest) -> Result<RecommendationResponse, ServiceError> {
        self.recommend(request, StrategyKind::FlatCount).await
    }

    pub async fn record_interaction(&self, interaction: Interaction) -> Result<(), ServiceError> {
        validate_interaction(&interaction).map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
        self.interactions.record_interaction(interaction).await?;
        Ok(())
    }

    pub async fn save_preferences(&self, user_id: Uuid, answers: Vec<PreferenceAnswer>) -> Result<Vec<ExplicitPreference>, ServiceError> {
        if user_id.is_nil() {
            return Err(ServiceError::InvalidInput("Unable to save preferences: User ID is missing".to_string()));
        }
        validate_preference_answers(&answers).map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

        Ok(self.preferences.save_preferences(user_id, answers).await?)
    }

    pub async fn analyze(&self, user_id: Uuid, mood: Mood, strategy: StrategyKind) -> Result<PreferenceAnalysis, ServiceError> {
        let (interactions, preferences) = self.load_signal(user_id).await?;
        let input = AnalysisInput::new(&interactions, &preferences, mood);
        Ok(self.analyzer.analyze(strategy, &input))
    }

    async fn recommend(&self, request: &RecommendationRequest, strategy: StrategyKind) -> Result<RecommendationResponse, ServiceError> {
        let start_time = Instant::now();

        let location = request.user.location.ok_or(ServiceError::MissingLocation)?;
        validate_location(&location).map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

        let budget = request.budget.unwrap_or(self.config.recommendation.default_budget);
        validate_budget(budget).map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

        let analysis = self.analyze(request.user.id, request.mood, strategy).await?;
        if analysis.is_empty() {
            info!("No personalization available for user {} in mood {}", request.user.id, request.mood);
        }

        let payload = self.build_payload(request, location, budget, analysis);
        let body = self.source.fetch(&payload).await?;

        let response = parse_recommendation_response(&body).map_err(|e| {
            error!("Failed to parse recommendations for user {}: {}", request.user.id, e);
            ServiceError::from(e)
        })?;

        info!(
            "Served {} recommendations for user {} in {}ms",
            strategy,
            request.user.id,
            start_time.elapsed().as_millis()
        );
        Ok(response)
    }

    async fn load_signal(&self, user_id: Uuid) -> Result<(Vec<Interaction>, Vec<ExplicitPreference>), ServiceError> {
        let (interactions, preferences) = futures::try_join!(
            self.interactions.interactions_for_user(user_id),
            self.preferences.preferences_for_user(user_id),
        )?;
        Ok((interactions, preferences))
    }

    pub fn build_payload(
        &self,
        request: &RecommendationRequest,
        location: LocationCoordinates,
        budget: f64,
        analysis: PreferenceAnalysis,
    ) -> RecommendationPayload {
        let user = &request.user;
        let defaults = &self.config.recommendation;

        RecommendationPayload {
            name: user.display_name(),
            age: user
                .age
                .map(|age| age.to_string())
                .unwrap_or_else(|| defaults.default_age.clone()),
            sex: non_blank(&user.gender).unwrap_or(NOT_SPECIFIED).to_string(),
            // Profiles store ISO codes; unknown codes fall back to the defaults.
            nationality: non_blank(&user.nationality)
                .and_then(locale::country_name)
                .unwrap_or(NOT_SPECIFIED)
                .to_string(),
            mother_tongue: non_blank(&user.language)
                .and_then(locale::language_name)
                .map(str::to_string)
                .unwrap_or_else(|| defaults.default_language.clone()),
            location,
            mood: request.mood,
            budget,
            preferences: analysis.top_preferences,
            category_weights: analysis.weights,
            custom_prompts: request.custom_prompts.clone(),
            previous_recommendations: request.previous_recommendations.clone(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
