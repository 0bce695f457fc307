use crate::models::*;
use anyhow::Result;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[async_trait::async_trait]
pub trait InteractionStore: Send + Sync {
    async fn record_interaction(&self, interaction: Interaction) -> Result<()>;
    // Newest first.
    async fn interactions_for_user(&self, user_id: Uuid) -> Result<Vec<Interaction>>;
}

#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn save_preferences(&self, user_id: Uuid, answers: Vec<PreferenceAnswer>) -> Result<Vec<ExplicitPreference>>;
    async fn preferences_for_user(&self, user_id: Uuid) -> Result<Vec<ExplicitPreference>>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    interactions: Arc<DashMap<Uuid, Vec<Interaction>>>,
    preferences: Arc<DashMap<Uuid, Vec<ExplicitPreference>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl InteractionStore for MemoryStore {
    async fn record_interaction(&self, interaction: Interaction) -> Result<()> {
        info!(
            "Tracking {:?} on '{}' for user {}",
            interaction.interaction_type, interaction.item_name, interaction.user_id
        );
        self.interactions
            .entry(interaction.user_id)
            .or_default()
            .push(interaction);
        Ok(())
    }

    async fn interactions_for_user(&self, user_id: Uuid) -> Result<Vec<Interaction>> {
        let mut interactions = self
            .interactions
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        interactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(interactions)
    }
}

#[async_trait::async_trait]
impl PreferenceStore for MemoryStore {
    async fn save_preferences(&self, user_id: Uuid, answers: Vec<PreferenceAnswer>) -> Result<Vec<ExplicitPreference>> {
        let rows: Vec<ExplicitPreference> = answers
            .into_iter()
            .map(|answer| ExplicitPreference::new(user_id, answer.mood, answer.category, answer.preference.trim()))
            .collect();

        self.preferences
            .entry(user_id)
            .or_default()
            .extend(rows.iter().cloned());

        info!("Saved {} preferences for user {}", rows.len(), user_id);
        Ok(rows)
    }

    async fn preferences_for_user(&self, user_id: Uuid) -> Result<Vec<ExplicitPreference>> {
        Ok(self
            .preferences
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
