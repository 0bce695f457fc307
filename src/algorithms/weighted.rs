use super::decay::time_decay;
use super::{normalize_weights, AnalysisInput, PreferenceStrategy, ScoreBoard, StrategyKind};
use crate::config::AnalyzerConfig;
use crate::models::*;
use std::collections::BTreeMap;

// Explicit preferences are not consulted by this strategy.
#[derive(Debug, Clone)]
pub struct WeightedRecencyStrategy {
    top_n: usize,
    decay_factor: f64,
    click_weight: f64,
    view_weight: f64,
    unknown_weight: f64,
}

impl WeightedRecencyStrategy {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            top_n: config.top_n,
            decay_factor: config.time_decay_factor,
            click_weight: config.click_weight,
            view_weight: config.view_weight,
            unknown_weight: config.unknown_weight,
        }
    }

    pub fn interaction_weight(&self, interaction_type: InteractionType) -> f64 {
        match interaction_type {
            InteractionType::Click => self.click_weight,
            InteractionType::View => self.view_weight,
            InteractionType::Unknown => self.unknown_weight,
        }
    }

    pub fn score(&self, interaction: &Interaction, input: &AnalysisInput<'_>) -> f64 {
        time_decay(interaction.created_at, input.now, self.decay_factor)
            * self.interaction_weight(interaction.interaction_type)
    }
}

impl Default for WeightedRecencyStrategy {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl PreferenceStrategy for WeightedRecencyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::WeightedRecency
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> PreferenceAnalysis {
        let mut board = ScoreBoard::default();
        let mut counts: BTreeMap<Category, f64> = BTreeMap::new();
        let mut retained = 0usize;

        for interaction in input.mood_interactions() {
            retained += 1;

            let Some(category) = interaction.category else {
                continue;
            };

            *counts.entry(category).or_default() += 1.0;
            board.add(category, &interaction.item_name, self.score(interaction, input));
        }

        PreferenceAnalysis {
            top_preferences: board.ranked(self.top_n),
            weights: normalize_weights(counts, retained as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn interaction(kind: InteractionType, category: Category, name: &str, days_ago: i64) -> Interaction {
        Interaction::new(Uuid::new_v4(), kind, category, name, Mood::Happy)
            .recorded_at(Utc::now() - Duration::days(days_ago))
    }

    #[test]
    fn test_click_outweighs_view() {
        let now = Utc::now();
        let interactions = vec![
            interaction(InteractionType::View, Category::Food, "Salad", 0).recorded_at(now),
            interaction(InteractionType::Click, Category::Food, "Burger", 0).recorded_at(now),
        ];
        let input = AnalysisInput::new(&interactions, &[], Mood::Happy).at(now);

        let analysis = WeightedRecencyStrategy::default().analyze(&input);
        assert_eq!(analysis.top_preferences[&Category::Food], vec!["Burger", "Salad"]);
    }

    #[test]
    fn test_repeated_views_reinforce_item() {
        let now = Utc::now();
        let interactions = vec![
            interaction(InteractionType::Click, Category::Activity, "Climbing", 0).recorded_at(now),
            interaction(InteractionType::View, Category::Activity, "Yoga", 0).recorded_at(now),
            interaction(InteractionType::View, Category::Activity, "Yoga", 0).recorded_at(now),
            interaction(InteractionType::View, Category::Activity, "Yoga", 0).recorded_at(now),
            interaction(InteractionType::View, Category::Activity, "Yoga", 0).recorded_at(now),
            interaction(InteractionType::View, Category::Activity, "Yoga", 0).recorded_at(now),
        ];
        let input = AnalysisInput::new(&interactions, &[], Mood::Happy).at(now);

        let analysis = WeightedRecencyStrategy::default().analyze(&input);
        assert_eq!(analysis.top_preferences[&Category::Activity][0], "Yoga");
    }

    #[test]
    fn test_other_moods_are_ignored() {
        let interactions = vec![
            interaction(InteractionType::Click, Category::Food, "Soup", 1),
            Interaction::new(Uuid::new_v4(), InteractionType::Click, Category::Food, "Cake", Mood::Sad),
        ];
        let input = AnalysisInput::new(&interactions, &[], Mood::Happy);

        let analysis = WeightedRecencyStrategy::default().analyze(&input);
        assert_eq!(analysis.top_preferences[&Category::Food], vec!["Soup"]);
        assert_eq!(analysis.weights[&Category::Food], 1.0);
    }

    #[test]
    fn test_unknown_type_scores_as_one() {
        let strategy = WeightedRecencyStrategy::default();
        assert_eq!(strategy.interaction_weight(InteractionType::Unknown), 1.0);
        assert_eq!(strategy.interaction_weight(InteractionType::Click), 2.0);
        assert_eq!(strategy.interaction_weight(InteractionType::View), 0.5);
    }

    #[test]
    fn test_uncategorized_interaction_dilutes_weights() {
        let mut stray = interaction(InteractionType::Click, Category::Food, "Mystery", 0);
        stray.category = None;
        let interactions = vec![interaction(InteractionType::Click, Category::Food, "Pho", 0), stray];
        let input = AnalysisInput::new(&interactions, &[], Mood::Happy);

        let analysis = WeightedRecencyStrategy::default().analyze(&input);
        assert_eq!(analysis.weights[&Category::Food], 0.5);
        assert_eq!(analysis.top_preferences[&Category::Food], vec!["Pho"]);
    }

    #[test]
    fn test_empty_input_gives_empty_analysis() {
        let input = AnalysisInput::new(&[], &[], Mood::Bored);
        assert!(WeightedRecencyStrategy::default().analyze(&input).is_empty());
    }
}
