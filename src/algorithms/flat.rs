use super::{normalize_weights, AnalysisInput, PreferenceStrategy, ScoreBoard, StrategyKind};
use crate::config::AnalyzerConfig;
use crate::models::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct FlatCountStrategy {
    top_n: usize,
    explicit_weight: f64,
    click_weight: f64,
    view_weight: f64,
    unknown_weight: f64,
}

impl FlatCountStrategy {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            top_n: config.top_n,
            explicit_weight: config.explicit_preference_weight,
            click_weight: config.flat_click_weight,
            view_weight: config.flat_view_weight,
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
}

impl Default for FlatCountStrategy {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl PreferenceStrategy for FlatCountStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FlatCount
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> PreferenceAnalysis {
        let mut board = ScoreBoard::default();
        let mut totals: BTreeMap<Category, f64> = BTreeMap::new();
        let mut grand_total = 0.0;

        let mut accumulate = |category: Category, item: &str, weight: f64| {
            if item.trim().is_empty() {
                return;
            }
            board.add(category, item, weight);
            *totals.entry(category).or_default() += weight;
            grand_total += weight;
        };

        for preference in input.mood_preferences() {
            accumulate(preference.category, &preference.preference, self.explicit_weight);
        }

        for interaction in input.mood_interactions() {
            if let Some(category) = interaction.category {
                accumulate(
                    category,
                    &interaction.item_name,
                    self.interaction_weight(interaction.interaction_type),
                );
            }
        }

        PreferenceAnalysis {
            top_preferences: board.ranked(self.top_n),
            weights: normalize_weights(totals, grand_total),
        }
    }
}
