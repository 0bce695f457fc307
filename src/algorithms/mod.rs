pub mod decay;
pub mod flat;
pub mod weighted;

pub use flat::FlatCountStrategy;
pub use weighted::WeightedRecencyStrategy;

use crate::config::AnalyzerConfig;
use crate::models::*;
use crate::utils::top_k_indices;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub interactions: &'a [Interaction],
    pub preferences: &'a [ExplicitPreference],
    pub mood: Mood,
    pub now: DateTime<Utc>,
}

impl<'a> AnalysisInput<'a> {
    pub fn new(
        interactions: &'a [Interaction],
        preferences: &'a [ExplicitPreference],
        mood: Mood,
    ) -> Self {
        Self {
            interactions,
            preferences,
            mood,
            now: Utc::now(),
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn mood_interactions(&self) -> impl Iterator<Item = &'a Interaction> {
        let mood = self.mood;
        self.interactions
            .iter()
            .filter(move |interaction| interaction.mood == Some(mood))
    }

    pub fn mood_preferences(&self) -> impl Iterator<Item = &'a ExplicitPreference> {
        let mood = self.mood;
        self.preferences
            .iter()
            .filter(move |preference| preference.mood == mood)
    }
}

pub trait PreferenceStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;
    fn analyze(&self, input: &AnalysisInput<'_>) -> PreferenceAnalysis;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    WeightedRecency,
    FlatCount,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::WeightedRecency => f.write_str("weighted_recency"),
            StrategyKind::FlatCount => f.write_str("flat_count"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weighted_recency" | "weighted" => Ok(StrategyKind::WeightedRecency),
            "flat_count" | "flat" => Ok(StrategyKind::FlatCount),
            other => Err(anyhow::anyhow!("Unknown strategy: {}", other)),
        }
    }
}

pub struct PreferenceAnalyzer {
    weighted: WeightedRecencyStrategy,
    flat: FlatCountStrategy,
}

impl PreferenceAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            weighted: WeightedRecencyStrategy::new(config),
            flat: FlatCountStrategy::new(config),
        }
    }

    pub fn strategy(&self, kind: StrategyKind) -> &dyn PreferenceStrategy {
        match kind {
            StrategyKind::WeightedRecency => &self.weighted,
            StrategyKind::FlatCount => &self.flat,
        }
    }

    pub fn analyze(&self, kind: StrategyKind, input: &AnalysisInput<'_>) -> PreferenceAnalysis {
        let analysis = self.strategy(kind).analyze(input);
        tracing::debug!(
            "Analyzed {} interactions for mood {} with {}: {} categories",
            input.interactions.len(),
            input.mood,
            kind,
            analysis.weights.len()
        );
        analysis
    }
}

impl Default for PreferenceAnalyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

#[derive(Debug, Default)]
struct CategoryScores {
    positions: HashMap<String, usize>,
    names: Vec<String>,
    scores: Vec<f64>,
}

// Equal scores rank in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct ScoreBoard {
    categories: BTreeMap<Category, CategoryScores>,
}

impl ScoreBoard {
    pub(crate) fn add(&mut self, category: Category, item: &str, score: f64) {
        if item.trim().is_empty() {
            return;
        }

        let entry = self.categories.entry(category).or_default();
        match entry.positions.get(item) {
            Some(&position) => entry.scores[position] += score,
            None => {
                entry.positions.insert(item.to_string(), entry.names.len());
                entry.names.push(item.to_string());
                entry.scores.push(score);
            }
        }
    }

    pub(crate) fn ranked(&self, top_n: usize) -> BTreeMap<Category, Vec<String>> {
        self.categories
            .iter()
            .filter(|(_, entry)| !entry.names.is_empty())
            .map(|(category, entry)| {
                let top = top_k_indices(&entry.scores, top_n)
                    .into_iter()
                    .map(|i| entry.names[i].clone())
                    .collect();
                (*category, top)
            })
            .collect()
    }
}

pub(crate) fn normalize_weights(totals: BTreeMap<Category, f64>, grand_total: f64) -> BTreeMap<Category, f64> {
    if grand_total <= 0.0 {
        return BTreeMap::new();
    }

    totals
        .into_iter()
        .map(|(category, total)| (category, total / grand_total))
        .collect()
}
