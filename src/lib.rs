pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;
pub mod utils;

pub use algorithms::{AnalysisInput, PreferenceAnalyzer, PreferenceStrategy, StrategyKind};
pub use config::Config;
pub use error::{ParseError, ServiceError};
pub use models::*;
pub use parser::{clean_and_extract_distance, extract_recommendation_details, parse_recommendation_response};

use anyhow::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<services::store::MemoryStore>,
    pub analyzer: Arc<PreferenceAnalyzer>,
    pub recommendation_service: Arc<services::recommendation::RecommendationService>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let source = Arc::new(services::webhook::WebhookClient::new(&config.webhook)?);
        Ok(Self::with_source(config, source))
    }

    pub fn with_source(config: Config, source: Arc<dyn services::webhook::RecommendationSource>) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(services::store::MemoryStore::new());
        let analyzer = Arc::new(PreferenceAnalyzer::new(&config.analyzer));

        let recommendation_service = Arc::new(
            services::recommendation::RecommendationService::new(
                store.clone(),
                store.clone(),
                source,
                config.clone(),
            )
        );

        Self {
            config,
            store,
            analyzer,
            recommendation_service,
        }
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
