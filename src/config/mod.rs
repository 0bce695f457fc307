use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub analyzer: AnalyzerConfig,
    pub webhook: WebhookConfig,
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub top_n: usize,
    pub time_decay_factor: f64,
    pub click_weight: f64,
    pub view_weight: f64,
    pub unknown_weight: f64,
    pub flat_click_weight: f64,
    pub flat_view_weight: f64,
    pub explicit_preference_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub default_budget: f64,
    pub default_age: String,
    pub default_language: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_n: 3,
            time_decay_factor: 0.1,
            click_weight: 2.0,
            view_weight: 0.5,
            unknown_weight: 1.0,
            flat_click_weight: 2.0,
            flat_view_weight: 1.0,
            explicit_preference_weight: 1.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: num_cpus::get(),
            },
            analyzer: AnalyzerConfig::default(),
            webhook: WebhookConfig {
                url: "http://localhost:5678/webhook/recommendations".to_string(),
                timeout_seconds: 30,
                max_retries: 2,
                retry_delay_ms: 500,
            },
            recommendation: RecommendationConfig {
                default_budget: 50.0,
                default_age: "25".to_string(),
                default_language: "English".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("MOODREC").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_addr() {
        let config = Config::default();
        let addr = config.server.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_invalid_host_is_an_error() {
        let mut config = Config::default();
        config.server.host = "not a host".to_string();
        assert!(config.server.socket_addr().is_err());
    }

    #[test]
    fn test_analyzer_defaults() {
        let analyzer = AnalyzerConfig::default();
        assert_eq!(analyzer.top_n, 3);
        assert_eq!(analyzer.click_weight, 2.0);
        assert_eq!(analyzer.view_weight, 0.5);
    }
}
