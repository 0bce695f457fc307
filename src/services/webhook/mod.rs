use crate::config::WebhookConfig;
use crate::error::ServiceError;
use crate::models::RecommendationPayload;
use crate::utils::retry_with_backoff;
use std::time::Duration;
use tracing::{debug, info};

#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch(&self, payload: &RecommendationPayload) -> Result<String, ServiceError>;
}

pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
    max_retries: usize,
    retry_delay: Duration,
}

impl WebhookClient {
    pub fn new(config: &WebhookConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: reqwest::Client, config: &WebhookConfig) -> Self {
        info!("Recommendation webhook at {}", config.url);

        Self {
            http,
            url: config.url.clone(),
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    async fn post_once(&self, payload: &RecommendationPayload) -> Result<String, reqwest::Error> {
        self.http
            .post(&self.url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

// Transport failures and 5xx are retried; a 4xx will not change on resend.
fn is_retryable(error: &reqwest::Error) -> bool {
    error.status().map_or(true, |status| status.is_server_error())
}

#[async_trait::async_trait]
impl RecommendationSource for WebhookClient {
    async fn fetch(&self, payload: &RecommendationPayload) -> Result<String, ServiceError> {
        let body = retry_with_backoff(
            || self.post_once(payload),
            is_retryable,
            self.max_retries,
            self.retry_delay,
        )
        .await
        .map_err(|e| match e.status() {
            Some(status) => ServiceError::Webhook(format!("webhook returned {}", status)),
            None => ServiceError::Webhook(e.to_string()),
        })?;

        debug!("Webhook returned {} bytes", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocationCoordinates, Mood};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    async fn read_request(socket: &mut TcpStream) {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => n,
            };
            buffer.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buffer);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if buffer.len() >= end + 4 + content_length {
                    return;
                }
            }
        }
    }

    // Answers every request with the same status and body, counting requests.
    async fn spawn_webhook(status_line: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                read_request(&mut socket).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}/hook", addr), hits)
    }

    fn client_for(url: String) -> WebhookClient {
        let config = WebhookConfig {
            url,
            timeout_seconds: 5,
            max_retries: 2,
            retry_delay_ms: 1,
        };
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        WebhookClient::with_client(http, &config)
    }

    fn payload() -> RecommendationPayload {
        RecommendationPayload {
            name: "sam".to_string(),
            age: "25".to_string(),
            sex: "not_specified".to_string(),
            nationality: "not_specified".to_string(),
            mother_tongue: "English".to_string(),
            location: LocationCoordinates { latitude: 40.7, longitude: -74.0 },
            mood: Mood::Happy,
            budget: 50.0,
            preferences: BTreeMap::new(),
            category_weights: BTreeMap::new(),
            custom_prompts: None,
            previous_recommendations: None,
        }
    }

    #[tokio::test]
    async fn test_returns_body_on_success() {
        let (url, hits) = spawn_webhook("200 OK", "{\"food\":\"Ramen\"}").await;
        let body = client_for(url).fetch(&payload()).await.unwrap();

        assert_eq!(body, "{\"food\":\"Ramen\"}");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (url, hits) = spawn_webhook("400 Bad Request", "bad payload").await;
        let err = client_for(url).fetch(&payload()).await.unwrap_err();

        assert!(matches!(err, ServiceError::Webhook(ref message) if message.contains("400")));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let (url, hits) = spawn_webhook("503 Service Unavailable", "busy").await;
        let err = client_for(url).fetch(&payload()).await.unwrap_err();

        assert!(matches!(err, ServiceError::Webhook(ref message) if message.contains("503")));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
