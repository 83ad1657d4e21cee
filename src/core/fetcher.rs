//! Upstream item fetcher
//!
//! The scheduler sees the upstream through the [`ItemFetcher`] trait: one
//! asynchronous fetch per item identifier, awaited collectively per batch.
//! Two implementations ship with the gateway: an HTTP fetcher for real
//! upstreams and a simulated fetcher for development and tests.

use crate::config::{FetcherConfig, FetcherMode};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Contract between the scheduler and the external resource
#[async_trait]
pub trait ItemFetcher: Send + Sync {
    /// Fetch a single item from the upstream resource.
    async fn fetch(&self, item_id: &str) -> Result<()>;
}

/// Build the fetcher selected by configuration
pub fn build_fetcher(config: &FetcherConfig) -> Result<Arc<dyn ItemFetcher>> {
    match config.mode {
        FetcherMode::Http => Ok(Arc::new(HttpFetcher::new(config)?)),
        FetcherMode::Simulated => Ok(Arc::new(SimulatedFetcher::new(config))),
    }
}

/// HTTP fetcher issuing one GET per item against a URL template
pub struct HttpFetcher {
    client: reqwest::Client,
    url_template: String,
}

impl HttpFetcher {
    /// Create an HTTP fetcher from configuration
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let url_template = config
            .url
            .clone()
            .ok_or_else(|| GatewayError::Config("HTTP fetcher requires a url".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            url_template,
        })
    }
}

#[async_trait]
impl ItemFetcher for HttpFetcher {
    async fn fetch(&self, item_id: &str) -> Result<()> {
        let url = self.url_template.replace("{id}", item_id);
        debug!(item_id, url, "fetching item");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Upstream(format!(
                "upstream returned {} for item {}",
                status, item_id
            )));
        }

        Ok(())
    }
}

/// Simulated fetcher with configurable latency, jitter and failure rate
///
/// With the default `failure_rate` of 0.0 every fetch eventually succeeds,
/// which is the gateway's reference behavior.
pub struct SimulatedFetcher {
    latency: Duration,
    jitter: Duration,
    failure_rate: f64,
}

impl SimulatedFetcher {
    /// Create a simulated fetcher from configuration
    pub fn new(config: &FetcherConfig) -> Self {
        Self {
            latency: config.latency(),
            jitter: Duration::from_millis(config.jitter_ms),
            failure_rate: config.failure_rate,
        }
    }
}

#[async_trait]
impl ItemFetcher for SimulatedFetcher {
    async fn fetch(&self, item_id: &str) -> Result<()> {
        let mut delay = self.latency;
        if !self.jitter.is_zero() {
            delay += self.jitter.mul_f64(rand::random::<f64>());
        }
        tokio::time::sleep(delay).await;

        if self.failure_rate > 0.0 && rand::random::<f64>() < self.failure_rate {
            return Err(GatewayError::Upstream(format!(
                "simulated failure for item {}",
                item_id
            )));
        }

        debug!(item_id, "simulated fetch completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn simulated(latency_ms: u64, failure_rate: f64) -> SimulatedFetcher {
        SimulatedFetcher::new(&FetcherConfig {
            latency_ms,
            failure_rate,
            ..FetcherConfig::default()
        })
    }

    #[tokio::test]
    async fn test_simulated_fetch_succeeds() {
        let fetcher = simulated(1, 0.0);
        assert!(fetcher.fetch("item-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_simulated_fetch_always_fails() {
        let fetcher = simulated(1, 1.0);
        let err = fetcher.fetch("item-1").await.unwrap_err();
        assert!(matches!(err, GatewayError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_http_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/item-1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&FetcherConfig {
            mode: FetcherMode::Http,
            url: Some(format!("{}/items/{{id}}", server.uri())),
            ..FetcherConfig::default()
        })
        .unwrap();

        assert!(fetcher.fetch("item-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_http_fetch_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&FetcherConfig {
            mode: FetcherMode::Http,
            url: Some(format!("{}/items/{{id}}", server.uri())),
            ..FetcherConfig::default()
        })
        .unwrap();

        let err = fetcher.fetch("item-1").await.unwrap_err();
        assert!(matches!(err, GatewayError::Upstream(_)));
    }

    #[test]
    fn test_http_fetcher_requires_url() {
        let result = HttpFetcher::new(&FetcherConfig {
            mode: FetcherMode::Http,
            url: None,
            ..FetcherConfig::default()
        });
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }
}
