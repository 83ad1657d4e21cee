//! Configuration management for the gateway
//!
//! This module handles loading, validation, and management of all gateway configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        let mut config = Self { gateway };
        config.apply_env()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Apply environment variable overrides (FETCHGATE_*)
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = env::var("FETCHGATE_HOST") {
            self.gateway.server.host = host;
        }
        if let Ok(port) = env::var("FETCHGATE_PORT") {
            self.gateway.server.port = port
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(workers) = env::var("FETCHGATE_WORKERS") {
            self.gateway.server.workers = Some(
                workers
                    .parse()
                    .map_err(|e| GatewayError::Config(format!("Invalid workers count: {}", e)))?,
            );
        }
        if let Ok(batch_size) = env::var("FETCHGATE_BATCH_SIZE") {
            self.gateway.scheduler.batch_size = batch_size
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid batch size: {}", e)))?;
        }
        if let Ok(cooldown) = env::var("FETCHGATE_COOLDOWN_MS") {
            self.gateway.scheduler.cooldown_ms = cooldown
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid cooldown: {}", e)))?;
        }
        if let Ok(url) = env::var("FETCHGATE_UPSTREAM_URL") {
            self.gateway.fetcher.mode = FetcherMode::Http;
            self.gateway.fetcher.url = Some(url);
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get scheduler configuration
    pub fn scheduler(&self) -> &SchedulerConfig {
        &self.gateway.scheduler
    }

    /// Get fetcher configuration
    pub fn fetcher(&self) -> &FetcherConfig {
        &self.gateway.fetcher
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .server
            .cors
            .validate()
            .map_err(|e| GatewayError::Config(format!("CORS config error: {}", e)))?;

        self.gateway
            .scheduler
            .validate()
            .map_err(|e| GatewayError::Config(format!("Scheduler config error: {}", e)))?;

        self.gateway
            .fetcher
            .validate()
            .map_err(|e| GatewayError::Config(format!("Fetcher config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_config_from_file() {
        let config_content = r#"
server:
  host: "127.0.0.1"
  port: 8080
  workers: 4

scheduler:
  batch_size: 3
  cooldown_ms: 500

fetcher:
  mode: "simulated"
  latency_ms: 100
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.server().host, "127.0.0.1");
        assert_eq!(config.server().port, 8080);
        assert_eq!(config.scheduler().batch_size, 3);
        assert_eq!(config.scheduler().cooldown_ms, 500);
        assert_eq!(config.fetcher().latency_ms, 100);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_mode_requires_url() {
        let mut config = Config::default();
        config.gateway.fetcher.mode = FetcherMode::Http;
        config.gateway.fetcher.url = None;
        assert!(config.validate().is_err());

        config.gateway.fetcher.url = Some("https://upstream.example/items/{id}".to_string());
        assert!(config.validate().is_ok());
    }
}
