//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("Starting fetchgate gateway");

    // Auto-load configuration file
    let config_path = "config/gateway.yaml";
    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration loaded from {}", config_path);
            config
        }
        Err(e) => {
            info!(
                "Configuration file loading failed ({}), using default config",
                e
            );
            let mut config = Config::default();
            config.apply_env()?;
            config.validate()?;
            config
        }
    };

    // Create and start server
    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /status - Scheduler status");
    info!("   GET  /version - Build information");
    info!("   POST /v1/submissions - Submit item identifiers");
    info!("   GET  /v1/submissions/{{id}} - Query a submission");

    server.start().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_config() {
        assert!(ServerBuilder::new().build().is_err());
    }

    #[test]
    fn test_builder_with_default_config() {
        let server = ServerBuilder::new()
            .with_config(Config::default())
            .build()
            .unwrap();
        assert_eq!(server.config().port, 8080);
    }
}
