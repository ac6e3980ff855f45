//! Web server implementation
//!
//! Provides the main server struct and configuration.

use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

use super::routes::{create_router, AppState};
use crate::config::{GatewayConfig, DEFAULT_BODY_LIMIT};
use crate::gateway::Gateway;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Address to bind to
    pub bind: String,
    /// Maximum request body size in bytes
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            bind: "0.0.0.0".to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Derive the listener settings from a loaded gateway config.
    pub fn from_gateway(config: &GatewayConfig) -> Self {
        Self {
            port: config.port(),
            bind: config.server.bind.clone(),
            body_limit: config.server.body_limit,
        }
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the bind address
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }
}

/// Web server instance
pub struct WebServer {
    config: ServerConfig,
    router: Router,
}

impl WebServer {
    /// Build the server from a validated gateway configuration.
    pub fn new(gateway_config: &GatewayConfig) -> Self {
        let gateway = Gateway::from_config(gateway_config);
        let state = AppState::new(gateway);
        let config = ServerConfig::from_gateway(gateway_config);
        let router = create_router(state, gateway_config)
            .layer(CorsLayer::permissive())
            .layer(RequestBodyLimitLayer::new(config.body_limit));
        Self { config, router }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server until the process is stopped.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("listening on http://{}", listener.local_addr()?);
        tracing::info!("endpoints:");
        tracing::info!("  GET  /             - document form");
        tracing::info!("  GET  /health       - health check");
        tracing::info!("  POST /generate-pdf - convert and download");
        tracing::info!("  POST /preview-pdf  - convert for in-browser display");

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 0);
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn test_server_config_builder() {
        let config = ServerConfig::default()
            .with_port(3000)
            .with_bind("127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind, "127.0.0.1");
    }

    #[test]
    fn test_server_config_socket_addr() {
        let config = ServerConfig::default().with_port(8080).with_bind("127.0.0.1");
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
    }

    #[test]
    fn test_server_config_from_gateway() {
        let mut gateway_config = GatewayConfig::default();
        gateway_config.server.port = Some(9000);
        gateway_config.server.bind = "127.0.0.1".to_string();

        let config = ServerConfig::from_gateway(&gateway_config);
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind, "127.0.0.1");
    }
}
