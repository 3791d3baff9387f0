//! Relay server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use texpilot_config::{RELAY_PORT, RelayConfig};

use crate::http::routes::create_router;
use crate::state::RelayState;

/// Relay server configuration.
#[derive(Debug, Clone)]
pub struct RelayServerConfig {
    pub host: String,
    pub port: u16,
}

impl RelayServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for RelayServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: RELAY_PORT,
        }
    }
}

impl From<&RelayConfig> for RelayServerConfig {
    fn from(config: &RelayConfig) -> Self {
        Self::new(config.host.clone(), RELAY_PORT)
    }
}

/// The relay server.
pub struct RelayServer {
    config: RelayServerConfig,
    state: Arc<RelayState>,
}

impl RelayServer {
    pub fn new(config: RelayServerConfig, state: Arc<RelayState>) -> Self {
        Self { config, state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(
        &self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = create_router(self.state.clone());
        let local = listener.local_addr()?;

        info!("Server running at http://{}", local);
        info!("Health check available at http://{}/health", local);
        if !self.state.is_configured() {
            warn!("OpenAI API key is not configured; /generate-latex will fail until it is set");
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Relay server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[test]
    fn test_relay_server_config_default() {
        let config = RelayServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_relay_server_config_from_relay_config() {
        let relay = RelayConfig {
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        let config = RelayServerConfig::from(&relay);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, RELAY_PORT);
    }

    #[test]
    fn test_relay_server_addr_format() {
        let server = RelayServer::new(
            RelayServerConfig::new("localhost", 9000),
            Arc::new(RelayState::unconfigured("gpt-3.5-turbo")),
        );
        assert_eq!(server.addr(), "localhost:9000");
    }

    #[tokio::test]
    async fn test_serve_answers_health_and_shuts_down() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = RelayServer::new(
            RelayServerConfig::default(),
            Arc::new(RelayState::unconfigured("gpt-3.5-turbo")),
        );

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            server
                .serve(listener, async {
                    let _ = rx.await;
                })
                .await
                .is_ok()
        });

        let body: serde_json::Value = reqwest::get(format!("http://{}/health", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");

        tx.send(()).unwrap();
        assert!(handle.await.unwrap());
    }
}
