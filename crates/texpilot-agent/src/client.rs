//! HTTP client for the relay server.

use async_trait::async_trait;
use tracing::{debug, warn};

use texpilot_protocols::error::RelayClientError;
use texpilot_protocols::message::{GenerationRequest, GenerationResult};
use texpilot_protocols::relay::RelayClient;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

/// [`RelayClient`] speaking HTTP to a relay at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn health_check(&self) -> Result<(), RelayClientError> {
        let response = self
            .client
            .get(self.endpoint("/health"))
            .send()
            .await
            .map_err(|e| RelayClientError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Relay health check failed");
            return Err(RelayClientError::Status {
                status: status.as_u16(),
                message: format!("Backend server responded with status: {}", status.as_u16()),
            });
        }
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationResult, RelayClientError> {
        debug!(url = %self.base_url, "Requesting LaTeX generation");
        let response = self
            .client
            .post(self.endpoint("/generate-latex"))
            .json(&GenerationRequest::new(prompt))
            .send()
            .await
            .map_err(|e| RelayClientError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            let message = response
                .json::<GenerationResult>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("Failed to generate LaTeX code: {code}"));
            return Err(RelayClientError::Status {
                status: code,
                message,
            });
        }

        response
            .json::<GenerationResult>()
            .await
            .map_err(|e| RelayClientError::Decode(e.to_string()))
    }
}
