//! OpenAI provider implementation.

use async_trait::async_trait;
use tracing::{debug, error};

use texpilot_protocols::error::ProviderError;
use texpilot_protocols::provider::{CompletionProvider, CompletionRequest};

use crate::api::{ApiRequest, ApiResponse};
use crate::converter::convert_request;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat-completions provider.
pub struct OpenAIProvider {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_API_URL.to_string())
    }

    /// Create provider with custom API URL (for OpenAI-compatible APIs).
    pub fn with_url(api_key: String, api_url: String) -> Self {
        Self {
            api_key,
            api_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn send_request(&self, api_request: &ApiRequest) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            error!(status, body = %text, "OpenAI API error");
            return Err(ProviderError::ApiError { status, message: text });
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    fn id(&self) -> &str {
        "openai"
    }

    fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let api_request = convert_request(&request);
        debug!(model = %api_request.model, messages = api_request.messages.len(), "Sending completion request");

        let response = self.send_request(&api_request).await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        api_response.first_text().ok_or(ProviderError::EmptyCompletion)
    }
}
