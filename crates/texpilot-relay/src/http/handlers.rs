//! Relay HTTP handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use tracing::{debug, info};

use texpilot_protocols::message::{GenerationRequest, GenerationResult, HealthResponse};
use texpilot_protocols::provider::{ChatMessage, CompletionRequest};

use crate::error::RelayError;
use crate::state::RelayState;

/// Instruction sent ahead of every prompt.
pub const LATEX_SYSTEM_PROMPT: &str = "You are a LaTeX expert. Generate only LaTeX code without any explanations or markdown formatting. Do not include begin{document} or end{document} in the LaTeX code.";

/// Body of `POST /generate-latex`.
#[derive(Debug, Deserialize)]
pub struct GenerateLatexRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateLatexRequest {
    /// The prompt, if it has any non-whitespace content.
    fn into_generation_request(self) -> Option<GenerationRequest> {
        self.prompt
            .map(GenerationRequest::new)
            .filter(|request| !request.is_blank())
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// `POST /generate-latex`
pub async fn generate_latex(
    State(state): State<Arc<RelayState>>,
    body: Result<Json<GenerateLatexRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, RelayError> {
    let Json(request) = body.map_err(|e| RelayError::InvalidBody(e.body_text()))?;

    let request = request
        .into_generation_request()
        .ok_or(RelayError::MissingPrompt)?;
    let prompt = request.prompt.as_str();
    let provider = state.provider().ok_or(RelayError::MissingCredential)?;

    info!(prompt = %prompt, "Received prompt");

    let completion = CompletionRequest::new(
        state.model(),
        vec![ChatMessage::system(LATEX_SYSTEM_PROMPT), ChatMessage::user(prompt)],
    );
    let text = provider.complete(completion).await?;

    let latex_code = text.trim();
    if latex_code.is_empty() {
        return Err(RelayError::internal("Completion response contained no text"));
    }

    info!(latex_code = %latex_code, "Generated LaTeX code");
    debug!(provider = provider.id(), "Completion served");

    Ok(Json(GenerationResult::success(latex_code)))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
