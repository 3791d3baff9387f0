//! Wire messages exchanged between popup, page agent and relay.
//!
//! Every message here is serialized with the field names the extension
//! scripts and the relay already speak (`latexCode`, `action`, ...).

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// A prompt to turn into LaTeX.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// True for empty or whitespace-only prompts.
    pub fn is_blank(&self) -> bool {
        self.prompt.trim().is_empty()
    }
}

/// Outcome of a generation, as returned by the relay and the page agent.
///
/// `latex_code` is present iff `success`; `error` is present iff not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latex_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Diagnostic detail attached to internal failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl GenerationResult {
    pub fn success(latex_code: impl Into<String>) -> Self {
        Self {
            success: true,
            latex_code: Some(latex_code.into()),
            error: None,
            details: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            latex_code: None,
            error: Some(error.into()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn latex_code(&self) -> Option<&str> {
        self.latex_code.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Request sent from the popup to the page agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AgentRequest {
    GenerateLatex { prompt: String },
}

impl AgentRequest {
    pub fn generate_latex(prompt: impl Into<String>) -> Self {
        AgentRequest::GenerateLatex {
            prompt: prompt.into(),
        }
    }
}

/// Fire-and-forget notices posted by the page agent to the extension runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RuntimeNotice {
    ContentScriptLoaded,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
