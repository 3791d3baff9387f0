//! Page agent errors.

use thiserror::Error;

use texpilot_protocols::error::{Classify, DomError, ErrorClass};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Timeout waiting for element: {selector}")]
    EditorNotFound { selector: String },

    #[error("Could not find cursor position")]
    CursorNotFound,

    #[error("Could not connect to backend server. Please make sure it is running on {relay_url}")]
    BackendUnreachable { relay_url: String },

    /// The relay reported a failure; carries its message verbatim.
    #[error("{0}")]
    GenerationFailed(String),

    #[error("No LaTeX code received from server")]
    EmptyResult,

    #[error("Could not find editor content")]
    ContentNotFound,

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("A LaTeX generation is already in progress")]
    Busy,

    #[error("Cancelled while waiting for element: {selector}")]
    Cancelled { selector: String },
}

impl Classify for AgentError {
    fn class(&self) -> ErrorClass {
        match self {
            AgentError::EditorNotFound { .. }
            | AgentError::CursorNotFound
            | AgentError::ContentNotFound => ErrorClass::NotFound,
            AgentError::BackendUnreachable { .. } | AgentError::GenerationFailed(_) => {
                ErrorClass::Connectivity
            }
            AgentError::EmptyResult | AgentError::Busy => ErrorClass::Validation,
            AgentError::Dom(_) | AgentError::Cancelled { .. } => ErrorClass::Internal,
        }
    }
}
