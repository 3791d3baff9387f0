//! Relay error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use texpilot_protocols::error::{Classify, ErrorClass, ProviderError};
use texpilot_protocols::message::GenerationResult;

/// Relay error types.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Body is not a JSON object of the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Prompt missing, empty or whitespace-only.
    #[error("Prompt is required")]
    MissingPrompt,

    /// No API credential configured.
    #[error("OpenAI API key is not configured")]
    MissingCredential,

    /// Upstream answered with a non-success status.
    #[error("OpenAI API Error: {status} {body}")]
    Upstream { status: u16, body: String },

    /// Anything else.
    #[error("{message}")]
    Internal {
        message: String,
        details: Option<String>,
    },
}

impl RelayError {
    pub fn internal(message: impl Into<String>) -> Self {
        RelayError::Internal {
            message: message.into(),
            details: None,
        }
    }

    /// HTTP status for this failure. Upstream failures keep the upstream status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidBody(_) | RelayError::MissingPrompt => StatusCode::BAD_REQUEST,
            RelayError::MissingCredential | RelayError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }
}

impl Classify for RelayError {
    fn class(&self) -> ErrorClass {
        match self {
            RelayError::InvalidBody(_) | RelayError::MissingPrompt => ErrorClass::Validation,
            RelayError::MissingCredential => ErrorClass::Configuration,
            RelayError::Upstream { .. } => ErrorClass::Connectivity,
            RelayError::Internal { .. } => ErrorClass::Internal,
        }
    }
}

impl From<ProviderError> for RelayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiError { status, message } => RelayError::Upstream {
                status,
                body: message,
            },
            other => RelayError::Internal {
                message: other.to_string(),
                details: Some(format!("{:?}", other)),
            },
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(class = %self.class(), status = status.as_u16(), "{}", self);
        }

        let body = match self {
            RelayError::Internal { message, details } => {
                let result = GenerationResult::failure(message);
                match details {
                    Some(details) => result.with_details(details),
                    None => result,
                }
            }
            other => GenerationResult::failure(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
