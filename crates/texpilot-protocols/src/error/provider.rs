//! Completion provider errors.

use thiserror::Error;

use super::{Classify, ErrorClass};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Completion response contained no text")]
    EmptyCompletion,
}

impl Classify for ProviderError {
    fn class(&self) -> ErrorClass {
        match self {
            ProviderError::ApiError { .. } | ProviderError::Network(_) => ErrorClass::Connectivity,
            ProviderError::InvalidResponse(_) | ProviderError::EmptyCompletion => {
                ErrorClass::Internal
            }
        }
    }
}
