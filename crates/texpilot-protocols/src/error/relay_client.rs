//! Errors seen by a client of the relay server.

use thiserror::Error;

use super::{Classify, ErrorClass};

#[derive(Debug, Error)]
pub enum RelayClientError {
    /// The request never produced an HTTP response.
    #[error("Relay unreachable: {0}")]
    Unreachable(String),

    /// The relay answered with a non-success status.
    #[error("Relay responded with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The relay answered with a body that is not a valid result.
    #[error("Invalid relay response: {0}")]
    Decode(String),
}

impl Classify for RelayClientError {
    fn class(&self) -> ErrorClass {
        match self {
            RelayClientError::Unreachable(_) | RelayClientError::Status { .. } => {
                ErrorClass::Connectivity
            }
            RelayClientError::Decode(_) => ErrorClass::Internal,
        }
    }
}
