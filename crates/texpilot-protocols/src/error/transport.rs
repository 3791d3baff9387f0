//! Messaging transport errors.

use thiserror::Error;

use super::{Classify, ErrorClass};
use crate::transport::TabId;

#[derive(Debug, Error)]
pub enum TransportError {
    /// No receiver is registered in the tab (the page agent is not loaded).
    #[error("Could not establish connection. Receiving end does not exist (tab {0})")]
    NoReceiver(TabId),

    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Message channel closed before a response was received")]
    Disconnected,

    #[error("Script injection failed: {0}")]
    InjectionFailed(String),

    #[error("Tab query failed: {0}")]
    QueryFailed(String),
}

impl TransportError {
    /// Whether the failure means the page agent simply is not present yet.
    pub fn is_missing_receiver(&self) -> bool {
        matches!(self, TransportError::NoReceiver(_))
    }
}

impl Classify for TransportError {
    fn class(&self) -> ErrorClass {
        match self {
            TransportError::NoReceiver(_) | TransportError::TabNotFound(_) => ErrorClass::NotFound,
            TransportError::Disconnected => ErrorClass::Connectivity,
            TransportError::InjectionFailed(_) | TransportError::QueryFailed(_) => {
                ErrorClass::Internal
            }
        }
    }
}
