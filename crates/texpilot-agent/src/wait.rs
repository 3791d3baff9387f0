//! Waiting for an element to appear in the host document.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use texpilot_protocols::document::{DocumentEvent, HostDocument};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaitError {
    #[error("Timeout waiting for element: {0}")]
    Timeout(String),

    #[error("Cancelled while waiting for element: {0}")]
    Cancelled(String),

    /// The document's event stream ended; it can no longer change.
    #[error("Document closed while waiting for element: {0}")]
    DocumentClosed(String),
}

/// Resolve once `selector` matches an element in `document`.
///
/// Watches mutation events rather than polling. Fails after `timeout`, or as
/// soon as `cancel` fires. The event subscription is dropped when the future
/// completes or is dropped.
pub async fn wait_for_element<D: HostDocument>(
    document: &D,
    selector: &str,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<(), WaitError> {
    // Subscribe before the first check so a mutation in between is not lost.
    let mut events = document.subscribe();
    if document.exists(selector) {
        return Ok(());
    }

    let observe = async {
        loop {
            match events.recv().await {
                Ok(DocumentEvent::Mutation) | Err(RecvError::Lagged(_)) => {
                    if document.exists(selector) {
                        return Ok(());
                    }
                }
                Ok(DocumentEvent::SelectionChange) => {}
                Err(RecvError::Closed) => {
                    return Err(WaitError::DocumentClosed(selector.to_string()));
                }
            }
        }
    };

    trace!(selector, timeout_ms = timeout.as_millis() as u64, "Waiting for element");
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(WaitError::Cancelled(selector.to_string())),
        outcome = tokio::time::timeout(timeout, observe) => {
            outcome.unwrap_or_else(|_| Err(WaitError::Timeout(selector.to_string())))
        }
    }
}
