//! Per-tab message receiver.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

use texpilot_protocols::error::TransportError;
use texpilot_protocols::message::{AgentRequest, GenerationResult};
use texpilot_protocols::transport::{MessageHandler, TabId};

const QUEUE_DEPTH: usize = 16;

struct Envelope {
    request: AgentRequest,
    reply: oneshot::Sender<GenerationResult>,
}

/// The receiving end registered in a tab.
///
/// Requests are handed to a worker task which runs each one on its own task,
/// so a handler sees concurrent requests exactly as they arrive. Once the
/// last clone of the connection is dropped the worker stops and detaches
/// the handler.
#[derive(Clone)]
pub struct TabConnection {
    tab: TabId,
    tx: mpsc::Sender<Envelope>,
}

impl TabConnection {
    /// Create a connection for `tab` and spawn its worker.
    pub fn spawn(tab: TabId, handler: Arc<dyn MessageHandler>) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        tokio::spawn(serve_tab(tab, rx, handler));
        Self { tab, tx }
    }

    pub fn tab(&self) -> TabId {
        self.tab
    }

    /// Whether the worker has stopped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Deliver `request` and wait for the handler's reply.
    pub async fn request(&self, request: AgentRequest) -> Result<GenerationResult, TransportError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .await
            .map_err(|_| TransportError::Disconnected)?;
        response.await.map_err(|_| TransportError::Disconnected)
    }
}

async fn serve_tab(tab: TabId, mut rx: mpsc::Receiver<Envelope>, handler: Arc<dyn MessageHandler>) {
    debug!(tab, "Tab receiver started");
    while let Some(Envelope { request, reply }) = rx.recv().await {
        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let result = handler.handle(request).await;
            if reply.send(result).is_err() {
                trace!(tab, "Sender went away before the reply");
            }
        });
    }
    // Every sender is gone: the tab dropped this receiver.
    handler.detach();
    debug!(tab, "Tab receiver stopped");
}
