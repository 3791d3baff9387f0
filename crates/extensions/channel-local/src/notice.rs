//! Runtime notice bus.

use tokio::sync::broadcast;
use tracing::debug;

use texpilot_protocols::message::RuntimeNotice;
use texpilot_protocols::transport::RuntimeNotifier;

const NOTICE_CAPACITY: usize = 32;

/// Broadcasts fire-and-forget notices from page agents to whoever listens.
#[derive(Debug, Clone)]
pub struct NoticeBus {
    tx: broadcast::Sender<RuntimeNotice>,
}

impl NoticeBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(NOTICE_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RuntimeNotice> {
        self.tx.subscribe()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeNotifier for NoticeBus {
    fn notify(&self, notice: RuntimeNotice) {
        if self.tx.send(notice).is_err() {
            debug!(?notice, "No listeners for runtime notice");
        }
    }
}
