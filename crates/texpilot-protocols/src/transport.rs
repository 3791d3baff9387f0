//! Extension messaging transport protocol.
//!
//! Models the browser's tab query, script injection and tab messaging APIs as
//! typed request/response traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::message::{AgentRequest, GenerationResult, RuntimeNotice};

/// Browser tab identifier.
pub type TabId = u32;

/// A browser tab as seen by the popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub url: String,
}

impl TabInfo {
    pub fn new(id: TabId, url: impl Into<String>) -> Self {
        Self { id, url: url.into() }
    }
}

/// Request/response delivery to the receiver registered in a tab.
#[async_trait]
pub trait TabMessenger: Send + Sync {
    /// Send `request` to the tab's receiver and wait for its reply.
    ///
    /// Fails with [`TransportError::NoReceiver`] when nothing listens in the tab.
    async fn send(&self, tab: TabId, request: AgentRequest)
    -> Result<GenerationResult, TransportError>;
}

/// Tab access available to the popup.
#[async_trait]
pub trait TabHost: TabMessenger {
    /// The active tab of the current window.
    async fn active_tab(&self) -> Result<Option<TabInfo>, TransportError>;

    /// Load the page agent into `tab`.
    async fn inject_agent(&self, tab: TabId) -> Result<(), TransportError>;
}

/// A receiver registered in a tab.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handle one request. Never fails: errors are reported in the result.
    async fn handle(&self, request: AgentRequest) -> GenerationResult;

    /// The receiver was removed from its tab (replaced, unregistered or the
    /// tab closed). No further requests will arrive.
    fn detach(&self) {}
}

/// Fire-and-forget channel from a page agent to the extension runtime.
pub trait RuntimeNotifier: Send + Sync {
    fn notify(&self, notice: RuntimeNotice);
}
