//! # texpilot Channel - Local
//!
//! An in-process extension host. It stands in for the browser's tab query,
//! script injection and tab messaging APIs, so the popup, the page agent and
//! the relay can talk to each other inside a single process.
//!
//! ## Usage
//!
//! ```ignore
//! use texpilot_channel_local::LocalBrowser;
//!
//! let browser = LocalBrowser::with_injector(injector);
//! let tab = browser.open_tab("https://www.overleaf.com/project/1");
//! browser.inject_agent(tab).await?;
//! ```

mod connection;
mod injector;
mod notice;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info};

use texpilot_protocols::error::TransportError;
use texpilot_protocols::message::{AgentRequest, GenerationResult, RuntimeNotice};
use texpilot_protocols::transport::{MessageHandler, TabHost, TabId, TabInfo, TabMessenger};

pub use connection::TabConnection;
pub use injector::AgentInjector;
pub use notice::NoticeBus;

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;

struct Tab {
    url: String,
    connection: Option<TabConnection>,
}

/// A browser window with tabs, living in memory.
pub struct LocalBrowser {
    tabs: DashMap<TabId, Tab>,
    active: RwLock<Option<TabId>>,
    next_id: AtomicU32,
    injector: Option<Arc<dyn AgentInjector>>,
    notices: NoticeBus,
}

impl LocalBrowser {
    /// A browser that cannot inject agents.
    pub fn new() -> Self {
        Self {
            tabs: DashMap::new(),
            active: RwLock::new(None),
            next_id: AtomicU32::new(1),
            injector: None,
            notices: NoticeBus::new(),
        }
    }

    pub fn with_injector(injector: Arc<dyn AgentInjector>) -> Self {
        Self {
            injector: Some(injector),
            ..Self::new()
        }
    }

    /// Open a tab at `url` and make it active.
    pub fn open_tab(&self, url: impl Into<String>) -> TabId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let url = url.into();
        debug!(tab = id, url = %url, "Tab opened");
        self.tabs.insert(id, Tab { url, connection: None });
        *self.active.write() = Some(id);
        id
    }

    /// Make `tab` the active tab.
    pub fn activate(&self, tab: TabId) -> Result<(), TransportError> {
        if !self.tabs.contains_key(&tab) {
            return Err(TransportError::TabNotFound(tab));
        }
        *self.active.write() = Some(tab);
        Ok(())
    }

    /// Close `tab`, dropping its receiver.
    pub fn close_tab(&self, tab: TabId) {
        self.tabs.remove(&tab);
        let mut active = self.active.write();
        if *active == Some(tab) {
            *active = None;
        }
    }

    /// Register `handler` as the receiver in `tab`, replacing any previous one.
    ///
    /// A replaced receiver is detached once its worker drains.
    pub fn register(&self, tab: TabId, handler: Arc<dyn MessageHandler>) -> Result<(), TransportError> {
        let mut entry = self.tabs.get_mut(&tab).ok_or(TransportError::TabNotFound(tab))?;
        entry.connection = Some(TabConnection::spawn(tab, handler));
        Ok(())
    }

    /// Remove the receiver from `tab`, as a page reload would.
    pub fn unregister(&self, tab: TabId) {
        if let Some(mut entry) = self.tabs.get_mut(&tab) {
            entry.connection = None;
        }
    }

    pub fn has_receiver(&self, tab: TabId) -> bool {
        self.tabs
            .get(&tab)
            .is_some_and(|entry| entry.connection.is_some())
    }

    /// Subscribe to notices posted by page agents.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<RuntimeNotice> {
        self.notices.subscribe()
    }

    fn tab_info(&self, tab: TabId) -> Option<TabInfo> {
        self.tabs.get(&tab).map(|entry| TabInfo::new(tab, entry.url.clone()))
    }
}

impl Default for LocalBrowser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabMessenger for LocalBrowser {
    async fn send(
        &self,
        tab: TabId,
        request: AgentRequest,
    ) -> Result<GenerationResult, TransportError> {
        // Clone the connection out so no map guard is held across the await.
        let connection = {
            let entry = self.tabs.get(&tab).ok_or(TransportError::TabNotFound(tab))?;
            entry.connection.clone()
        };
        let connection = connection.ok_or(TransportError::NoReceiver(tab))?;
        connection.request(request).await
    }
}

#[async_trait]
impl TabHost for LocalBrowser {
    async fn active_tab(&self) -> Result<Option<TabInfo>, TransportError> {
        let active = *self.active.read();
        Ok(active.and_then(|tab| self.tab_info(tab)))
    }

    async fn inject_agent(&self, tab: TabId) -> Result<(), TransportError> {
        let info = self.tab_info(tab).ok_or(TransportError::TabNotFound(tab))?;
        let injector = self
            .injector
            .as_ref()
            .ok_or_else(|| TransportError::InjectionFailed("no agent injector configured".to_string()))?;

        let handler = injector.inject(&info, Arc::new(self.notices.clone())).await?;
        self.register(tab, handler)?;
        info!(tab, url = %info.url, "Page agent injected");
        Ok(())
    }
}
