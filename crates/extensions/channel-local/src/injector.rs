//! Page agent injection.

use std::sync::Arc;

use async_trait::async_trait;

use texpilot_protocols::error::TransportError;
use texpilot_protocols::transport::{MessageHandler, RuntimeNotifier, TabInfo};

/// Loads a page agent into a tab.
#[async_trait]
pub trait AgentInjector: Send + Sync {
    /// Build and start the agent for `tab`, returning its message handler.
    ///
    /// `notifier` is the runtime channel the agent announces itself on.
    async fn inject(
        &self,
        tab: &TabInfo,
        notifier: Arc<dyn RuntimeNotifier>,
    ) -> Result<Arc<dyn MessageHandler>, TransportError>;
}
