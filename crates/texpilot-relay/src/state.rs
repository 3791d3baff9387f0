//! Shared relay state.

use std::sync::Arc;

use texpilot_protocols::provider::CompletionProvider;

/// State shared by the relay handlers. Nothing in here changes between
/// requests.
pub struct RelayState {
    provider: Option<Arc<dyn CompletionProvider>>,
    model: String,
}

impl RelayState {
    /// A provider without a usable credential counts as missing.
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.filter(|p| p.has_credential()),
            model: model.into(),
        }
    }

    /// State for a relay started without a credential.
    pub fn unconfigured(model: impl Into<String>) -> Self {
        Self::new(None, model)
    }

    pub fn provider(&self) -> Option<&Arc<dyn CompletionProvider>> {
        self.provider.as_ref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }
}
