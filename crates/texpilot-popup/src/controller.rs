//! Popup controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use texpilot_config::PopupConfig;
use texpilot_protocols::message::{AgentRequest, GenerationResult};
use texpilot_protocols::transport::{TabHost, TabId};

use crate::error::PopupError;
use crate::site::is_host_site;
use crate::status::{StatusMessage, StatusSink};

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;

const SUCCESS_TEXT: &str = "LaTeX code generated and inserted successfully!";

/// Where the popup is in handling a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Idle,
    AwaitingResponse,
    Succeeded,
    Failed,
}

/// Marks a submission in flight; a dropped submission counts as failed.
struct InFlight<'a> {
    state: &'a Mutex<PopupState>,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a Mutex<PopupState>) -> Result<Self, PopupError> {
        let mut current = state.lock();
        if *current == PopupState::AwaitingResponse {
            return Err(PopupError::Busy);
        }
        *current = PopupState::AwaitingResponse;
        Ok(Self { state })
    }

    fn finish(self, succeeded: bool) {
        *self.state.lock() = if succeeded {
            PopupState::Succeeded
        } else {
            PopupState::Failed
        };
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut current = self.state.lock();
        if *current == PopupState::AwaitingResponse {
            *current = PopupState::Failed;
        }
    }
}

/// Drives one popup: validates the prompt, forwards it to the page agent in
/// the active tab and shows the outcome.
pub struct PopupController {
    host: Arc<dyn TabHost>,
    status: Arc<dyn StatusSink>,
    config: PopupConfig,
    state: Mutex<PopupState>,
    shown: Arc<AtomicU64>,
}

impl PopupController {
    pub fn new(host: Arc<dyn TabHost>, status: Arc<dyn StatusSink>, config: PopupConfig) -> Self {
        Self {
            host,
            status,
            config,
            state: Mutex::new(PopupState::Idle),
            shown: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn state(&self) -> PopupState {
        *self.state.lock()
    }

    /// Handle a click on the generate button.
    ///
    /// The returned message is also shown through the status sink and cleared
    /// after the configured display time.
    pub async fn submit(&self, prompt: &str) -> StatusMessage {
        let message = match self.try_submit(prompt).await {
            Ok(()) => StatusMessage::success(SUCCESS_TEXT),
            Err(e) => {
                warn!(error = %e, "Submission failed");
                StatusMessage::error(e.status_text())
            }
        };
        self.show_status(message.clone());
        message
    }

    async fn try_submit(&self, prompt: &str) -> Result<(), PopupError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(PopupError::EmptyPrompt);
        }

        let in_flight = InFlight::begin(&self.state)?;
        let outcome = self.forward(prompt).await;
        in_flight.finish(outcome.is_ok());
        outcome
    }

    async fn forward(&self, prompt: &str) -> Result<(), PopupError> {
        let tab = self.host.active_tab().await?.ok_or(PopupError::NoActiveTab)?;
        debug!(tab = tab.id, url = %tab.url, "Active tab");

        if !is_host_site(&tab.url, &self.config.host_domain) {
            return Err(PopupError::WrongSite);
        }

        let result = self.deliver(tab.id, AgentRequest::generate_latex(prompt)).await?;
        if result.is_success() {
            info!(tab = tab.id, "LaTeX inserted");
            Ok(())
        } else {
            let message = result.error.unwrap_or_else(|| "Unknown error".to_string());
            Err(PopupError::Agent(message))
        }
    }

    /// Send `request`, loading the agent and resending once if nothing
    /// receives it.
    async fn deliver(
        &self,
        tab: TabId,
        request: AgentRequest,
    ) -> Result<GenerationResult, PopupError> {
        match self.host.send(tab, request.clone()).await {
            Err(e) if e.is_missing_receiver() => {
                info!(tab, "Page agent not loaded, injecting");
                self.host.inject_agent(tab).await?;
                tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;
                Ok(self.host.send(tab, request).await?)
            }
            other => Ok(other?),
        }
    }

    /// Show `message` and clear it later unless a newer one replaced it.
    fn show_status(&self, message: StatusMessage) {
        let seq = self.shown.fetch_add(1, Ordering::SeqCst) + 1;
        self.status.show(&message);

        let shown = Arc::clone(&self.shown);
        let status = Arc::clone(&self.status);
        let display = Duration::from_millis(self.config.status_display_ms);
        tokio::spawn(async move {
            tokio::time::sleep(display).await;
            if shown.load(Ordering::SeqCst) == seq {
                status.clear();
            }
        });
    }
}
