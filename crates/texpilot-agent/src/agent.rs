//! The page agent.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use texpilot_config::AgentConfig;
use texpilot_protocols::document::{DocumentEvent, HostDocument};
use texpilot_protocols::error::RelayClientError;
use texpilot_protocols::message::{AgentRequest, GenerationResult, RuntimeNotice};
use texpilot_protocols::relay::RelayClient;
use texpilot_protocols::transport::{MessageHandler, RuntimeNotifier};

use crate::caret::CaretTracker;
use crate::error::AgentError;
use crate::wait::{WaitError, wait_for_element};

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;

/// Agent living in one editor page.
///
/// Tracks the caret from the document's selection-change events and serves
/// `generateLatex` requests. Only one request runs at a time; a request
/// arriving while another is in flight is rejected with [`AgentError::Busy`].
pub struct PageAgent<D: HostDocument, C> {
    document: Arc<D>,
    relay: C,
    config: AgentConfig,
    caret: CaretTracker<D::Range>,
    busy: AtomicBool,
    shutdown: CancellationToken,
}

/// Clears the busy flag when a request finishes, however it finishes.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<D: HostDocument, C: RelayClient + 'static> PageAgent<D, C> {
    pub fn new(document: Arc<D>, relay: C, config: AgentConfig) -> Self {
        Self {
            document,
            relay,
            config,
            caret: CaretTracker::new(),
            busy: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn document(&self) -> &Arc<D> {
        &self.document
    }

    pub fn caret(&self) -> &CaretTracker<D::Range> {
        &self.caret
    }

    /// Record the document's current selection as the caret snapshot.
    pub fn on_selection_change(&self) {
        if let Some(range) = self.document.current_range() {
            self.caret.record(range);
        }
    }

    /// Start listening for selection changes and announce the agent.
    ///
    /// The listener runs until [`PageAgent::shutdown`] is called or the
    /// document's event stream closes.
    pub fn start(self: &Arc<Self>, notifier: &dyn RuntimeNotifier) -> JoinHandle<()> {
        let mut events = self.document.subscribe();
        let agent = Arc::clone(self);
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = agent.shutdown.cancelled() => break,
                    event = events.recv() => match event {
                        Ok(DocumentEvent::SelectionChange) | Err(RecvError::Lagged(_)) => {
                            agent.on_selection_change();
                        }
                        Ok(DocumentEvent::Mutation) => {}
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            debug!("Selection listener stopped");
        });

        notifier.notify(RuntimeNotice::ContentScriptLoaded);
        info!("Page agent loaded");
        handle
    }

    /// Stop the selection listener and cancel any pending editor wait.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Generate LaTeX for `prompt` and insert it at the last known caret.
    ///
    /// Never fails: every error is reported as a failed [`GenerationResult`].
    pub async fn generate_latex(&self, prompt: &str) -> GenerationResult {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            return GenerationResult::failure(AgentError::Busy.to_string());
        };

        match self.run(prompt).await {
            Ok(code) => {
                info!(chars = code.chars().count(), "LaTeX inserted");
                GenerationResult::success(code)
            }
            Err(e) => {
                error!(error = %e, "LaTeX generation failed");
                GenerationResult::failure(e.to_string())
            }
        }
    }

    async fn run(&self, prompt: &str) -> Result<String, AgentError> {
        let config = &self.config;
        let document = self.document.as_ref();

        wait_for_element(
            document,
            &config.editor_selector,
            Duration::from_millis(config.editor_wait_ms),
            &self.shutdown,
        )
        .await
        .map_err(|e| match e {
            WaitError::Cancelled(selector) => AgentError::Cancelled { selector },
            WaitError::Timeout(selector) | WaitError::DocumentClosed(selector) => {
                AgentError::EditorNotFound { selector }
            }
        })?;

        if !document.exists_within(&config.editor_selector, &config.cursor_selector) {
            return Err(AgentError::CursorNotFound);
        }

        self.relay.health_check().await.map_err(|e| {
            debug!(error = %e, "Relay health check failed");
            AgentError::BackendUnreachable {
                relay_url: config.relay_url.clone(),
            }
        })?;

        let result = self.relay.generate(prompt).await.map_err(|e| match e {
            RelayClientError::Unreachable(_) => AgentError::BackendUnreachable {
                relay_url: config.relay_url.clone(),
            },
            RelayClientError::Status { message, .. } => AgentError::GenerationFailed(message),
            RelayClientError::Decode(message) => AgentError::GenerationFailed(message),
        })?;

        if !result.is_success() {
            let message = result
                .error
                .unwrap_or_else(|| "Failed to generate LaTeX code".to_string());
            return Err(AgentError::GenerationFailed(message));
        }
        let code = result
            .latex_code
            .filter(|code| !code.is_empty())
            .ok_or(AgentError::EmptyResult)?;

        if !document.exists_within(&config.editor_selector, &config.content_selector) {
            return Err(AgentError::ContentNotFound);
        }
        let range = match self.caret.latest() {
            Some(snapshot) => snapshot.into_range(),
            None => document
                .range_at_start_within(&config.editor_selector, &config.content_selector)
                .ok_or(AgentError::ContentNotFound)?,
        };
        document.set_selection(&range)?;
        document.insert_text(&code)?;

        Ok(code)
    }
}

#[async_trait]
impl<D, C> MessageHandler for PageAgent<D, C>
where
    D: HostDocument,
    C: RelayClient + 'static,
{
    async fn handle(&self, request: AgentRequest) -> GenerationResult {
        match request {
            AgentRequest::GenerateLatex { prompt } => self.generate_latex(&prompt).await,
        }
    }

    fn detach(&self) {
        debug!("Page agent detached from its tab");
        self.shutdown();
    }
}
