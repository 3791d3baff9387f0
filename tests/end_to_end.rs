//! Popup to page agent to relay to completion API, all in one process.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use texpilot_agent::{HttpRelayClient, MemoryDocument, PageAgent, TextRange};
use texpilot_channel_local::{AgentInjector, LocalBrowser};
use texpilot_config::{AgentConfig, PopupConfig};
use texpilot_popup::{PopupController, PopupState, StatusBoard, StatusKind};
use texpilot_protocols::error::TransportError;
use texpilot_protocols::message::RuntimeNotice;
use texpilot_protocols::provider::CompletionProvider;
use texpilot_protocols::transport::{MessageHandler, RuntimeNotifier, TabHost, TabInfo};
use texpilot_provider_openai::OpenAIProvider;
use texpilot_relay::{RelayServer, RelayServerConfig, RelayState};

const INTEGRAL: &str = "\\int_0^1 x^2\\,dx = \\frac{1}{3}";
const PROJECT: &str = "https://www.overleaf.com/project/64b0c1";

/// A running relay plus the mocked completion API behind it.
struct Stack {
    upstream: MockServer,
    relay_url: String,
    stop: Option<oneshot::Sender<()>>,
}

impl Stack {
    async fn start() -> Self {
        let upstream = MockServer::start().await;
        let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAIProvider::with_url(
            "sk-test".to_string(),
            format!("{}/v1/chat/completions", upstream.uri()),
        ));
        let state = Arc::new(RelayState::new(Some(provider), "gpt-3.5-turbo"));
        let server = RelayServer::new(RelayServerConfig::default(), state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let relay_url = format!("http://{}", listener.local_addr().unwrap());
        let (stop, stopped) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = server
                .serve(listener, async {
                    let _ = stopped.await;
                })
                .await;
        });

        Self {
            upstream,
            relay_url,
            stop: Some(stop),
        }
    }

    async fn expect_completion(&self, content: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "gpt-3.5-turbo"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "model": "gpt-3.5-turbo",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }]
            })))
            .expect(times)
            .mount(&self.upstream)
            .await;
    }

    fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            relay_url: self.relay_url.clone(),
            ..Default::default()
        }
    }
}

impl Drop for Stack {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

/// Loads a [`PageAgent`] over a shared in-memory editor page.
struct PageInjector {
    document: Arc<MemoryDocument>,
    config: AgentConfig,
}

#[async_trait]
impl AgentInjector for PageInjector {
    async fn inject(
        &self,
        _tab: &TabInfo,
        notifier: Arc<dyn RuntimeNotifier>,
    ) -> Result<Arc<dyn MessageHandler>, TransportError> {
        let relay = HttpRelayClient::new(self.config.relay_url.clone());
        let agent = Arc::new(PageAgent::new(
            self.document.clone(),
            relay,
            self.config.clone(),
        ));
        agent.start(notifier.as_ref());
        Ok(agent)
    }
}

fn browser_for(stack: &Stack, document: &Arc<MemoryDocument>) -> Arc<LocalBrowser> {
    Arc::new(LocalBrowser::with_injector(Arc::new(PageInjector {
        document: document.clone(),
        config: stack.agent_config(),
    })))
}

fn popup_for(browser: &Arc<LocalBrowser>, board: &Arc<StatusBoard>) -> PopupController {
    let config = PopupConfig {
        settle_delay_ms: 50,
        ..Default::default()
    };
    PopupController::new(browser.clone(), board.clone(), config)
}

#[tokio::test]
async fn test_integral_prompt_is_inserted_at_caret() {
    let stack = Stack::start().await;
    stack.expect_completion(&format!("  {}\n", INTEGRAL), 1).await;

    let document = Arc::new(MemoryDocument::with_editor("We have  here."));
    let browser = browser_for(&stack, &document);
    let tab = browser.open_tab(PROJECT);
    browser.inject_agent(tab).await.unwrap();

    // The user clicks between the two spaces before opening the popup.
    document.select(TextRange::collapsed(8));
    tokio::time::sleep(Duration::from_millis(20)).await;

    let board = Arc::new(StatusBoard::new());
    let popup = popup_for(&browser, &board);
    let message = popup.submit("integral of x squared from 0 to 1").await;

    assert_eq!(message.kind, StatusKind::Success, "{}", message.text);
    assert_eq!(message.text, "LaTeX code generated and inserted successfully!");
    assert_eq!(board.current(), Some(message));
    assert_eq!(popup.state(), PopupState::Succeeded);
    assert_eq!(document.text(), format!("We have {} here.", INTEGRAL));
    assert_eq!(document.insert_count(), 1);
}

#[tokio::test]
async fn test_agent_is_injected_once_and_resent() {
    let stack = Stack::start().await;
    stack.expect_completion("\\alpha", 1).await;

    let document = Arc::new(MemoryDocument::with_editor(""));
    let browser = browser_for(&stack, &document);
    let mut notices = browser.subscribe_notices();
    let tab = browser.open_tab(PROJECT);
    assert!(!browser.has_receiver(tab));

    let board = Arc::new(StatusBoard::new());
    let popup = popup_for(&browser, &board);
    let message = popup.submit("greek letter alpha").await;

    assert_eq!(message.kind, StatusKind::Success, "{}", message.text);
    assert!(browser.has_receiver(tab));
    assert_eq!(document.text(), "\\alpha");
    assert_eq!(notices.recv().await.unwrap(), RuntimeNotice::ContentScriptLoaded);
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_wrong_site_never_reaches_the_relay() {
    let stack = Stack::start().await;
    stack.expect_completion("unused", 0).await;

    let document = Arc::new(MemoryDocument::with_editor("text"));
    let browser = browser_for(&stack, &document);
    browser.open_tab("https://example.com/");

    let board = Arc::new(StatusBoard::new());
    let popup = popup_for(&browser, &board);
    let message = popup.submit("integral").await;

    assert_eq!(message.text, "Error: Please open an Overleaf document first");
    assert_eq!(document.text(), "text");
    assert_eq!(browser.active_tab().await.unwrap().map(|t| t.url), Some("https://example.com/".to_string()));
}

#[tokio::test]
async fn test_upstream_failure_reaches_the_popup() {
    let stack = Stack::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&stack.upstream)
        .await;

    let document = Arc::new(MemoryDocument::with_editor("text"));
    let browser = browser_for(&stack, &document);
    let tab = browser.open_tab(PROJECT);
    browser.inject_agent(tab).await.unwrap();

    let board = Arc::new(StatusBoard::new());
    let popup = popup_for(&browser, &board);
    let message = popup.submit("anything").await;

    assert_eq!(message.text, "Error: OpenAI API Error: 401 invalid api key");
    assert_eq!(popup.state(), PopupState::Failed);
    assert_eq!(document.text(), "text");
}

#[tokio::test]
async fn test_relay_down_is_reported() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let relay_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let document = Arc::new(MemoryDocument::with_editor(""));
    let config = AgentConfig {
        relay_url: relay_url.clone(),
        ..Default::default()
    };
    let agent = PageAgent::new(document.clone(), HttpRelayClient::new(relay_url.clone()), config);

    let result = agent.generate_latex("x").await;
    assert_eq!(
        result.error(),
        Some(
            format!(
                "Could not connect to backend server. Please make sure it is running on {}",
                relay_url
            )
            .as_str()
        )
    );
    assert_eq!(document.insert_count(), 0);
}
