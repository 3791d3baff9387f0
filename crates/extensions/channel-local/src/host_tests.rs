    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use tokio::sync::Notify;

    use texpilot_protocols::transport::RuntimeNotifier;

    const PAGE: &str = "https://www.overleaf.com/project/1";

    struct EchoHandler;

    #[async_trait]
    impl MessageHandler for EchoHandler {
        async fn handle(&self, request: AgentRequest) -> GenerationResult {
            match request {
                AgentRequest::GenerateLatex { prompt } => GenerationResult::success(format!("%{}", prompt)),
            }
        }
    }

    struct PanickingHandler;

    #[async_trait]
    impl MessageHandler for PanickingHandler {
        async fn handle(&self, _request: AgentRequest) -> GenerationResult {
            panic!("agent crashed");
        }
    }

    /// Records when the tab lets go of it.
    #[derive(Default)]
    struct DetachTracking {
        detached: Notify,
        detach_count: AtomicUsize,
    }

    impl DetachTracking {
        async fn wait_detached(&self) {
            tokio::time::timeout(Duration::from_secs(1), self.detached.notified())
                .await
                .expect("handler was not detached");
        }
    }

    #[async_trait]
    impl MessageHandler for DetachTracking {
        async fn handle(&self, _request: AgentRequest) -> GenerationResult {
            GenerationResult::success("ok")
        }

        fn detach(&self) {
            self.detach_count.fetch_add(1, Ordering::SeqCst);
            self.detached.notify_one();
        }
    }

    #[derive(Default)]
    struct CountingInjector {
        injected: AtomicUsize,
    }

    #[async_trait]
    impl AgentInjector for CountingInjector {
        async fn inject(
            &self,
            _tab: &TabInfo,
            notifier: Arc<dyn RuntimeNotifier>,
        ) -> Result<Arc<dyn MessageHandler>, TransportError> {
            self.injected.fetch_add(1, Ordering::SeqCst);
            notifier.notify(RuntimeNotice::ContentScriptLoaded);
            Ok(Arc::new(EchoHandler))
        }
    }

    #[tokio::test]
    async fn test_no_tabs() {
        let browser = LocalBrowser::new();
        assert_eq!(browser.active_tab().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_active_tab_follows_open_and_activate() {
        let browser = LocalBrowser::new();
        let first = browser.open_tab(PAGE);
        let second = browser.open_tab("https://example.com/");
        assert_eq!(browser.active_tab().await.unwrap().map(|t| t.id), Some(second));

        browser.activate(first).unwrap();
        assert_eq!(
            browser.active_tab().await.unwrap(),
            Some(TabInfo::new(first, PAGE))
        );

        browser.close_tab(first);
        assert_eq!(browser.active_tab().await.unwrap(), None);
        assert!(matches!(browser.activate(first), Err(TransportError::TabNotFound(_))));
    }

    #[tokio::test]
    async fn test_send_to_unknown_tab() {
        let browser = LocalBrowser::new();
        let err = browser
            .send(99, AgentRequest::generate_latex("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::TabNotFound(99)));
    }

    #[tokio::test]
    async fn test_send_without_receiver() {
        let browser = LocalBrowser::new();
        let tab = browser.open_tab(PAGE);
        let err = browser
            .send(tab, AgentRequest::generate_latex("x"))
            .await
            .unwrap_err();
        assert!(err.is_missing_receiver());
    }

    #[tokio::test]
    async fn test_send_to_registered_receiver() {
        let browser = LocalBrowser::new();
        let tab = browser.open_tab(PAGE);
        browser.register(tab, Arc::new(EchoHandler)).unwrap();
        assert!(browser.has_receiver(tab));

        let result = browser
            .send(tab, AgentRequest::generate_latex("hello"))
            .await
            .unwrap();
        assert_eq!(result.latex_code(), Some("%hello"));

        browser.unregister(tab);
        assert!(!browser.has_receiver(tab));
    }

    #[tokio::test]
    async fn test_dropped_reply_is_disconnected() {
        let browser = LocalBrowser::new();
        let tab = browser.open_tab(PAGE);
        browser.register(tab, Arc::new(PanickingHandler)).unwrap();

        let err = browser
            .send(tab, AgentRequest::generate_latex("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Disconnected));
    }

    #[tokio::test]
    async fn test_inject_without_injector() {
        let browser = LocalBrowser::new();
        let tab = browser.open_tab(PAGE);
        let err = browser.inject_agent(tab).await.unwrap_err();
        assert!(matches!(err, TransportError::InjectionFailed(_)));
    }

    #[tokio::test]
    async fn test_inject_registers_and_announces() {
        let injector = Arc::new(CountingInjector::default());
        let browser = LocalBrowser::with_injector(injector.clone());
        let mut notices = browser.subscribe_notices();
        let tab = browser.open_tab(PAGE);

        browser.inject_agent(tab).await.unwrap();
        assert!(browser.has_receiver(tab));
        assert_eq!(injector.injected.load(Ordering::SeqCst), 1);
        assert_eq!(notices.recv().await.unwrap(), RuntimeNotice::ContentScriptLoaded);
        assert!(notices.try_recv().is_err());

        let result = browser
            .send(tab, AgentRequest::generate_latex("ok"))
            .await
            .unwrap();
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_inject_into_unknown_tab() {
        let browser = LocalBrowser::with_injector(Arc::new(CountingInjector::default()));
        let err = browser.inject_agent(5).await.unwrap_err();
        assert!(matches!(err, TransportError::TabNotFound(5)));
    }

    #[tokio::test]
    async fn test_replaced_receiver_is_detached() {
        let browser = LocalBrowser::new();
        let tab = browser.open_tab(PAGE);
        let first = Arc::new(DetachTracking::default());
        let second = Arc::new(DetachTracking::default());

        browser.register(tab, first.clone()).unwrap();
        browser.register(tab, second.clone()).unwrap();

        first.wait_detached().await;
        assert_eq!(first.detach_count.load(Ordering::SeqCst), 1);
        assert_eq!(second.detach_count.load(Ordering::SeqCst), 0);

        let result = browser
            .send(tab, AgentRequest::generate_latex("x"))
            .await
            .unwrap();
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_unregister_detaches_receiver() {
        let browser = LocalBrowser::new();
        let tab = browser.open_tab(PAGE);
        let handler = Arc::new(DetachTracking::default());
        browser.register(tab, handler.clone()).unwrap();

        browser.unregister(tab);
        handler.wait_detached().await;
    }

    #[tokio::test]
    async fn test_close_tab_detaches_receiver() {
        let browser = LocalBrowser::new();
        let tab = browser.open_tab(PAGE);
        let handler = Arc::new(DetachTracking::default());
        browser.register(tab, handler.clone()).unwrap();

        browser.close_tab(tab);
        handler.wait_detached().await;
        assert_eq!(handler.detach_count.load(Ordering::SeqCst), 1);
    }
