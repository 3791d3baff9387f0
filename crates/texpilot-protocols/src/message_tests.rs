    use super::*;

    #[test]
    fn test_generation_request_blank() {
        assert!(GenerationRequest::new("").is_blank());
        assert!(GenerationRequest::new("  \n\t ").is_blank());
        assert!(!GenerationRequest::new("integral of x^2").is_blank());
    }

    #[test]
    fn test_success_result_wire_format() {
        let result = GenerationResult::success("\\int x^2 \\, dx");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["latexCode"], "\\int x^2 \\, dx");
        assert!(json.get("error").is_none());
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_failure_result_wire_format() {
        let result = GenerationResult::failure("Prompt is required");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Prompt is required");
        assert!(json.get("latexCode").is_none());
    }

    #[test]
    fn test_failure_with_details() {
        let result = GenerationResult::failure("boom").with_details("stack");
        assert_eq!(result.details.as_deref(), Some("stack"));
        assert!(!result.is_success());
    }

    #[test]
    fn test_result_missing_success_flag_is_failure() {
        let result: GenerationResult =
            serde_json::from_str(r#"{"latexCode": "x"}"#).unwrap();
        assert!(!result.is_success());
        assert_eq!(result.latex_code(), Some("x"));
    }

    #[test]
    fn test_agent_request_wire_format() {
        let request = AgentRequest::generate_latex("sum of squares");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["action"], "generateLatex");
        assert_eq!(json["prompt"], "sum of squares");

        let parsed: AgentRequest =
            serde_json::from_str(r#"{"action":"generateLatex","prompt":"p"}"#).unwrap();
        assert_eq!(parsed, AgentRequest::generate_latex("p"));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let parsed = serde_json::from_str::<AgentRequest>(r#"{"action":"reload"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_runtime_notice_wire_format() {
        let json = serde_json::to_string(&RuntimeNotice::ContentScriptLoaded).unwrap();
        assert_eq!(json, r#"{"action":"contentScriptLoaded"}"#);
    }

    #[test]
    fn test_health_response() {
        let json = serde_json::to_value(HealthResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }
