    use super::*;

    #[test]
    fn test_api_request_serialization() {
        let request = ApiRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![
                ApiMessage {
                    role: "system".to_string(),
                    content: "You are a LaTeX expert.".to_string(),
                },
                ApiMessage {
                    role: "user".to_string(),
                    content: "integral of x^2".to_string(),
                },
            ],
            max_tokens: Some(512),
            temperature: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "integral of x^2");
        assert_eq!(json["max_tokens"], 512);
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_api_response_first_text() {
        let json = serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": " \\frac{a}{b} "},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });

        let response: ApiResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.usage.as_ref().unwrap().total_tokens, 15);
        assert_eq!(response.first_text(), Some(" \\frac{a}{b} ".to_string()));
    }

    #[test]
    fn test_api_response_without_choices() {
        let json = serde_json::json!({"id": "chatcmpl-empty", "model": "m", "choices": []});
        let response: ApiResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_api_response_null_content() {
        let json = serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": null},
                "finish_reason": "content_filter"
            }]
        });
        let response: ApiResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.first_text(), None);
    }
