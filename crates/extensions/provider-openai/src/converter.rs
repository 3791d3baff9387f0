//! Message conversion for the OpenAI API.

use texpilot_protocols::provider::{ChatMessage, ChatRole, CompletionRequest};

use crate::api::{ApiMessage, ApiRequest};

/// Convert a protocol request to OpenAI API format.
pub fn convert_request(request: &CompletionRequest) -> ApiRequest {
    ApiRequest {
        model: request.model.clone(),
        messages: request.messages.iter().map(convert_message).collect(),
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

fn convert_message(msg: &ChatMessage) -> ApiMessage {
    let role = match msg.role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    };

    ApiMessage {
        role: role.to_string(),
        content: msg.content.clone(),
    }
}
