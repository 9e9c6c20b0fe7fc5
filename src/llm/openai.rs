use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::llm::{
    models::{ChatOptions, ChatResponse, Message, ToolCall, Usage},
    LlmError, LlmProvider,
};

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: String, default_model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            default_model,
        }
    }

    fn request_body(&self, messages: &[Message], options: &ChatOptions) -> serde_json::Value {
        let model = options.model.as_deref().unwrap_or(&self.default_model);

        let mut body = json!({
            "model": model,
            "messages": messages,
            "temperature": options.temperature.unwrap_or(0.7),
            "max_tokens": options.max_tokens.unwrap_or(4096),
        });

        if !options.tools.is_empty() {
            body["tools"] = json!(options.tools);
            body["tool_choice"] = json!("auto");
        }

        body
    }
}

/// Pulls the first choice out of a chat-completions payload.
pub(crate) fn parse_completion(
    json: &serde_json::Value,
    model: &str,
) -> Result<ChatResponse, LlmError> {
    let message = json["choices"][0]
        .get("message")
        .ok_or_else(|| LlmError::InvalidResponse("missing choices[0].message".to_string()))?;

    let tool_calls: Vec<ToolCall> = match message.get("tool_calls") {
        Some(calls) if !calls.is_null() => serde_json::from_value(calls.clone())
            .map_err(|e| LlmError::InvalidResponse(format!("malformed tool_calls: {}", e)))?,
        _ => Vec::new(),
    };

    let content = message["content"].as_str().unwrap_or_default().to_string();

    if content.is_empty() && tool_calls.is_empty() && !message["content"].is_string() {
        return Err(LlmError::InvalidResponse(
            "message has neither content nor tool_calls".to_string(),
        ));
    }

    let usage = json.get("usage").map(|u| Usage {
        input_tokens: token_count(&u["prompt_tokens"]),
        output_tokens: token_count(&u["completion_tokens"]),
    });

    Ok(ChatResponse {
        content,
        tool_calls,
        model: json["model"].as_str().unwrap_or(model).to_string(),
        usage,
    })
}

fn token_count(value: &serde_json::Value) -> u32 {
    value
        .as_u64()
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn chat(&self, messages: &[Message], options: ChatOptions) -> Result<ChatResponse, LlmError> {
        let model = options
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());
        let body = self.request_body(messages, &options);

        debug!(
            model = %model,
            messages = messages.len(),
            tools = options.tools.len(),
            "OpenAI chat request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(LlmError::RateLimited);
            }
            return Err(LlmError::Api(format!("OpenAI Error {}: {}", status, text)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        parse_completion(&json, &model)
    }
}
