use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    core::{request::GenerationRequest, service::GenerationService},
    error::{PlannerError, Result},
};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// OpenAI-compatible chat-completions client, OpenRouter by default.
#[derive(Clone, Debug)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    max_tokens: Option<u32>,
}

impl OpenRouterClient {
    pub fn new(model: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| PlannerError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            max_tokens: None,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// POST one chat-completions body. No retries.
    pub async fn chat_completion(&self, api_key: &str, body: &Value) -> Result<Value> {
        let request_url = build_chat_url(&self.base_url);

        let response = self
            .http
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", "https://github.com/trip-planner/trip-planner")
            .header("X-Title", "trip-planner")
            .json(body)
            .send()
            .await
            .map_err(|err| PlannerError::Transport(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| PlannerError::Transport(format!("Failed to read response: {err}")))?;

        debug!(%status, body_len = response_text.len(), "Chat completion returned");

        let response_json: Option<Value> = serde_json::from_str(&response_text).ok();

        if !status.is_success() {
            let api_message = response_json
                .as_ref()
                .and_then(|json| json.get("error"))
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or(response_text);

            return Err(PlannerError::Transport(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        let response_json = response_json.ok_or_else(|| {
            PlannerError::Transport("Chat completion response is not valid JSON".to_string())
        })?;

        if let Some(error) = response_json.get("error") {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(PlannerError::Transport(format!("API error: {}", error_message)));
        }

        Ok(response_json)
    }
}

#[async_trait]
impl GenerationService for OpenRouterClient {
    async fn generate(&self, api_key: &str, request: &GenerationRequest) -> Result<String> {
        let body = ChatCompletionRequest::from_generation(&self.model, request)
            .with_max_tokens(self.max_tokens)
            .into_value();

        let response = self.chat_completion(api_key, &body).await?;
        Ok(extract_message_text(&response))
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

/// Text of the first choice. Content may be a plain string or a list of
/// text parts; anything else counts as no text.
fn extract_message_text(response: &Value) -> String {
    let content = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"));

    match content {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    }
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    max_tokens: Option<u32>,
    response_format: Option<Value>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            response_format: None,
        }
    }

    /// System message, user message (text plus optional image part) and a
    /// `json_schema` response format built from the request schema.
    pub fn from_generation(model: &str, request: &GenerationRequest) -> Self {
        let user_content = match &request.image {
            Some(image) => json!([
                { "type": "text", "text": request.user_prompt },
                { "type": "image_url", "image_url": { "url": image.to_data_url() } }
            ]),
            None => json!(request.user_prompt),
        };

        let messages = vec![
            json!({ "role": "system", "content": request.system_instruction }),
            json!({ "role": "user", "content": user_content }),
        ];

        Self::new(model, messages).with_response_format(json!({
            "type": "json_schema",
            "json_schema": {
                "name": request.schema.schema_name(),
                "strict": false,
                "schema": request.schema.wire_schema(),
            }
        }))
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_response_format(mut self, response_format: Value) -> Self {
        self.response_format = Some(response_format);
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        if let Some(response_format) = self.response_format {
            body["response_format"] = response_format;
        }

        body
    }
}
