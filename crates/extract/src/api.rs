use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{ExtractConfig, ExtractError, ExtractionRequest, ExtractionService};

/// Extractor backed by an OpenAI-compatible `chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsExtractor {
    client: reqwest::Client,
    cfg: ExtractConfig,
}

impl ChatCompletionsExtractor {
    pub fn new(cfg: ExtractConfig) -> Result<Self, ExtractError> {
        cfg.validate()?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .build()
            .map_err(|e| ExtractError::InvalidConfig(format!("http client: {e}")))?;
        Ok(Self { client, cfg })
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.cfg
    }
}

pub(crate) fn build_payload(cfg: &ExtractConfig, request: &ExtractionRequest) -> Value {
    let mut messages = Vec::with_capacity(request.examples.len() * 2 + 2);
    messages.push(json!({ "role": "system", "content": request.instructions }));
    for turn in &request.examples {
        messages.push(json!({ "role": "user", "content": turn.user }));
        messages.push(json!({ "role": "assistant", "content": turn.assistant }));
    }
    messages.push(json!({ "role": "user", "content": request.raw_text }));

    let mut payload = json!({
        "model": cfg.model,
        "temperature": cfg.temperature,
        "messages": messages,
    });
    if cfg.json_mode {
        payload["response_format"] = json!({ "type": "json_object" });
    }
    payload
}

/// Pulls `choices[0].message.content` out of a completion envelope.
pub(crate) fn completion_content(envelope: &Value) -> Result<String, ExtractError> {
    envelope
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ExtractError::MalformedResponse("completion has no choices[0].message.content".into())
        })
}

#[async_trait]
impl ExtractionService for ChatCompletionsExtractor {
    async fn complete(&self, request: &ExtractionRequest) -> Result<String, ExtractError> {
        let payload = build_payload(&self.cfg, request);
        let mut call = self.client.post(&self.cfg.api_url).json(&payload);
        if let Some(key) = self.cfg.api_key.as_deref() {
            call = call.bearer_auth(key);
        }

        let response = call
            .send()
            .await
            .map_err(|e| ExtractError::Request(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "extract.http_error");
            return Err(ExtractError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|e| ExtractError::MalformedResponse(format!("invalid JSON envelope: {e}")))?;
        let content = completion_content(&envelope)?;
        debug!(model = %self.cfg.model, "extract.completion_received");
        Ok(content)
    }
}
