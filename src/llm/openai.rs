//! OpenAI chat-completions client.
//!
//! User turns that carry a screenshot are sent as multi-part content:
//! a text part plus an `image_url` part holding a base64 JPEG data URL
//! with `detail: "high"`.

use super::{ModelClient, ModelError, RequestSettings};
use crate::config::Settings;
use crate::conversation::{ContentPart, Turn, TurnContent};
use async_trait::async_trait;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
}

impl OpenAiClient {
    /// Build a client from startup settings.
    ///
    /// `disable_ssl_verify` maps to accepting invalid certificates.
    pub fn new(settings: &Settings) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(settings.disable_ssl_verify)
            .build()
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn send(
        &self,
        history: &[Turn],
        request: &RequestSettings,
    ) -> Result<String, ModelError> {
        let start = std::time::Instant::now();
        log::info!(
            "[LLM] Model: {} — sending {} turns",
            request.model,
            history.len()
        );

        let response = self
            .http
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": request.model,
                "messages": history_to_wire(history),
                "max_tokens": request.max_output_tokens,
                "temperature": request.temperature,
            }))
            .send()
            .await
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[LLM] API returned {}: {}", status, body);
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ModelError::MalformedResponse(e.to_string()))?;

        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());

        parse_answer(&body)
    }
}

/// Serialize the transcript into the chat-completions `messages` array.
fn history_to_wire(history: &[Turn]) -> Vec<serde_json::Value> {
    history.iter().map(turn_to_wire).collect()
}

fn turn_to_wire(turn: &Turn) -> serde_json::Value {
    let content = match &turn.content {
        TurnContent::Text(text) => serde_json::Value::String(text.clone()),
        TurnContent::Parts(parts) => serde_json::Value::Array(
            parts
                .iter()
                .map(|part| match part {
                    ContentPart::Text(text) => serde_json::json!({
                        "type": "text",
                        "text": text,
                    }),
                    ContentPart::Image(attachment) => serde_json::json!({
                        "type": "image_url",
                        "image_url": {
                            "url": attachment.to_data_url(),
                            "detail": "high",
                        },
                    }),
                })
                .collect(),
        ),
    };

    serde_json::json!({
        "role": turn.role.as_str(),
        "content": content,
    })
}

/// Pull the answer text out of a chat-completions response body.
fn parse_answer(body: &serde_json::Value) -> Result<String, ModelError> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| {
            log::warn!("[LLM] Unexpected response shape: {}", body);
            ModelError::MalformedResponse("no answer text in response body".to_string())
        })
}
