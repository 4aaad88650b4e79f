//! Remote model domain — the request/response channel to the LLM API.
//!
//! The rest of the app talks to `ModelClient` only. The endpoint is
//! stateless: the full transcript is retransmitted on every call, so the
//! conversation store is the single source of conversational memory.

mod openai;

pub use openai::OpenAiClient;

use crate::conversation::Turn;
use async_trait::async_trait;

/// Per-request knobs. Fixed per surface; not user-tunable at runtime.
#[derive(Debug, Clone)]
pub struct RequestSettings {
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// Opaque channel to the remote model.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send the full ordered history and return the assistant's reply text.
    async fn send(&self, history: &[Turn], request: &RequestSettings)
        -> Result<String, ModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
}
