//! Startup configuration — credentials and model settings from the
//! environment.
//!
//! Loads a `.env` file first (dotenvy), then falls back to the process
//! environment. A missing API key is fatal at startup, not a per-request
//! error — there is nothing useful the app can do without it.

use crate::llm::RequestSettings;

/// System prompt seeded into every fresh conversation.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that can see the user's screen. \
    Analyze the screenshot and provide helpful, accurate answers to the user's questions. \
    Be specific and actionable in your responses. \
    Maintain context from previous interactions in the conversation.";

/// Vision-capable chat model used for every request.
pub const MODEL: &str = "gpt-4o";

/// Sampling temperature for every request.
pub const TEMPERATURE: f32 = 0.7;

/// Answer budget for the CLI surface.
pub const CLI_MAX_OUTPUT_TOKENS: u32 = 1000;

/// Answer budget for the launcher surface.
pub const LAUNCHER_MAX_OUTPUT_TOKENS: u32 = 1500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set — add it to .env or export it")]
    MissingApiKey,
}

/// Resolved startup settings.
pub struct Settings {
    pub api_key: String,
    pub disable_ssl_verify: bool,
}

impl Settings {
    /// Load settings from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine — the variables may be exported.
        let _ = dotenvy::dotenv();

        let api_key = match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Err(ConfigError::MissingApiKey),
        };

        let disable_ssl_verify = std::env::var("DISABLE_SSL_VERIFY")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if disable_ssl_verify {
            log::warn!("[CONFIG] SSL certificate verification is DISABLED");
        }

        Ok(Self {
            api_key,
            disable_ssl_verify,
        })
    }

    /// Request settings for the CLI surface.
    pub fn cli_request(&self) -> RequestSettings {
        RequestSettings {
            model: MODEL.to_string(),
            max_output_tokens: CLI_MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    /// Request settings for the launcher surface.
    pub fn launcher_request(&self) -> RequestSettings {
        RequestSettings {
            model: MODEL.to_string(),
            max_output_tokens: LAUNCHER_MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}
