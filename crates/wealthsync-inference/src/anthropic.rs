//! Anthropic Messages API backend.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use wealthsync_core::{defaults, Error, Result};

/// Configuration for the Anthropic backend.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    /// Fixed output-token ceiling applied to every call.
    pub max_tokens: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: defaults::ANTHROPIC_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_seconds: defaults::CHAT_TIMEOUT_SECS,
            max_tokens: defaults::ANTHROPIC_MAX_TOKENS,
        }
    }
}

/// Anthropic chat backend.
pub struct AnthropicBackend {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicBackend {
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "anthropic",
            base_url = %config.base_url,
            "Initializing Anthropic backend"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    /// One chat turn against the Messages API.
    pub async fn chat(&self, model: &str, system: &str, message: &str) -> Result<String> {
        debug!(
            subsystem = "inference",
            component = "anthropic",
            op = "chat",
            model = model,
            "Dispatching messages call"
        );

        let request = MessagesRequest {
            model: model.to_string(),
            max_tokens: self.config.max_tokens,
            system: (!system.is_empty()).then(|| system.to_string()),
            messages: vec![MessageParam {
                role: "user".to_string(),
                content: message.to_string(),
            }],
        };

        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", defaults::ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::provider("anthropic", format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<AnthropicErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::provider(
                "anthropic",
                format!("API returned {}: {}", status.as_u16(), message),
            ));
        }

        let result: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::provider("anthropic", format!("failed to parse response: {}", e)))?;

        let text = result
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        debug!(
            subsystem = "inference",
            component = "anthropic",
            op = "chat",
            model = model,
            response_len = text.len(),
            "Messages call finished"
        );
        Ok(text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<MessageParam>,
}

#[derive(Debug, Serialize)]
pub struct MessageParam {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub block_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnthropicErrorResponse {
    pub error: AnthropicError,
}

#[derive(Debug, Deserialize)]
pub struct AnthropicError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_carry_token_ceiling() {
        let config = AnthropicConfig::new("sk-ant-test");
        assert_eq!(config.max_tokens, defaults::ANTHROPIC_MAX_TOKENS);
        assert_eq!(config.base_url, defaults::ANTHROPIC_BASE_URL);
    }

    #[test]
    fn request_serializes_max_tokens_and_system() {
        let request = MessagesRequest {
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1024,
            system: Some("You are an analyst.".to_string()),
            messages: vec![MessageParam {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"max_tokens\":1024"));
        assert!(json.contains("\"system\":\"You are an analyst.\""));
    }

    #[test]
    fn request_omits_empty_system() {
        let request = MessagesRequest {
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1024,
            system: None,
            messages: vec![],
        };
        assert!(!serde_json::to_string(&request).unwrap().contains("system"));
    }

    #[test]
    fn response_concatenates_text_blocks() {
        let json = r#"{
            "id": "msg_01",
            "content": [
                {"type": "text", "text": "Part one. "},
                {"type": "text", "text": "Part two."}
            ]
        }"#;

        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        let text: String = response
            .content
            .iter()
            .filter_map(|b| b.text.as_deref())
            .collect();
        assert_eq!(text, "Part one. Part two.");
        assert_eq!(response.content[0].block_type.as_deref(), Some("text"));
    }

    #[test]
    fn error_envelope_deserializes() {
        let json = r#"{"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}"#;
        let response: AnthropicErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.message, "Overloaded");
        assert_eq!(response.error.error_type.as_deref(), Some("overloaded_error"));
    }
}
