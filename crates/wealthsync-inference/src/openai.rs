//! OpenAI-compatible chat backend.
//!
//! Serves two provider families: OpenAI itself and Qwen, which is reached
//! through DashScope's OpenAI-compatible endpoint with a different base URL
//! and credential. The vendor tag distinguishes them in errors and logs.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use wealthsync_core::{defaults, Error, Result};

use crate::labels::instruction_role;

/// Configuration for an OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Vendor tag used in error and log output ("openai" or "qwen").
    pub vendor: &'static str,
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl OpenAiConfig {
    /// OpenAI cloud endpoint.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            vendor: "openai",
            base_url: defaults::OPENAI_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_seconds: defaults::CHAT_TIMEOUT_SECS,
        }
    }

    /// DashScope compatible-mode endpoint for Qwen models.
    pub fn dashscope(api_key: impl Into<String>) -> Self {
        Self {
            vendor: "qwen",
            base_url: defaults::DASHSCOPE_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_seconds: defaults::CHAT_TIMEOUT_SECS,
        }
    }
}

/// OpenAI-compatible chat backend.
pub struct OpenAiChatBackend {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiChatBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "openai",
            vendor = config.vendor,
            base_url = %config.base_url,
            "Initializing OpenAI-compatible backend"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// One chat turn. The instruction block's role is chosen from the
    /// model-id prefix table: reasoning-tier models take `developer`.
    pub async fn chat(&self, model: &str, system: &str, message: &str) -> Result<String> {
        debug!(
            subsystem = "inference",
            component = "openai",
            op = "chat",
            vendor = self.config.vendor,
            model = model,
            "Dispatching chat completion"
        );

        let mut messages = Vec::new();
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: instruction_role(model).to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: message.to_string(),
        });

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages,
            stream: false,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::provider(self.config.vendor, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::provider(
                self.config.vendor,
                format!("API returned {}: {}", status.as_u16(), message),
            ));
        }

        let result: ChatCompletionResponse = response.json().await.map_err(|e| {
            Error::provider(self.config.vendor, format!("failed to parse response: {}", e))
        })?;

        let content = result
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!(
            subsystem = "inference",
            component = "openai",
            op = "chat",
            vendor = self.config.vendor,
            model = model,
            response_len = content.len(),
            "Chat completion finished"
        );
        Ok(content)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Request body for the chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: bool,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Response from the chat completions endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error envelope.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_config_uses_cloud_endpoint() {
        let config = OpenAiConfig::openai("sk-test");
        assert_eq!(config.vendor, "openai");
        assert_eq!(config.base_url, defaults::OPENAI_BASE_URL);
    }

    #[test]
    fn dashscope_config_targets_compatible_mode() {
        let config = OpenAiConfig::dashscope("sk-qwen");
        assert_eq!(config.vendor, "qwen");
        assert_eq!(config.base_url, defaults::DASHSCOPE_BASE_URL);
        assert!(config.base_url.contains("compatible-mode"));
    }

    #[test]
    fn chat_request_serializes_messages_in_order() {
        let request = ChatCompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You are helpful.".to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: "Hello".to_string(),
                },
            ],
            stream: false,
        };

        let json = serde_json::to_string(&request).unwrap();
        let system_idx = json.find("system").unwrap();
        let user_idx = json.find("user").unwrap();
        assert!(system_idx < user_idx);
    }

    #[test]
    fn chat_response_deserializes() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop"
            }]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "Hello!");
    }

    #[test]
    fn error_envelope_deserializes_without_type() {
        let json = r#"{"error": {"message": "Invalid API key"}}"#;
        let response: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.message, "Invalid API key");
        assert!(response.error.error_type.is_none());
    }
}
