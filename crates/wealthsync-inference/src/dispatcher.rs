//! Chat dispatch across provider families.
//!
//! One decision point: resolve the display label to a family + model id,
//! then hand the call to the matching adapter. Exactly one family branch
//! executes per request. The only retry anywhere is the Gemini grounding
//! capability probe.

use serde_json::Value as JsonValue;
use tracing::{info, warn};

use wealthsync_core::{ProviderCredentials, Result};

use crate::anthropic::{AnthropicBackend, AnthropicConfig};
use crate::gemini::{self, GeminiClient, GeminiConfig};
use crate::labels::{self, ProviderFamily};
use crate::openai::{OpenAiChatBackend, OpenAiConfig};

/// Advisory returned when the OpenAI credential is absent.
pub const OPENAI_ADVISORY: &str = "OpenAI API key is not configured. Add OPENAI_API_KEY to the \
                                   server environment to use GPT and o-series models.";

/// Advisory returned when the DashScope credential is absent.
pub const QWEN_ADVISORY: &str = "DashScope API key is not configured. Add DASHSCOPE_API_KEY to \
                                 the server environment to use Qwen models.";

/// Advisory returned when the Anthropic credential is absent.
pub const ANTHROPIC_ADVISORY: &str = "Anthropic API key is not configured. Add ANTHROPIC_API_KEY \
                                      to the server environment to use Claude models.";

/// Routes chat requests to the adapter for the resolved provider family.
///
/// Adapters for optional vendors exist only when their credential was
/// present at startup; a missing adapter turns into an advisory reply, not
/// an error.
pub struct ChatDispatcher {
    gemini: GeminiClient,
    openai: Option<OpenAiChatBackend>,
    qwen: Option<OpenAiChatBackend>,
    anthropic: Option<AnthropicBackend>,
}

impl ChatDispatcher {
    /// Build a dispatcher from the process credential set.
    pub fn new(credentials: &ProviderCredentials) -> Result<Self> {
        let gemini = GeminiClient::new(GeminiConfig::new(credentials.gemini.clone()))?;

        let openai = match &credentials.openai {
            Some(key) => Some(OpenAiChatBackend::new(OpenAiConfig::openai(key.clone()))?),
            None => None,
        };
        let qwen = match &credentials.dashscope {
            Some(key) => Some(OpenAiChatBackend::new(OpenAiConfig::dashscope(key.clone()))?),
            None => None,
        };
        let anthropic = match &credentials.anthropic {
            Some(key) => Some(AnthropicBackend::new(AnthropicConfig::new(key.clone()))?),
            None => None,
        };

        Ok(Self::with_backends(gemini, openai, qwen, anthropic))
    }

    /// Assemble a dispatcher from explicit adapters.
    pub fn with_backends(
        gemini: GeminiClient,
        openai: Option<OpenAiChatBackend>,
        qwen: Option<OpenAiChatBackend>,
        anthropic: Option<AnthropicBackend>,
    ) -> Self {
        Self {
            gemini,
            openai,
            qwen,
            anthropic,
        }
    }

    /// Dispatch one chat turn.
    ///
    /// Fails with [`wealthsync_core::Error::UnknownModel`] for labels outside
    /// the table; vendor failures surface as
    /// [`wealthsync_core::Error::ProviderCall`].
    pub async fn dispatch(&self, label: &str, system: &str, message: &str) -> Result<String> {
        let resolved = labels::resolve(label)?;

        info!(
            subsystem = "inference",
            component = "dispatcher",
            op = "chat",
            provider = %resolved.family,
            model = resolved.model_id,
            "Dispatching chat request"
        );

        match resolved.family {
            ProviderFamily::Gemini => {
                self.dispatch_gemini(resolved.model_id, system, message).await
            }
            ProviderFamily::OpenAi => match &self.openai {
                Some(backend) => backend.chat(resolved.model_id, system, message).await,
                None => Ok(OPENAI_ADVISORY.to_string()),
            },
            ProviderFamily::Qwen => match &self.qwen {
                Some(backend) => backend.chat(resolved.model_id, system, message).await,
                None => Ok(QWEN_ADVISORY.to_string()),
            },
            ProviderFamily::Anthropic => match &self.anthropic {
                Some(backend) => backend.chat(resolved.model_id, system, message).await,
                None => Ok(ANTHROPIC_ADVISORY.to_string()),
            },
        }
    }

    /// Gemini with search grounding, retried once without the tool when the
    /// model reports the known unsupported signature. Not a retry loop.
    async fn dispatch_gemini(&self, model: &str, system: &str, message: &str) -> Result<String> {
        match self.gemini.chat(model, system, message, true).await {
            Ok(text) => Ok(text),
            Err(err) if gemini::grounding_unsupported(&err) => {
                warn!(
                    subsystem = "inference",
                    component = "dispatcher",
                    model = model,
                    error = %err,
                    "Search grounding unsupported; retrying without the tool"
                );
                self.gemini.chat(model, system, message, false).await
            }
            Err(err) => Err(err),
        }
    }
}

/// System prompt for conversational follow-up over a client's vault data.
pub fn chat_system_prompt(vault: &JsonValue) -> String {
    format!(
        "You are WealthSync's AI analyst for relationship managers. Answer questions \
         about this client using the vault data below. Be precise with amounts, say so \
         when a figure is not in the data, and keep replies concise and actionable.\n\n\
         CLIENT VAULT DATA:\n{}",
        vault
    )
}
