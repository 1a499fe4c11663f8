//! # wealthsync-inference
//!
//! AI provider layer for wealthsync.
//!
//! This crate provides:
//! - The fixed chat model label table and provider-family resolution
//! - Gemini backend (generation, File API ingestion, grounding probe)
//! - OpenAI-compatible backend (OpenAI + Qwen via DashScope)
//! - Anthropic backend
//! - [`AnalysisInvoker`]: strict-JSON analysis with fence stripping and
//!   required-key validation
//! - [`ChatDispatcher`]: per-family routing with credential advisories
//!
//! Adapters are hand-rolled reqwest clients; vendor error shapes never
//! cross their module boundary.

pub mod anthropic;
pub mod dispatcher;
pub mod gemini;
pub mod invoker;
pub mod labels;
pub mod openai;

// Re-export core types
pub use wealthsync_core::*;

pub use anthropic::{AnthropicBackend, AnthropicConfig};
pub use dispatcher::{
    chat_system_prompt, ChatDispatcher, ANTHROPIC_ADVISORY, OPENAI_ADVISORY, QWEN_ADVISORY,
};
pub use gemini::{GeminiClient, GeminiConfig};
pub use invoker::{strip_code_fence, AnalysisInvoker};
pub use labels::{instruction_role, resolve, ProviderFamily, ResolvedModel, MODEL_LABELS};
pub use openai::{OpenAiChatBackend, OpenAiConfig};
