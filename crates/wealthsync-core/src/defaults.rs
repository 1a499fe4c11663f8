//! Centralized default constants for the wealthsync system.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// PROVIDER ENDPOINTS
// =============================================================================

/// Google Generative Language API base URL (generation + File API).
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// DashScope OpenAI-compatible base URL (Qwen models).
pub const DASHSCOPE_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

/// Anthropic API base URL.
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

// =============================================================================
// MODELS
// =============================================================================

/// Generation model used for document analysis.
pub const ANALYSIS_MODEL: &str = "gemini-3-flash-preview";

/// Output-token ceiling for Anthropic chat calls.
pub const ANTHROPIC_MAX_TOKENS: u32 = 1024;

/// Anthropic API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

// =============================================================================
// TIMEOUTS
// =============================================================================

/// Timeout for provider file uploads in seconds.
pub const UPLOAD_TIMEOUT_SECS: u64 = 120;

/// Timeout for analysis generation requests in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 300;

/// Timeout for chat requests in seconds.
pub const CHAT_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// STAGING SUFFIXES
// =============================================================================

/// Suffix inferred for extensionless PDFs.
pub const PDF_SUFFIX: &str = ".pdf";

/// Suffix inferred for extensionless audio.
pub const AUDIO_SUFFIX: &str = ".mp3";

/// Suffix inferred for extensionless video.
pub const VIDEO_SUFFIX: &str = ".mp4";

/// Suffix used when nothing better can be inferred.
pub const GENERIC_SUFFIX: &str = ".bin";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 8000;

/// Default SQLite database URL.
pub const DATABASE_URL: &str = "sqlite://wealthsync.db";

/// Maximum request body size in bytes (64 MB, bounded by evidence uploads).
pub const MAX_BODY_SIZE_BYTES: usize = 64 * 1024 * 1024;

// =============================================================================
// ENVIRONMENT VARIABLE NAMES
// =============================================================================

pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_DASHSCOPE_API_KEY: &str = "DASHSCOPE_API_KEY";
pub const ENV_ANALYSIS_MODEL: &str = "WEALTHSYNC_ANALYSIS_MODEL";
pub const ENV_WARN_UNSUPPORTED: &str = "WEALTHSYNC_WARN_UNSUPPORTED";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_SERVER_PORT: &str = "PORT";
pub const ENV_API_TOKEN: &str = "WEALTHSYNC_API_TOKEN";
