//! Process-wide configuration, read once at startup.

use crate::defaults;
use crate::error::{Error, Result};

/// Vendor API credentials.
///
/// Loaded into an immutable object at process start and passed by reference
/// into the dispatcher/invoker constructors; call sites never consult the
/// environment. Only the Gemini credential is mandatory — the analysis
/// pipeline cannot run without it. The others are request-time advisories
/// when absent.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub gemini: String,
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub dashscope: Option<String>,
}

impl ProviderCredentials {
    pub fn from_env() -> Result<Self> {
        let gemini = non_empty(defaults::ENV_GEMINI_API_KEY).ok_or_else(|| {
            Error::Config(format!(
                "{} not found in environment variables",
                defaults::ENV_GEMINI_API_KEY
            ))
        })?;

        Ok(Self {
            gemini,
            openai: non_empty(defaults::ENV_OPENAI_API_KEY),
            anthropic: non_empty(defaults::ENV_ANTHROPIC_API_KEY),
            dashscope: non_empty(defaults::ENV_DASHSCOPE_API_KEY),
        })
    }
}

/// What to do with evidence items that classify as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedPolicy {
    /// Drop without logging; the count still surfaces in the outcome.
    #[default]
    Silent,
    /// Drop, but emit a WARN per item.
    Warn,
}

impl UnsupportedPolicy {
    pub fn from_env() -> Self {
        match std::env::var(defaults::ENV_WARN_UNSUPPORTED) {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => Self::Warn,
            _ => Self::Silent,
        }
    }
}

/// Serving-layer configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    /// Static bearer token; None leaves the API open (development mode).
    pub api_token: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var(defaults::ENV_SERVER_PORT)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::SERVER_PORT);
        let database_url = std::env::var(defaults::ENV_DATABASE_URL)
            .unwrap_or_else(|_| defaults::DATABASE_URL.to_string());

        Self {
            port,
            database_url,
            api_token: non_empty(defaults::ENV_API_TOKEN),
        }
    }
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}
