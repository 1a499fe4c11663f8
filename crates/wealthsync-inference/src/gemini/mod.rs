//! Gemini backend: `generateContent` plus the File API used for evidence
//! ingestion.
//!
//! This is the primary provider — the analysis pipeline runs on it
//! exclusively, and it is the only family with the search-grounding
//! capability probe in chat. The client is a plain reqwest wrapper; no
//! vendor SDK types leave this module.

mod client;
mod types;

pub use client::{
    grounding_unsupported, GeminiClient, GeminiConfig, GROUNDING_UNSUPPORTED_SIGNATURE,
};
pub use types::*;
