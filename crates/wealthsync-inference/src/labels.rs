//! Chat model label table.
//!
//! Maps each user-facing display label to a provider family and concrete
//! model identifier. Resolution happens exactly once per request; everything
//! downstream branches on the [`ProviderFamily`] enum, never on string
//! inspection of the model id. The label set is fixed for compatibility with
//! deployed clients.

use wealthsync_core::{Error, Result};

/// One vendor's API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderFamily {
    Gemini,
    OpenAi,
    Anthropic,
    /// Qwen models, served through DashScope's OpenAI-compatible endpoint.
    Qwen,
}

impl std::fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::OpenAi => write!(f, "openai"),
            Self::Anthropic => write!(f, "anthropic"),
            Self::Qwen => write!(f, "qwen"),
        }
    }
}

/// Result of resolving a display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedModel {
    pub family: ProviderFamily,
    pub model_id: &'static str,
}

/// The fixed label table. Labels are matched exactly, including casing.
pub const MODEL_LABELS: &[(&str, ProviderFamily, &str)] = &[
    ("Gemini 3.1 Pro (Latest)", ProviderFamily::Gemini, "gemini-3.1-pro-preview"),
    ("Gemini 3 Flash", ProviderFamily::Gemini, "gemini-3-flash-preview"),
    ("Gemini 2.5 Pro", ProviderFamily::Gemini, "gemini-2.5-pro"),
    ("Gemini 2.5 Flash", ProviderFamily::Gemini, "gemini-2.5-flash"),
    ("o3-mini (OpenAI Reasoning)", ProviderFamily::OpenAi, "o3-mini"),
    ("o1 (High Logic)", ProviderFamily::OpenAi, "o1"),
    ("GPT-4o (Standard)", ProviderFamily::OpenAi, "gpt-4o"),
    ("Claude 3.5 Sonnet", ProviderFamily::Anthropic, "claude-3-5-sonnet-20241022"),
    ("Qwen Max", ProviderFamily::Qwen, "qwen-max"),
];

/// Resolve a display label to its provider family and model id.
///
/// Unknown labels are a client error, never a silent default.
pub fn resolve(label: &str) -> Result<ResolvedModel> {
    MODEL_LABELS
        .iter()
        .find(|entry| entry.0 == label)
        .map(|entry| ResolvedModel {
            family: entry.1,
            model_id: entry.2,
        })
        .ok_or_else(|| Error::UnknownModel(label.to_string()))
}

// ---------------------------------------------------------------------------
// Instruction-channel role selection
// ---------------------------------------------------------------------------

/// Role used for the instruction block on standard chat models.
pub const DEFAULT_INSTRUCTION_ROLE: &str = "system";

/// Model-id prefixes whose instruction block rides a different role.
/// OpenAI reasoning-tier models reject `system` in favor of `developer`.
const INSTRUCTION_ROLE_OVERRIDES: &[(&str, &str)] = &[("o1", "developer"), ("o3", "developer")];

/// Instruction-channel role for a model id, by prefix table lookup.
pub fn instruction_role(model_id: &str) -> &'static str {
    INSTRUCTION_ROLE_OVERRIDES
        .iter()
        .find(|entry| model_id.starts_with(entry.0))
        .map(|entry| entry.1)
        .unwrap_or(DEFAULT_INSTRUCTION_ROLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_nine_labels_across_four_families() {
        assert_eq!(MODEL_LABELS.len(), 9);
        for family in [
            ProviderFamily::Gemini,
            ProviderFamily::OpenAi,
            ProviderFamily::Anthropic,
            ProviderFamily::Qwen,
        ] {
            assert!(
                MODEL_LABELS.iter().any(|(_, f, _)| *f == family),
                "no label for {}",
                family
            );
        }
    }

    #[test]
    fn resolve_gemini_labels() {
        let resolved = resolve("Gemini 3.1 Pro (Latest)").unwrap();
        assert_eq!(resolved.family, ProviderFamily::Gemini);
        assert_eq!(resolved.model_id, "gemini-3.1-pro-preview");

        let resolved = resolve("Gemini 2.5 Flash").unwrap();
        assert_eq!(resolved.model_id, "gemini-2.5-flash");
    }

    #[test]
    fn resolve_openai_labels() {
        assert_eq!(resolve("GPT-4o (Standard)").unwrap().model_id, "gpt-4o");
        assert_eq!(resolve("o1 (High Logic)").unwrap().model_id, "o1");
        assert_eq!(
            resolve("o3-mini (OpenAI Reasoning)").unwrap().model_id,
            "o3-mini"
        );
    }

    #[test]
    fn resolve_anthropic_label() {
        let resolved = resolve("Claude 3.5 Sonnet").unwrap();
        assert_eq!(resolved.family, ProviderFamily::Anthropic);
        assert_eq!(resolved.model_id, "claude-3-5-sonnet-20241022");
    }

    #[test]
    fn resolve_qwen_label() {
        let resolved = resolve("Qwen Max").unwrap();
        assert_eq!(resolved.family, ProviderFamily::Qwen);
        assert_eq!(resolved.model_id, "qwen-max");
    }

    #[test]
    fn unknown_label_is_an_error_not_a_default() {
        let err = resolve("GPT-5 (Imaginary)").unwrap_err();
        match err {
            Error::UnknownModel(label) => assert_eq!(label, "GPT-5 (Imaginary)"),
            other => panic!("expected UnknownModel, got {:?}", other),
        }
    }

    #[test]
    fn label_match_is_exact_including_case() {
        assert!(resolve("gpt-4o (standard)").is_err());
        assert!(resolve("GPT-4o").is_err());
    }

    #[test]
    fn reasoning_models_use_developer_role() {
        assert_eq!(instruction_role("o1"), "developer");
        assert_eq!(instruction_role("o1-preview"), "developer");
        assert_eq!(instruction_role("o3-mini"), "developer");
    }

    #[test]
    fn standard_models_use_system_role() {
        assert_eq!(instruction_role("gpt-4o"), "system");
        assert_eq!(instruction_role("qwen-max"), "system");
    }
}
