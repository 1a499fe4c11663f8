//! Analysis invocation: one strict-JSON generation call plus response
//! normalization into a validated document.

use tracing::{debug, info};

use wealthsync_core::{defaults, AnalysisDocument, Error, PromptPart, Result};

use crate::gemini::GeminiClient;

/// Invokes the analysis model and parses its output.
pub struct AnalysisInvoker {
    gemini: GeminiClient,
    model: String,
}

impl AnalysisInvoker {
    /// Create an invoker using the configured analysis model.
    pub fn new(gemini: GeminiClient) -> Self {
        let model = std::env::var(defaults::ENV_ANALYSIS_MODEL)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| defaults::ANALYSIS_MODEL.to_string());
        Self::with_model(gemini, model)
    }

    pub fn with_model(gemini: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            gemini,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one analysis call over an assembled prompt sequence.
    ///
    /// Failure modes: [`Error::Generation`] (call failed or empty reply),
    /// [`Error::Parse`] (not JSON after fence stripping),
    /// [`Error::SchemaViolation`] (JSON missing required keys). A partial
    /// document is never returned.
    pub async fn invoke(&self, parts: &[PromptPart]) -> Result<AnalysisDocument> {
        debug!(
            subsystem = "inference",
            component = "invoker",
            op = "analyze",
            model = %self.model,
            prompt_parts = parts.len(),
            "Invoking analysis model"
        );

        let raw = self
            .gemini
            .generate_json(&self.model, parts)
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        if raw.trim().is_empty() {
            return Err(Error::Generation(
                "model returned an empty response".to_string(),
            ));
        }

        let cleaned = strip_code_fence(&raw);
        let value: serde_json::Value = serde_json::from_str(cleaned)
            .map_err(|e| Error::Parse(format!("model output is not valid JSON: {}", e)))?;

        let document = AnalysisDocument::from_value(value)?;

        info!(
            subsystem = "inference",
            component = "invoker",
            op = "analyze",
            model = %self.model,
            response_len = raw.len(),
            "Analysis document produced"
        );
        Ok(document)
    }
}

/// Strip a single fenced code block wrapping the model reply.
///
/// A ```json fence is matched first, then a generic ``` fence; with no
/// fence, the raw text is used as-is. This is the only normalization step
/// between model text and the parsed document.
pub fn strip_code_fence(text: &str) -> &str {
    if let Some((_, after)) = text.split_once("```json") {
        let inner = match after.split_once("```") {
            Some((inner, _)) => inner,
            None => after,
        };
        return inner.trim();
    }
    if let Some((_, after)) = text.split_once("```") {
        let inner = match after.split_once("```") {
            Some((inner, _)) => inner,
            None => after,
        };
        return inner.trim();
    }
    text.trim()
}
