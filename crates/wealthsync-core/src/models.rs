//! Core data model for the analysis and chat pipelines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

// =============================================================================
// EVIDENCE
// =============================================================================

/// One uploaded artifact submitted for analysis.
///
/// Immutable once read from the request body; consumed exactly once by the
/// classification/staging pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceItem {
    /// Original filename as declared by the client.
    pub filename: String,
    /// Declared media type (may disagree with the filename extension).
    pub media_type: String,
    /// Raw payload.
    pub bytes: Vec<u8>,
}

impl EvidenceItem {
    pub fn new(
        filename: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            media_type: media_type.into(),
            bytes,
        }
    }
}

/// Provider-side handle for an uploaded evidence file.
///
/// Valid only for the duration of the enclosing analysis call; never cached
/// or reused across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFileHandle {
    /// Provider URI referencing the uploaded file.
    pub uri: String,
    /// Media type the file was uploaded as.
    pub media_type: String,
    /// Human-readable name shown in provider tooling.
    pub display_name: String,
}

/// Result of classifying (and, where needed, staging) one evidence item.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedEvidence {
    /// Image passed inline to the model.
    Image { media_type: String, bytes: Vec<u8> },
    /// Document/audio/video uploaded out-of-band; the handle references it.
    RemoteFile(RemoteFileHandle),
    /// UTF-8 text passed inline.
    InlineText { filename: String, text: String },
    /// Unrecognized and non-decodable; contributes nothing to the prompt.
    Unsupported { filename: String },
}

/// One element of the ordered multimodal instruction sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptPart {
    Text(String),
    InlineImage { media_type: String, bytes: Vec<u8> },
    FileRef(RemoteFileHandle),
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Input to one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// Prior stored document to incorporate new evidence into.
    pub existing_profile: Option<JsonValue>,
    /// Free-text meeting transcript.
    pub transcript: Option<String>,
    /// Evidence items in submission order.
    pub evidence: Vec<EvidenceItem>,
}

impl AnalysisRequest {
    /// At least one of evidence/transcript/profile must be present for the
    /// call to be meaningful.
    pub fn validate(&self) -> Result<()> {
        let has_transcript = self
            .transcript
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if self.evidence.is_empty() && !has_transcript && self.existing_profile.is_none() {
            return Err(Error::InvalidInput(
                "analysis request needs at least one of: evidence files, transcript, existing profile"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level keys every analysis document must carry.
pub const REQUIRED_DOCUMENT_KEYS: &[&str] = &[
    "client_profile",
    "financial_snapshot",
    "assets_detail",
    "category_totals",
    "goals_detected",
    "key_risks",
    "strategic_roadmap",
    "portfolio_allocation",
    "insurance_analysis",
];

/// Keys that appear only when the corresponding extraction triggered.
pub const OPTIONAL_DOCUMENT_KEYS: &[&str] = &["client_personal_details", "meeting_analysis"];

/// The canonical structured analysis output.
///
/// A fixed-shape JSON object validated against [`REQUIRED_DOCUMENT_KEYS`] at
/// construction; the inner value is otherwise opaque to this system and is
/// persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisDocument(JsonValue);

impl AnalysisDocument {
    /// Validate a parsed model response into a document.
    ///
    /// Fails with [`Error::SchemaViolation`] naming every missing required
    /// key; optional keys are not checked.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            Error::SchemaViolation("analysis document must be a JSON object".to_string())
        })?;

        let missing: Vec<&str> = REQUIRED_DOCUMENT_KEYS
            .iter()
            .copied()
            .filter(|key| !obj.contains_key(*key))
            .collect();

        if !missing.is_empty() {
            return Err(Error::SchemaViolation(format!(
                "missing required keys: {}",
                missing.join(", ")
            )));
        }

        Ok(Self(value))
    }

    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_value(self) -> JsonValue {
        self.0
    }
}

/// Analysis result plus ingestion metadata.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub document: AnalysisDocument,
    /// Filenames of evidence items that were dropped as unsupported.
    pub dropped_items: Vec<String>,
}

// =============================================================================
// CHAT
// =============================================================================

/// One conversational follow-up request. Never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Human-readable model label, resolved via the label table.
    pub model: String,
    pub message: String,
    /// Stored profile to chat against.
    #[serde(default)]
    pub profile_id: Option<i64>,
    /// Ad-hoc context for unsaved analyses.
    #[serde(default)]
    pub context: Option<JsonValue>,
}

impl ChatRequest {
    /// Exactly one of `profile_id`/`context` must be supplied.
    pub fn validate(&self) -> Result<()> {
        match (self.profile_id.is_some(), self.context.is_some()) {
            (true, true) => Err(Error::InvalidInput(
                "supply either profile_id or context, not both".to_string(),
            )),
            (false, false) => Err(Error::InvalidInput(
                "supply one of profile_id or context".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Normalized chat reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
}

// =============================================================================
// PROFILES
// =============================================================================

/// A stored client profile with its analysis document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: i64,
    pub name: String,
    pub owner: String,
    /// Opaque analysis document blob.
    pub data: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row for stored profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

/// Authenticated caller, as resolved by the identity collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub username: String,
    pub admin: bool,
}
