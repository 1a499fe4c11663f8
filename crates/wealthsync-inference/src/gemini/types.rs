//! Gemini API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// GENERATION TYPES
// =============================================================================

/// Request body for the `generateContent` endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// A role-tagged sequence of parts.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }

    pub fn bare(parts: Vec<Part>) -> Self {
        Self { role: None, parts }
    }
}

/// One multimodal part. Exactly one field is set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data_b64: impl Into<String>) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data_b64.into(),
            }),
            ..Default::default()
        }
    }

    pub fn file_data(mime_type: impl Into<String>, file_uri: impl Into<String>) -> Self {
        Self {
            file_data: Some(FileData {
                mime_type: mime_type.into(),
                file_uri: file_uri.into(),
            }),
            ..Default::default()
        }
    }
}

/// Base64-encoded inline media.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Reference to a File API upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

/// Tool declaration. Only search grounding is used here.
#[derive(Debug, Serialize)]
pub struct Tool {
    pub google_search: GoogleSearch,
}

/// Empty config object for the search-grounding tool.
#[derive(Debug, Serialize, Default)]
pub struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Response from `generateContent`.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

// =============================================================================
// FILE API TYPES
// =============================================================================

/// Metadata body for the resumable-upload start call.
#[derive(Debug, Serialize)]
pub struct CreateFileRequest {
    pub file: FileMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub display_name: String,
}

/// Response from the upload finalize call.
#[derive(Debug, Deserialize)]
pub struct UploadFileResponse {
    pub file: UploadedFile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error envelope returned by the Gemini API.
#[derive(Debug, Deserialize)]
pub struct GeminiErrorResponse {
    pub error: GeminiError,
}

#[derive(Debug, Deserialize)]
pub struct GeminiError {
    #[serde(default)]
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case_with_optional_fields_omitted() {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text("hello")])],
            system_instruction: None,
            tools: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"responseMimeType\":\"application/json\""));
        assert!(!json.contains("systemInstruction"));
        assert!(!json.contains("tools"));
    }

    #[test]
    fn grounding_tool_serializes_as_empty_object() {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text("q")])],
            system_instruction: None,
            tools: Some(vec![Tool {
                google_search: GoogleSearch::default(),
            }]),
            generation_config: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"tools\":[{\"google_search\":{}}]"));
    }

    #[test]
    fn inline_part_serializes_mime_and_data() {
        let part = Part::inline_data("image/png", "QUJD");
        let json = serde_json::to_string(&part).unwrap();
        assert_eq!(
            json,
            "{\"inlineData\":{\"mimeType\":\"image/png\",\"data\":\"QUJD\"}}"
        );
    }

    #[test]
    fn file_part_serializes_uri() {
        let part = Part::file_data("application/pdf", "https://example/files/abc");
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains("\"fileData\""));
        assert!(json.contains("\"fileUri\":\"https://example/files/abc\""));
    }

    #[test]
    fn response_text_concatenates_first_candidate_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Hello "}, {"text": "world"}]
                },
                "finishReason": "STOP"
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "Hello world");
    }

    #[test]
    fn empty_candidates_yield_empty_text() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn error_envelope_deserializes() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "Search Grounding is not supported for this model",
                "status": "INVALID_ARGUMENT"
            }
        }"#;

        let response: GeminiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.code, 400);
        assert!(response.error.message.contains("Search Grounding"));
    }

    #[test]
    fn upload_response_deserializes() {
        let json = r#"{
            "file": {
                "name": "files/abc-123",
                "uri": "https://generativelanguage.googleapis.com/v1beta/files/abc-123",
                "mimeType": "application/pdf",
                "state": "ACTIVE"
            }
        }"#;

        let response: UploadFileResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.file.name, "files/abc-123");
        assert_eq!(response.file.mime_type.as_deref(), Some("application/pdf"));
    }
}
