//! Gemini backend implementation: generation and File API ingestion.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use tracing::{debug, info};

use wealthsync_core::{
    defaults, Error, FileIngestor, PromptPart, RemoteFileHandle, Result,
};

use super::types::*;

/// Error-text signature Gemini returns when a model lacks search grounding.
pub const GROUNDING_UNSUPPORTED_SIGNATURE: &str = "Search Grounding is not supported";

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL for the Generative Language API.
    pub base_url: String,
    /// API key, passed as the `key` query parameter.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: defaults::GEMINI_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_seconds: defaults::GEN_TIMEOUT_SECS,
        }
    }
}

/// Gemini inference backend.
///
/// Cheap to clone; the underlying HTTP client is shared.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "gemini",
            base_url = %config.base_url,
            "Initializing Gemini backend"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Execute one `generateContent` call and return the reply text.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        );

        debug!(
            subsystem = "inference",
            component = "gemini",
            op = "generate",
            model = model,
            prompt_parts = request.contents.iter().map(|c| c.parts.len()).sum::<usize>(),
            "Calling generateContent"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| Error::provider("gemini", format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<GeminiErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(Error::provider(
                "gemini",
                format!("Gemini API returned {}: {}", status.as_u16(), message),
            ));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::provider("gemini", format!("failed to parse response: {}", e)))?;

        let text = result.text();
        debug!(
            subsystem = "inference",
            component = "gemini",
            op = "generate",
            model = model,
            response_len = text.len(),
            "generateContent complete"
        );
        Ok(text)
    }

    /// Generate strict-JSON output from an assembled prompt sequence.
    pub async fn generate_json(&self, model: &str, parts: &[PromptPart]) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(parts.iter().map(part_from_prompt).collect())],
            system_instruction: None,
            tools: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        };
        self.generate(model, &request).await
    }

    /// One chat turn, optionally with the search-grounding tool attached.
    pub async fn chat(
        &self,
        model: &str,
        system: &str,
        message: &str,
        grounded: bool,
    ) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(message)])],
            system_instruction: (!system.is_empty())
                .then(|| Content::bare(vec![Part::text(system)])),
            tools: grounded.then(|| {
                vec![Tool {
                    google_search: GoogleSearch::default(),
                }]
            }),
            generation_config: None,
        };
        self.generate(model, &request).await
    }
}

/// Whether an adapter error is the known grounding-unsupported signature:
/// an HTTP 400 from Gemini, or error text carrying the documented substring.
pub fn grounding_unsupported(err: &Error) -> bool {
    match err {
        Error::ProviderCall { vendor, message } if vendor == "gemini" => {
            message.contains("returned 400") || message.contains(GROUNDING_UNSUPPORTED_SIGNATURE)
        }
        _ => false,
    }
}

fn part_from_prompt(part: &PromptPart) -> Part {
    match part {
        PromptPart::Text(text) => Part::text(text.clone()),
        PromptPart::InlineImage { media_type, bytes } => Part::inline_data(
            media_type.clone(),
            base64::engine::general_purpose::STANDARD.encode(bytes),
        ),
        PromptPart::FileRef(handle) => {
            Part::file_data(handle.media_type.clone(), handle.uri.clone())
        }
    }
}

#[async_trait]
impl FileIngestor for GeminiClient {
    /// Upload a staged file via the File API's resumable protocol.
    ///
    /// Two-step handshake (start → upload+finalize) modeled as one
    /// synchronous operation; the caller owns the returned handle.
    async fn upload(
        &self,
        path: &Path,
        media_type: &str,
        display_name: &str,
    ) -> Result<RemoteFileHandle> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::Staging(format!("failed to read staged file: {}", e)))?;

        let start_url = format!(
            "{}/upload/v1beta/files",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&start_url)
            .query(&[("key", self.config.api_key.as_str())])
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", bytes.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", media_type)
            .json(&CreateFileRequest {
                file: FileMetadata {
                    display_name: display_name.to_string(),
                },
            })
            .send()
            .await
            .map_err(|e| Error::Staging(format!("file upload start failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Staging(format!(
                "file upload start returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let upload_url = response
            .headers()
            .get("x-goog-upload-url")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                Error::Staging("file upload start response missing upload URL".to_string())
            })?;

        let response = self
            .client
            .post(&upload_url)
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header("X-Goog-Upload-Offset", "0")
            .body(bytes)
            .send()
            .await
            .map_err(|e| Error::Staging(format!("file upload failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Staging(format!(
                "file upload returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let result: UploadFileResponse = response
            .json()
            .await
            .map_err(|e| Error::Staging(format!("failed to parse upload response: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "gemini",
            op = "upload_file",
            filename = display_name,
            file = %result.file.name,
            "Evidence file uploaded"
        );

        Ok(RemoteFileHandle {
            uri: result.file.uri,
            media_type: result
                .file
                .mime_type
                .unwrap_or_else(|| media_type.to_string()),
            display_name: display_name.to_string(),
        })
    }
}
