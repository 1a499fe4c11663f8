//! HTTP handlers for wealthsync-api.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::info;

use wealthsync_core::{
    AnalysisOutcome, AnalysisRequest, ChatReply, ChatRequest, Error, EvidenceItem, Principal,
    ProfileRecord,
};
use wealthsync_inference::chat_system_prompt;
use wealthsync_ingest::assemble;

use crate::AppState;

// =============================================================================
// HEALTH
// =============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// =============================================================================
// ANALYSIS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub profile_id: Option<i64>,
}

/// Run the full analysis pipeline over a multipart upload.
///
/// Fields: repeated `files` parts (binary, with filename and content type)
/// and an optional `transcript` text part. `profile_id` arrives as a query
/// parameter and pulls the stored document in as context.
pub async fn analyze(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<AnalyzeQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut evidence = Vec::new();
    let mut transcript: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "transcript" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("unreadable transcript: {}", e)))?;
                transcript = Some(text);
            }
            "files" | "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let media_type = field.content_type().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("unreadable upload: {}", e)))?;
                evidence.push(EvidenceItem::new(filename, media_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let existing_profile = match query.profile_id {
        Some(id) => Some(load_owned_profile(&state, &principal, id).await?.data),
        None => None,
    };

    let request = AnalysisRequest {
        existing_profile,
        transcript,
        evidence,
    };
    request.validate()?;

    info!(
        subsystem = "api",
        op = "analyze",
        evidence_count = request.evidence.len(),
        has_transcript = request.transcript.is_some(),
        has_profile = request.existing_profile.is_some(),
        "Starting analysis"
    );

    let AnalysisRequest {
        existing_profile,
        transcript,
        evidence,
    } = request;

    let processed = state.processor.process(evidence).await?;
    let parts = assemble(
        existing_profile.as_ref(),
        transcript.as_deref(),
        &processed.items,
    );
    let document = state.invoker.invoke(&parts).await?;

    if !processed.dropped.is_empty() {
        info!(
            subsystem = "api",
            op = "analyze",
            dropped_count = processed.dropped.len(),
            "Analysis completed with dropped evidence"
        );
    }

    Ok(Json(AnalysisOutcome {
        document,
        dropped_items: processed.dropped,
    }))
}

// =============================================================================
// CHAT
// =============================================================================

pub async fn chat(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    request.validate()?;

    let vault = match (request.profile_id, request.context) {
        (Some(id), _) => load_owned_profile(&state, &principal, id).await?.data,
        (None, Some(context)) => context,
        (None, None) => {
            return Err(ApiError::BadRequest(
                "supply one of profile_id or context".to_string(),
            ))
        }
    };

    let system = chat_system_prompt(&vault);
    let response = state
        .dispatcher
        .dispatch(&request.model, &system, &request.message)
        .await?;

    Ok(Json(ChatReply { response }))
}

// =============================================================================
// PROFILES
// =============================================================================

pub async fn list_profiles(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = if principal.admin {
        None
    } else {
        Some(principal.username.as_str())
    };
    let profiles = state.profiles.list(owner).await?;
    Ok(Json(profiles))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<JsonValue>, ApiError> {
    let record = load_owned_profile(&state, &principal, id).await?;
    Ok(Json(record.data))
}

#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    pub name: String,
    pub data: JsonValue,
}

pub async fn save_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<SaveProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("profile name is required".to_string()));
    }

    let id = state
        .profiles
        .save(&request.name, &principal.username, &request.data)
        .await?;

    Ok(Json(serde_json::json!({
        "id": id,
        "message": "Profile saved successfully"
    })))
}

/// Load a profile and enforce owner visibility.
async fn load_owned_profile(
    state: &AppState,
    principal: &Principal,
    id: i64,
) -> Result<ProfileRecord, ApiError> {
    let record = state.profiles.load(id).await?;
    if !principal.admin && record.owner != principal.username {
        return Err(ApiError::Forbidden(
            "not authorized to access this profile".to_string(),
        ));
    }
    Ok(record)
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// HTTP-facing error wrapper around the core taxonomy.
#[derive(Debug)]
pub enum ApiError {
    Internal(Error),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadRequest(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::InvalidInput(_) | Error::UnknownModel(_) => ApiError::BadRequest(err.to_string()),
            Error::ProfileNotFound(_) => ApiError::NotFound(err.to_string()),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg.clone()),
            Error::Forbidden(msg) => ApiError::Forbidden(msg.clone()),
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // Internal failures surface with their underlying message; this is
        // an internal tool and the raw diagnostic is the useful part.
        let (status, message) = match self {
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model_maps_to_bad_request() {
        let api_err = ApiError::from(Error::UnknownModel("GPT-9".to_string()));
        assert!(matches!(api_err, ApiError::BadRequest(_)));
    }

    #[test]
    fn profile_not_found_maps_to_not_found() {
        let api_err = ApiError::from(Error::ProfileNotFound(3));
        assert!(matches!(api_err, ApiError::NotFound(_)));
    }

    #[test]
    fn staging_failure_maps_to_internal() {
        let api_err = ApiError::from(Error::Staging("disk full".to_string()));
        assert!(matches!(api_err, ApiError::Internal(_)));
    }
}
