//! Collaborator traits for wealthsync abstractions.
//!
//! These traits define the seams between the core pipeline and its external
//! collaborators (provider file ingestion, profile persistence, identity),
//! enabling pluggable implementations and testability.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::models::{Principal, ProfileRecord, ProfileSummary, RemoteFileHandle};

// =============================================================================
// PROVIDER FILE INGESTION
// =============================================================================

/// Remote file-ingestion endpoint of an AI provider.
///
/// The returned handle's validity window is bounded by the enclosing analysis
/// call; implementations must not cache handles across requests.
#[async_trait]
pub trait FileIngestor: Send + Sync {
    /// Upload a staged file and return the provider-side handle.
    async fn upload(
        &self,
        path: &Path,
        media_type: &str,
        display_name: &str,
    ) -> Result<RemoteFileHandle>;
}

// =============================================================================
// PROFILE PERSISTENCE
// =============================================================================

/// Persistence collaborator for stored client profiles.
///
/// Plain CRUD over an opaque JSON blob keyed by (name, owner); transaction
/// discipline is the implementation's concern.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Upsert a profile document, keyed on (name, owner). Returns the row id.
    async fn save(&self, name: &str, owner: &str, data: &JsonValue) -> Result<i64>;

    /// Load a profile by id. Fails with [`crate::Error::ProfileNotFound`].
    async fn load(&self, id: i64) -> Result<ProfileRecord>;

    /// List profiles, optionally restricted to one owner.
    async fn list(&self, owner: Option<&str>) -> Result<Vec<ProfileSummary>>;
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Identity collaborator: `authenticate(credentials) -> principal`.
///
/// The serving layer passes the bearer token through; JWT/password handling
/// lives behind this seam.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, bearer_token: Option<&str>) -> Result<Principal>;
}
