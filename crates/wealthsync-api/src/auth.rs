//! Bearer-token auth middleware over the identity collaborator.

use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use wealthsync_core::{Authenticator, Error, Principal, Result};

use crate::handlers::ApiError;
use crate::AppState;

/// Static-token implementation of the identity collaborator.
///
/// A deployment behind a real identity service swaps this for an
/// implementation that verifies the token remotely. With no token
/// configured the API runs open, which is development mode only.
pub struct StaticTokenAuthenticator {
    token: Option<String>,
}

impl StaticTokenAuthenticator {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, bearer_token: Option<&str>) -> Result<Principal> {
        match &self.token {
            None => Ok(Principal {
                username: "dev".to_string(),
                admin: true,
            }),
            Some(expected) => match bearer_token {
                Some(token) if token == expected => Ok(Principal {
                    username: "service".to_string(),
                    admin: true,
                }),
                _ => Err(Error::Unauthorized(
                    "invalid or missing bearer token".to_string(),
                )),
            },
        }
    }
}

/// Resolve the caller's principal and stash it in request extensions.
pub async fn require_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> std::result::Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let principal = state.auth.authenticate(token).await?;
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
