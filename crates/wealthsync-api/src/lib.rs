//! wealthsync-api - HTTP API server for wealthsync.
//!
//! Thin serving shell over the core pipeline: multipart analysis ingest,
//! chat dispatch, and profile CRUD delegation. Routing and auth middleware
//! are collaborator plumbing; everything interesting happens in the
//! ingest/inference crates.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::http::Request;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use wealthsync_core::{defaults, Authenticator, ProfileStore};
use wealthsync_inference::{AnalysisInvoker, ChatDispatcher};
use wealthsync_ingest::EvidenceProcessor;

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation when tracing a slow analysis call.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Evidence classify/stage/decode pass.
    pub processor: Arc<EvidenceProcessor>,
    /// Analysis model invocation.
    pub invoker: Arc<AnalysisInvoker>,
    /// Chat routing across provider families.
    pub dispatcher: Arc<ChatDispatcher>,
    /// Profile persistence collaborator.
    pub profiles: Arc<dyn ProfileStore>,
    /// Identity collaborator.
    pub auth: Arc<dyn Authenticator>,
}

/// Build the application router.
///
/// Everything except `/health` sits behind the bearer-token middleware.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/chat", post(handlers::chat))
        .route("/profiles", get(handlers::list_profiles))
        .route("/profiles/:id", get(handlers::get_profile))
        .route("/save_profile", post(handlers::save_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_principal,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(RequestBodyLimitLayer::new(defaults::MAX_BODY_SIZE_BYTES))
        .with_state(state)
}
