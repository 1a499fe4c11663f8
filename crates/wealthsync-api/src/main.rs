//! wealthsync-api server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wealthsync_api::{auth::StaticTokenAuthenticator, router, AppState};
use wealthsync_core::{ProviderCredentials, ServerConfig, UnsupportedPolicy};
use wealthsync_db::{create_pool, init_schema, SqliteProfileStore};
use wealthsync_inference::{AnalysisInvoker, ChatDispatcher, GeminiClient, GeminiConfig};
use wealthsync_ingest::EvidenceProcessor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let credentials = ProviderCredentials::from_env()?;
    let server_config = ServerConfig::from_env();

    let pool = create_pool(&server_config.database_url).await?;
    init_schema(&pool).await?;

    let gemini = GeminiClient::new(GeminiConfig::new(credentials.gemini.clone()))?;
    let state = AppState {
        processor: Arc::new(EvidenceProcessor::new(
            Arc::new(gemini.clone()),
            UnsupportedPolicy::from_env(),
        )),
        invoker: Arc::new(AnalysisInvoker::new(gemini)),
        dispatcher: Arc::new(ChatDispatcher::new(&credentials)?),
        profiles: Arc::new(SqliteProfileStore::new(pool)),
        auth: Arc::new(StaticTokenAuthenticator::new(server_config.api_token.clone())),
    };

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));

    info!(
        subsystem = "api",
        op = "startup",
        port = server_config.port,
        database_url = %server_config.database_url,
        auth = server_config.api_token.is_some(),
        "Starting wealthsync API server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
