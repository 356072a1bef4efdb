//! tally API server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use tally_api::telemetry::{self, LogConfig};
use tally_api::{router, AppState, ServerConfig};
use tally_inference::OpenAIBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let _file_guard = telemetry::init(&LogConfig::from_env());

    let config = ServerConfig::from_env();

    let backend = OpenAIBackend::from_env()?;
    if backend.config().api_key.is_none() {
        warn!(
            subsystem = "api",
            "OPENAI_API_KEY is not set; synthesized answers will fail"
        );
    }

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let state = AppState::new(Arc::new(backend), config.upload_dir.clone());
    let app = router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
