// Doc Summary API - document summarization and chat gateway over a hosted LLM

pub mod config;
pub mod models;
pub mod types;
pub mod agents;
pub mod extraction;
pub mod llm;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

use llm::{LLMProviderConfig, LLM};
use tokio::net::TcpListener;
use tracing::info;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}

/// Build the shared state from configuration and serve the router until
/// ctrl-c or SIGTERM.
pub async fn serve(listener: TcpListener, config: Config) -> anyhow::Result<()> {
    let llm = LLM::new(LLMProviderConfig::from(&config.llm))?;
    info!(provider = llm.provider_name(), model = %config.llm.model, "Inference client ready");

    let app = create_router(AppState::new(config, llm));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
