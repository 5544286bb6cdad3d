use tokio::net::TcpListener;
use tracing::info;
use doc_summary_api::{config::Config, serve, utils::init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!(server = ?config.server, llm = ?config.llm, "Configuration loaded");

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    serve(listener, config).await
}
