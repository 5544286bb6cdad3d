// Azure Functions custom handler entry point.
//
// The Functions host starts this binary and forwards every HTTP trigger to it
// on FUNCTIONS_CUSTOMHANDLER_PORT (see deploy/azure/host.json).

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use doc_summary_api::{config::Config, serve, utils::init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = init_logger();

    let config = Config::from_env()?
        .for_azure_functions(std::env::var("FUNCTIONS_CUSTOMHANDLER_PORT").ok())?;
    info!(server = ?config.server, llm = ?config.llm, "Configuration loaded");

    // The host only talks to the handler over loopback
    let addr = SocketAddr::from(([127, 0, 0, 1], config.server.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Custom handler listening on {}", addr);

    serve(listener, config).await
}
