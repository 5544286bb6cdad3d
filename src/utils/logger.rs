// Logger initialization shared by both binaries

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "doc_summary_api=debug,tower_http=debug,axum=info";

/// Install the global tracing subscriber.
///
/// Output goes through a non-blocking stdout writer; keep the returned guard
/// alive for the lifetime of the process or buffered lines are lost on exit.
pub fn init_logger() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    guard
}
