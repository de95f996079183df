//! enrich-snippet - search indexer web API skill.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use enrich_snippet::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let default_filter = if cli::is_verbose() {
        "enrich_snippet=debug"
    } else {
        "enrich_snippet=info"
    };

    // Logs go to stderr so `enrich` output on stdout stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli::run().await
}
