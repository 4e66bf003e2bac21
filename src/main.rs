use anyhow::Context;
use message_search::cache::MessageCache;
use message_search::config::{BackendKind, Config};
use message_search::ingestion::{HttpUpstreamClient, Ingestor, UpstreamClient};
use message_search::search::handlers::SharedBackend;
use message_search::search::{RankedSearch, SubstringSearch};
use message_search::server::build_router;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    config.apply_args(&args)?;

    tracing::info!(
        "Starting message search ({:?} backend) upstream={}",
        config.backend,
        config.upstream_url
    );

    // 1. Upstream + ingestion:
    let client: Arc<dyn UpstreamClient> = Arc::new(
        HttpUpstreamClient::new(&config.upstream_url, config.upstream_timeout)
            .context("failed to build upstream HTTP client")?,
    );
    let ingestor = Ingestor::new(client)
        .with_page_window(config.page_window)
        .with_max_pages(config.max_pages);

    // 2. Search backend, fully loaded before any traffic is accepted:
    let backend: SharedBackend = match config.backend {
        BackendKind::Memory => {
            let cache = MessageCache::new();
            ingestor
                .load_into(&cache)
                .await
                .context("startup ingestion failed")?;
            Arc::new(SubstringSearch::new(cache))
        }
        BackendKind::Sqlite => {
            let store = RankedSearch::open(&config.db_path)
                .with_context(|| format!("failed to open {}", config.db_path.display()))?;
            if config.db_import {
                let (messages, report) = ingestor.run().await.context("startup ingestion failed")?;
                let written = store.import(messages).await?;
                tracing::info!(
                    "Imported {} messages into {} ({} pages)",
                    written,
                    config.db_path.display(),
                    report.pages
                );
            }
            Arc::new(store)
        }
    };

    // 3. HTTP Router:
    let app = build_router(backend, config.cors_origins.as_deref());

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
    }
}
