//! ClaimCheck Server
//!
//! Extracts text from uploaded policy documents and adjudicates claim
//! queries against them with a schema-constrained language model.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use claimcheck_server::analysis::{GeminiProvider, StructuredGenerator};
use claimcheck_server::config::Config;
use claimcheck_server::mupdf::MupdfLoader;
use claimcheck_server::routes;
use claimcheck_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "claimcheck_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config =
        Config::from_env().context("GEMINI_API_KEY (or API_KEY) must be set to start the server")?;

    tracing::info!("Starting ClaimCheck Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Model: {} via {}", config.gemini.model, config.gemini.base_url);
    tracing::info!("Upload limit: {} bytes", config.upload.max_bytes);

    let generator: Arc<dyn StructuredGenerator> = Arc::new(
        GeminiProvider::new(&config.gemini).context("Failed to initialize model provider")?,
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let app_state = AppState::new(config, Arc::new(MupdfLoader), generator);
    let app = routes::app(app_state);

    // Start server with graceful shutdown
    tracing::info!("ClaimCheck Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
