use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cineflix_api::api::{create_router, AppState};
use cineflix_api::catalog::Catalog;
use cineflix_api::config::Config;
use cineflix_api::db;
use cineflix_api::services::providers::{GeminiProvider, TextCompletion};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cineflix_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load the catalog and build the engine state
    let catalog = Catalog::load(&config.catalog_path)?;
    tracing::info!(movies = catalog.len(), path = %config.catalog_path, "Catalog loaded");

    let pool = db::create_pool(&config.database_url).await?;
    db::init_schema(&pool).await?;
    tracing::info!("Database ready");

    let completion: Option<Arc<dyn TextCompletion>> = match &config.gemini_api_key {
        Some(key) => {
            tracing::info!(model = %config.gemini_model, "Gemini completion enabled");
            Some(Arc::new(GeminiProvider::new(
                key.clone(),
                config.gemini_api_url.clone(),
                config.gemini_model.clone(),
            )))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, mood detection and chat run on local rules");
            None
        }
    };

    let (state, writer_handle) = AppState::new(catalog, completion, pool, config.rng_seed);
    let app = create_router(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush queued interaction writes before exiting
    writer_handle.shutdown().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves when Ctrl+C or SIGTERM arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}
