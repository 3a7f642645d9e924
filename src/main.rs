use anyhow::Context;
use movie_review_api::api::{self, AppState};
use movie_review_api::config::{AppConfig, DatabaseConfig, StoreBackend};
use movie_review_api::storage::{InMemoryReviewStore, MongoReviewStore, ReviewStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("🚀 Starting Movie Review API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Store: {}", config.database.backend);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // The service must not serve without a store
    info!("💾 Connecting to review store...");
    let store = open_store(&config.database).await?;
    info!("✅ Review store ready");

    let state = AppState::new(store.clone());
    let base_path = config.server.base_path.as_str();
    let app = api::router(state, base_path);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET    /health                - Health check");
    info!("   POST   {}/reviews         - Create review", base_path);
    info!("   GET    {}/reviews         - List reviews", base_path);
    info!("   GET    {}/reviews/{{id}}    - Get review", base_path);
    info!("   PUT    {}/reviews/{{id}}    - Update review", base_path);
    info!("   DELETE {}/reviews/{{id}}    - Delete review", base_path);
    info!("   GET    /api-docs              - Swagger UI");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown().await;
    info!("👋 Server shutting down gracefully");

    Ok(())
}

async fn open_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn ReviewStore>> {
    match config.backend {
        StoreBackend::Mongodb => {
            let store = MongoReviewStore::connect(&config.url, &config.name, &config.collection)
                .await
                .with_context(|| format!("Failed to connect to MongoDB at {}", config.url))?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => Ok(Arc::new(InMemoryReviewStore::new())),
    }
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
