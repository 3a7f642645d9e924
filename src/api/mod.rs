pub mod docs;
pub mod models;
pub mod review;

// Re-exports
pub use models::*;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

// Health handler (simple, keep here)
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, store) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "up"),
        Err(e) => {
            warn!("Store ping failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "down")
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: store.to_string(),
        }),
    )
}

/// Build the full application router.
///
/// Review routes live under `base_path` (empty for the root); health and
/// docs are always at the root.
pub fn router(state: AppState, base_path: &str) -> Router {
    let reviews = review::routes();
    let reviews = if base_path.is_empty() || base_path == "/" {
        reviews
    } else {
        Router::new().nest(base_path, reviews)
    };

    Router::new()
        .route("/health", get(health_handler))
        .merge(reviews)
        .merge(docs::routes(base_path))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
