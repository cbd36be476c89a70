use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::session_middleware;

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/api/movies", get(handlers::get_movies))
        // Recommendation engine
        .route("/api/recommend", post(handlers::recommend))
        .route("/api/parallel-universe", post(handlers::parallel_universe))
        .route("/api/cinesound", post(handlers::cinesound))
        // Interactions and profile
        .route("/api/view", post(handlers::record_view))
        .route("/api/like", post(handlers::record_like))
        .route("/api/profile", get(handlers::get_profile))
        // Preferences
        .route("/api/preferences", get(handlers::get_preferences))
        .route("/api/preferences", post(handlers::put_preferences))
        // Chat
        .route("/api/chatbot", post(handlers::chat))
        .layer(middleware::from_fn(session_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
