//! HTTP layer - axum router, shared state, and JSON envelope.
//!
//! Handlers are thin: they extract input, call into [`crate::core`], and wrap the
//! result in [`response::ApiResponse`]. Errors convert to responses through the
//! `IntoResponse` impl on [`crate::errors::Error`].

/// Input extractors with enveloped rejections
pub mod extract;
/// Response envelope and status mapping
pub mod response;
/// Handlers organized by resource
pub mod routes;

use crate::config::server::DEFAULT_MAX_BODY_BYTES;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use response::ApiResponse;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// State shared by every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Pooled database connection, owned by process startup
    pub db: Arc<DatabaseConnection>,
    /// Maximum accepted request body size
    pub max_body_bytes: usize,
}

impl AppState {
    /// Creates state around an established connection with the default body limit.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db: Arc::new(db),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

async fn health() -> ApiResponse<()> {
    ApiResponse::message("ok")
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.max_body_bytes;
    Router::new()
        .route("/health", get(health))
        .route(
            "/content",
            get(routes::content::list_section).post(routes::content::upsert),
        )
        .route("/content/batch", post(routes::content::batch_upsert))
        .route("/content/:section/:key", get(routes::content::get_value))
        .route(
            "/exam-papers",
            get(routes::exam_papers::list).post(routes::exam_papers::create),
        )
        .route(
            "/exam-papers/:id",
            get(routes::exam_papers::get).delete(routes::exam_papers::delete),
        )
        .route(
            "/exam-papers/:id/status",
            put(routes::exam_papers::set_status),
        )
        .route(
            "/exam-papers/:id/questions",
            get(routes::exam_papers::list_questions),
        )
        .route("/questions", post(routes::questions::create))
        .route(
            "/questions/:id",
            get(routes::questions::get).delete(routes::questions::delete),
        )
        .route(
            "/backgrounds",
            get(routes::backgrounds::list).post(routes::backgrounds::create),
        )
        .route("/backgrounds/active", get(routes::backgrounds::active))
        .route(
            "/backgrounds/:id",
            axum::routing::delete(routes::backgrounds::delete),
        )
        .route(
            "/backgrounds/:id/activate",
            put(routes::backgrounds::activate),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::server::ServerConfig;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_state_body_limit_matches_server_default() {
        let state = AppState::new(MockDatabase::new(DatabaseBackend::Sqlite).into_connection());
        assert_eq!(state.max_body_bytes, ServerConfig::default().max_body_bytes);
        assert_eq!(state.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }
}
