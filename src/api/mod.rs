use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::auth;
use crate::AppState;

pub mod handlers;

/// Build the v4 API router. All routes are relative — the caller mounts
/// this under `/v4`. The status probe is registered after the auth layer so
/// it stays unauthenticated.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/pipelines/:id/tokens",
            get(handlers::list_pipeline_tokens),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::token_auth,
        ))
        .route("/status", get(handlers::status))
        .layer(TraceLayer::new_for_http())
        .fallback(fallback_404)
        .with_state(state)
}

async fn fallback_404() -> StatusCode {
    StatusCode::NOT_FOUND
}
