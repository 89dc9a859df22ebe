use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::errors::AppError;
use crate::models::token::SanitizedToken;
use crate::models::user::Identity;
use crate::AppState;

/// GET /v4/pipelines/:id/tokens — list tokens for a pipeline.
///
/// Requires an authenticated non-guest caller who is an admin of the repo
/// backing the pipeline. The real work lives in
/// [`TokenListFlow::list_tokens`](crate::authz::TokenListFlow::list_tokens).
pub async fn list_pipeline_tokens(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<SanitizedToken>>, AppError> {
    let tokens = state.authz.list_tokens(id, &identity).await?;
    Ok(Json(tokens))
}

/// GET /v4/status — liveness probe.
pub async fn status() -> &'static str {
    "OK"
}
