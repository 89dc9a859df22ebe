use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::scm::ScmError;

/// Every failure the API can surface. Each variant maps to exactly one
/// external status; nothing is swallowed and no fallback value is ever
/// substituted for a missing resource or a denied permission.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Pipeline does not exist")]
    PipelineNotFound,

    #[error("User does not exist")]
    UserNotFound,

    #[error("User {username} is not an admin of this repo")]
    NotPipelineAdmin { username: String },

    #[error("credentials missing or not valid")]
    Unauthenticated(String),

    #[error("SCM error: {0}")]
    Scm(#[from] ScmError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::PipelineNotFound | AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::NotPipelineAdmin { .. } | AppError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Scm(ScmError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Scm(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Never leak storage or SCM internals to the caller.
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("database error: {}", e);
                "internal server error".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {}", e);
                "internal server error".to_string()
            }
            AppError::Scm(e) => {
                tracing::warn!("SCM call failed: {}", e);
                "SCM provider request failed".to_string()
            }
            AppError::Unauthenticated(reason) => {
                tracing::debug!("auth rejected: {}", reason);
                "Missing or invalid credentials".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "statusCode": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": message,
        }));

        (status, body).into_response()
    }
}
