use async_trait::async_trait;
use thiserror::Error;

use crate::models::permission::PermissionSet;
use crate::models::user::User;

pub mod client;

pub use client::ScmClient;

/// Transport-level failures talking to the SCM provider.
///
/// "Principal has no access" is NOT an error — the resolver reports it as a
/// normal [`PermissionSet`] with every flag false. Only availability
/// problems land here, and a timeout stays distinguishable so callers can
/// treat it as retryable.
#[derive(Debug, Error)]
pub enum ScmError {
    #[error("SCM request timed out")]
    Timeout,

    #[error("SCM unavailable: {0}")]
    Unavailable(String),

    #[error("unexpected SCM response: {0}")]
    BadResponse(String),
}

/// Resolves a principal's rights on a repository.
///
/// Idempotent and side-effect-free on the SCM; computed fresh per request.
#[async_trait]
pub trait PermissionResolver: Send + Sync {
    async fn resolve(&self, user: &User, scm_uri: &str) -> Result<PermissionSet, ScmError>;
}
