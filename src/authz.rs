//! The authorization-and-assembly flow behind `GET /v4/pipelines/{id}/tokens`.
//!
//! Fetch the pipeline and the requesting user concurrently, validate both
//! exist, resolve the user's permission on the pipeline's repository against
//! the SCM, require admin, then sanitize the pipeline's tokens for the
//! caller. Read-only end to end; every failure maps to one [`AppError`]
//! variant.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::pipeline::Pipeline;
use crate::models::token::SanitizedToken;
use crate::models::user::{Identity, User};
use crate::scm::PermissionResolver;

/// Read access to stored pipelines. Absence is a normal `None`, never an
/// error — only the flow decides that absence means 404.
#[async_trait]
pub trait PipelineRepository: Send + Sync {
    async fn get(&self, id: i64) -> anyhow::Result<Option<Pipeline>>;
}

/// Read access to stored users, keyed by `(username, scm_context)`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, identity: &Identity) -> anyhow::Result<Option<User>>;
}

/// The core flow with its collaborators injected, so tests can substitute
/// doubles for storage and the SCM.
#[derive(Clone)]
pub struct TokenListFlow {
    pipelines: Arc<dyn PipelineRepository>,
    users: Arc<dyn UserRepository>,
    permissions: Arc<dyn PermissionResolver>,
}

impl TokenListFlow {
    pub fn new(
        pipelines: Arc<dyn PipelineRepository>,
        users: Arc<dyn UserRepository>,
        permissions: Arc<dyn PermissionResolver>,
    ) -> Self {
        Self {
            pipelines,
            users,
            permissions,
        }
    }

    /// List the tokens of `pipeline_id`, visible only to pipeline admins.
    ///
    /// The two lookups are independent and run concurrently, but both must
    /// finish before either result is inspected. Pipeline absence is checked
    /// before user absence regardless of completion order — downstream
    /// consumers branch on which 404 reason they receive, so the precedence
    /// is fixed.
    pub async fn list_tokens(
        &self,
        pipeline_id: i64,
        identity: &Identity,
    ) -> Result<Vec<SanitizedToken>, AppError> {
        let (pipeline, user) = tokio::join!(
            self.pipelines.get(pipeline_id),
            self.users.get(identity),
        );

        let pipeline = pipeline?.ok_or(AppError::PipelineNotFound)?;
        let user = user?.ok_or(AppError::UserNotFound)?;

        let permissions = self.permissions.resolve(&user, &pipeline.scm_uri).await?;
        if !permissions.admin {
            tracing::info!(
                username = %user.username,
                pipeline_id,
                "token listing denied: not a repo admin"
            );
            return Err(AppError::NotPipelineAdmin {
                username: user.username,
            });
        }

        Ok(pipeline.tokens.iter().map(|t| t.sanitize()).collect())
    }
}
