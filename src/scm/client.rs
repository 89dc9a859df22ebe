//! HTTP client for the SCM provider's permission API.
//!
//! One GET per resolution:
//! `GET {base}/v1/repositories/{scm_uri}/collaborators/{username}/permission`
//! returning `{"permission": "admin" | "write" | "read" | "none"}`.
//!
//! A 404 from the provider means the principal is not a collaborator at
//! all, which this client reports as an empty permission set, not an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{PermissionResolver, ScmError};
use crate::models::permission::PermissionSet;
use crate::models::user::User;

pub struct ScmClient {
    base_url: String,
    api_token: Option<String>,
    http: Client,
}

#[derive(Deserialize)]
struct PermissionResponse {
    permission: String,
}

impl ScmClient {
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            api_token,
            http,
        })
    }

    fn permission_url(&self, scm_uri: &str, username: &str) -> String {
        format!(
            "{}/v1/repositories/{}/collaborators/{}/permission",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(scm_uri),
            urlencoding::encode(username),
        )
    }
}

fn from_provider_level(level: &str) -> PermissionSet {
    match level {
        "admin" => PermissionSet::admin(),
        "write" => PermissionSet {
            admin: false,
            push: true,
            pull: true,
        },
        "read" => PermissionSet {
            admin: false,
            push: false,
            pull: true,
        },
        _ => PermissionSet::none(),
    }
}

#[async_trait]
impl PermissionResolver for ScmClient {
    async fn resolve(&self, user: &User, scm_uri: &str) -> Result<PermissionSet, ScmError> {
        let url = self.permission_url(scm_uri, &user.username);

        let mut req = self.http.get(&url);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                ScmError::Timeout
            } else {
                ScmError::Unavailable(e.to_string())
            }
        })?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(PermissionSet::none()),
            status if status.is_success() => {
                let body: PermissionResponse = resp
                    .json()
                    .await
                    .map_err(|e| ScmError::BadResponse(e.to_string()))?;
                Ok(from_provider_level(&body.permission))
            }
            status => Err(ScmError::Unavailable(format!(
                "SCM returned {} for {}",
                status, scm_uri
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_levels_map_to_permission_sets() {
        assert!(from_provider_level("admin").admin);
        let write = from_provider_level("write");
        assert!(!write.admin && write.push && write.pull);
        let read = from_provider_level("read");
        assert!(!read.admin && !read.push && read.pull);
        let none = from_provider_level("none");
        assert!(!none.admin && !none.push && !none.pull);
    }

    #[test]
    fn permission_url_encodes_path_segments() {
        let client = ScmClient::new(
            "https://scm.example.com/",
            None,
            Duration::from_secs(10),
        )
        .unwrap();
        let url = client.permission_url("github.com/org/repo", "alice");
        assert_eq!(
            url,
            "https://scm.example.com/v1/repositories/github.com%2Forg%2Frepo/collaborators/alice/permission"
        );
    }
}
