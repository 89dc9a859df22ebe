use serde::{Deserialize, Serialize};

/// A stored user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub scm_context: String,
}

/// The authenticated principal for one request.
///
/// `(username, scm_context)` is the composite key that identifies a user;
/// `scm_context` names which SCM instance the username is scoped to and may
/// be empty for context-free providers. Produced by the token auth
/// middleware — by the time the core flow sees it, the credential has
/// already been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub scm_context: String,
}
