use serde::{Deserialize, Serialize};

use super::token::Token;

/// A CI/CD pipeline and the tokens it owns.
///
/// `scm_uri` is the canonical locator of the backing repository as the SCM
/// understands it (e.g. `github.com/org/repo`). The token collection is
/// materialized alongside the pipeline by the repository read, ordered by
/// token id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: i64,
    pub scm_uri: String,
    pub tokens: Vec<Token>,
}
