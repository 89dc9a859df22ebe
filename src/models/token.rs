use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A pipeline API token as the store holds it.
///
/// `user_id` and `pipeline_id` are ownership back-references used for
/// internal bookkeeping only. They must never appear in a response; see
/// [`Token::sanitize`]. Fields the store adds later land in `extra` via
/// serde flatten and survive sanitization untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub last_used: Option<DateTime<Utc>>,
    pub user_id: i64,
    pub pipeline_id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The externally visible shape of a token: everything except the two
/// linkage fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedToken {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub last_used: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Token {
    /// Strip the internal linkage fields. Pure and non-mutating — the source
    /// record may be shared or cached elsewhere.
    pub fn sanitize(&self) -> SanitizedToken {
        SanitizedToken {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            last_used: self.last_used,
            extra: self.extra.clone(),
        }
    }
}
