//! The "token" auth strategy: validates a Bearer JWT and hands the trusted
//! [`Identity`] to handlers as a request extension.
//!
//! Guest-tier principals are rejected here, before any handler runs. The
//! core flow never re-validates the credential — by the time it sees an
//! `Identity`, authentication has already happened.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::user::Identity;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub scm_context: String,
    #[serde(default)]
    pub scope: Vec<String>,
    pub exp: usize,
}

/// Sign a claims set with the shared secret (HS256).
pub fn issue(secret: &str, claims: &Claims) -> anyhow::Result<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

fn verify(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthenticated(format!("invalid token: {}", e)))
}

pub async fn token_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or_else(|| AppError::Unauthenticated("missing bearer token".into()))?;

    let claims = verify(&state.config.jwt_secret, token)?;

    // Required scope: user, and never guest.
    if !claims.scope.iter().any(|s| s == "user") {
        return Err(AppError::Unauthenticated("user scope required".into()));
    }
    if claims.scope.iter().any(|s| s == "guest") {
        return Err(AppError::Unauthenticated(
            "guest credentials cannot access this route".into(),
        ));
    }
    if claims.username.is_empty() {
        return Err(AppError::Unauthenticated("empty username".into()));
    }

    req.extensions_mut().insert(Identity {
        username: claims.username,
        scm_context: claims.scm_context,
    });

    Ok(next.run(req).await)
}
