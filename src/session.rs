//! Bearer-token session verification.
//!
//! The portal never issues tokens; clients present an HS256 JWT minted by
//! the sign-in service, sharing the session secret. Verification covers
//! signature and expiry, nothing else.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by the session token. `id` is the backend user id that
/// keys clinic selections and profile fetches; `exp` is seconds since the
/// epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub exp: i64,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Missing bearer credential")]
    Missing,

    #[error("Invalid session token")]
    Invalid,

    #[error("Session token expired")]
    Expired,
}

/// Verified session, attached to request extensions by the auth
/// middleware. The raw token rides along because backend profile fetches
/// re-present it.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub claims: Claims,
}

impl Session {
    pub fn user_id(&self) -> i64 {
        self.claims.id
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, SessionError> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(SessionError::Missing)
}

/// Verify signature and expiry, returning the decoded claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, SessionError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => SessionError::Expired,
        _ => SessionError::Invalid,
    })
}
