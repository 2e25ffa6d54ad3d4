use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

pub mod password;

pub use password::{hash_password, verify_password};

/// Name of the session cookie carrying the signed token.
pub const SESSION_COOKIE: &str = "auth";

/// Session token claims: who logged in, and when the token dies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i64,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(uid: i64, email: String) -> Self {
        let now = Utc::now();
        let expiry_days = config::config().security.token_expiry_days;
        let exp = (now + Duration::days(expiry_days)).timestamp();

        Self { uid, email, exp, iat: now.timestamp() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token generation error: {0}")]
    Generation(String),
    #[error("Signing secret is not configured")]
    MissingSecret,
}

/// Sign a session token with the configured secret.
pub fn sign_token(claims: &Claims) -> Result<String, TokenError> {
    sign_with_secret(claims, &config::config().security.auth_secret)
}

/// Verify a session token against the configured secret.
///
/// Fails closed: malformed input, a bad signature, an expired token, or a
/// missing secret all yield None. Never panics or errors to the caller.
pub fn verify_token(token: &str) -> Option<Claims> {
    verify_with_secret(token, &config::config().security.auth_secret)
}

pub fn sign_with_secret(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| TokenError::Generation(e.to_string()))
}

pub fn verify_with_secret(token: &str, secret: &str) -> Option<Claims> {
    if secret.is_empty() {
        return None;
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    // Expiry is exact, not "expired a minute ago is still fine"
    validation.leeway = 0;

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .ok()
}
