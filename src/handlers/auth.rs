use axum::{
    extract::rejection::JsonRejection,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{hash_password, sign_token, verify_password, Claims, SESSION_COOKIE};
use crate::config;
use crate::database::manager::DatabaseError;
use crate::database::{CredentialStore, DatabaseManager};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login - Verify admin credentials and set the session cookie
///
/// Validation runs before any persistence side effect. When the credential
/// store is empty and bootstrap login is enabled (development default), the
/// submitted credentials become the permanent admin account. Both unknown
/// email and bad password answer with the same 401 body.
pub async fn login_post(
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|_| ApiError::invalid_json("Invalid payload"))?;

    if !is_valid_email(&req.email) || req.password.len() < 6 {
        return Err(ApiError::bad_request("Invalid payload"));
    }

    let pool = DatabaseManager::pool().await?;
    let store = CredentialStore::new(pool);

    if config::config().security.allow_bootstrap_login && store.count().await? == 0 {
        let hash = hash_password(&req.password).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::internal_server_error("An error occurred while processing your request")
        })?;

        match store.create(&req.email, &hash).await {
            Ok(_) => {
                tracing::warn!("Bootstrapped admin account from first login: {}", req.email);
            }
            // Lost a concurrent bootstrap race; the existing account stands
            // and the submitted credentials are checked against it below.
            Err(DatabaseError::Conflict(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let user = store
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = sign_token(&Claims::new(user.id, user.email.clone()))?;

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(json!({ "ok": true })),
    ))
}

fn session_cookie(token: &str) -> String {
    let max_age = config::config().security.token_expiry_days * 24 * 60 * 60;
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
}

/// Syntactic email check only; deliverability is not this endpoint's problem.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.') && !domain.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("admin@mail.example.org"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok");
        assert!(cookie.starts_with("auth=tok; "));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        // 7 days
        assert!(cookie.contains("Max-Age=604800"));
    }
}
