//! Shared harness for tests that need a live Postgres instance.
//!
//! Tests call [`acquire_db`] first: it skips (returns `None`) when
//! `DATABASE_URL` is not set, and otherwise serializes database access so
//! tests in one binary cannot interleave their truncate/read/write cycles.

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use serde_json::Value;
use std::sync::OnceLock;
use tokio::sync::{Mutex, MutexGuard};

use folio_api::auth::{sign_token, Claims};
use folio_api::database::DatabaseManager;

static DB_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub async fn acquire_db() -> Option<MutexGuard<'static, ()>> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    }
    let guard = DB_LOCK.get_or_init(|| Mutex::new(())).lock().await;
    DatabaseManager::migrate()
        .await
        .expect("schema migration failed");
    Some(guard)
}

pub async fn reset_tables() -> Result<()> {
    let pool = DatabaseManager::pool().await?;
    sqlx::query(
        "TRUNCATE admin_users, portfolios, skills, experiences, style_settings \
         RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;
    Ok(())
}

pub async fn body_json(res: axum::response::Response) -> Result<Value> {
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn session_cookie() -> String {
    let token = sign_token(&Claims::new(1, "a@x.com".to_string())).unwrap();
    format!("auth={}", token)
}

pub fn get_portfolio() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/portfolio")
        .body(Body::empty())
        .unwrap()
}

pub fn put_portfolio(body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/api/portfolio")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, session_cookie())
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_login(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "email": email, "password": password }).to_string(),
        ))
        .unwrap()
}
