//! Request-shape handling on the API surface: auth ordering, JSON rejection,
//! and validation errors. Every path exercised here fails before the
//! handlers reach for the connection pool, so no database is needed.

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use folio_api::app;
use folio_api::auth::{sign_token, Claims};

async fn body_json(res: axum::response::Response) -> Result<Value> {
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn session_cookie() -> String {
    let token = sign_token(&Claims::new(1, "a@x.com".to_string())).unwrap();
    format!("auth={}", token)
}

fn put_portfolio(cookie: Option<String>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri("/api/portfolio")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn post_login(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn cors_preflight_is_answered_when_enabled() -> Result<()> {
    // Development config enables CORS, so the preflight never reaches a handler
    let res = app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/portfolio")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    Ok(())
}

#[tokio::test]
async fn put_without_session_is_unauthorized_before_validation() -> Result<()> {
    // Body is garbage on purpose: the session check must come first
    let res = app().oneshot(put_portfolio(None, "{{{")).await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(res).await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn put_with_non_json_body_is_rejected() -> Result<()> {
    let res = app()
        .oneshot(put_portfolio(Some(session_cookie()), "this is not json"))
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await?;
    assert_eq!(body["error"], "Invalid payload");
    Ok(())
}

#[tokio::test]
async fn put_missing_display_name_returns_field_errors() -> Result<()> {
    let payload = json!({ "skills": [{ "name": "Rust" }] }).to_string();
    let res = app()
        .oneshot(put_portfolio(Some(session_cookie()), &payload))
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["displayName"], "Required");
    Ok(())
}

#[tokio::test]
async fn login_rejects_malformed_email() -> Result<()> {
    let payload = json!({ "email": "not-an-email", "password": "secret1" }).to_string();
    let res = app().oneshot(post_login(&payload)).await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await?;
    assert_eq!(body["error"], "Invalid payload");
    Ok(())
}

#[tokio::test]
async fn login_rejects_short_password() -> Result<()> {
    let payload = json!({ "email": "a@x.com", "password": "short" }).to_string();
    let res = app().oneshot(post_login(&payload)).await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_rejects_missing_fields() -> Result<()> {
    let payload = json!({ "email": "a@x.com" }).to_string();
    let res = app().oneshot(post_login(&payload)).await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let res = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await?;
    assert_eq!(body["name"], "Folio API");
    assert!(body["endpoints"]["portfolio"].is_string());
    Ok(())
}
