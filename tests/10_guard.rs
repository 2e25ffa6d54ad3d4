//! Session guard behavior on the admin page, driven in-process.
//!
//! None of these requests touch the database: the guard decides before any
//! handler runs, and the editor shell handler is static.

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use folio_api::app;
use folio_api::auth::{sign_token, sign_with_secret, Claims};

fn admin_request(cookie: Option<String>) -> Request<Body> {
    admin_request_at("/hiddenpage", cookie)
}

fn admin_request_at(uri: &str, cookie: Option<String>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn unauthenticated_admin_request_redirects_to_root() -> Result<()> {
    let res = app().oneshot(admin_request(None)).await?;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");
    Ok(())
}

#[tokio::test]
async fn garbage_cookie_redirects_to_root() -> Result<()> {
    let res = app()
        .oneshot(admin_request(Some("auth=not-a-real-token".to_string())))
        .await?;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");
    Ok(())
}

#[tokio::test]
async fn token_signed_with_wrong_secret_redirects() -> Result<()> {
    let claims = Claims::new(1, "a@x.com".to_string());
    let forged = sign_with_secret(&claims, "attacker-secret")?;

    let res = app()
        .oneshot(admin_request(Some(format!("auth={}", forged))))
        .await?;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    Ok(())
}

#[tokio::test]
async fn valid_session_reaches_the_editor() -> Result<()> {
    let token = sign_token(&Claims::new(1, "a@x.com".to_string()))?;

    let res = app()
        .oneshot(admin_request(Some(format!("auth={}", token))))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn admin_sub_paths_are_guarded_too() -> Result<()> {
    let res = app()
        .oneshot(admin_request_at("/hiddenpage/settings", None))
        .await?;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");
    Ok(())
}

#[tokio::test]
async fn valid_session_reaches_admin_sub_paths() -> Result<()> {
    let token = sign_token(&Claims::new(1, "a@x.com".to_string()))?;

    let res = app()
        .oneshot(admin_request_at(
            "/hiddenpage/settings",
            Some(format!("auth={}", token)),
        ))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn cookie_is_found_among_other_cookies() -> Result<()> {
    let token = sign_token(&Claims::new(1, "a@x.com".to_string()))?;

    let res = app()
        .oneshot(admin_request(Some(format!("theme=dark; auth={}; lang=en", token))))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
