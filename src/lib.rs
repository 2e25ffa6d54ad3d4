use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

/// Build the application router. Lives in the library so integration tests
/// can drive it in-process.
pub fn app() -> Router {
    let api = &config::config().api;

    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Content API: public read, session-checked write (the PUT handler
        // enforces the session itself so both methods share the route)
        .route(
            "/api/portfolio",
            get(handlers::portfolio::portfolio_get).put(handlers::portfolio::portfolio_put),
        )
        // Login
        .route("/api/auth/login", post(handlers::auth::login_post))
        // Admin pages behind the session guard
        .nest("/hiddenpage", admin_routes());

    // Global middleware, per config
    if api.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    if api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

/// Everything under the admin prefix sits behind the guard; sub-paths serve
/// the same editor shell so client-side routing works.
fn admin_routes() -> Router {
    Router::new()
        .route("/", get(handlers::admin::editor_get))
        .route("/*rest", get(handlers::admin::editor_get))
        .layer(from_fn(middleware::page_guard))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Folio API",
        "version": version,
        "description": "Portfolio CMS backend built with Rust (Axum)",
        "endpoints": {
            "portfolio": "GET /api/portfolio (public), PUT /api/portfolio (session)",
            "login": "POST /api/auth/login (public)",
            "admin": "GET /hiddenpage (session)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
