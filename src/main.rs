use folio_api::{app, config, database::DatabaseManager};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Folio API in {:?} mode", config.environment);

    // Best effort: a missing database at boot keeps the server up with
    // /health reporting degraded until the store comes back.
    if let Err(e) = DatabaseManager::migrate().await {
        tracing::warn!("Startup migration failed, continuing degraded: {}", e);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("FOLIO_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Folio API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
