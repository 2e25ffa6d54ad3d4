use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Connection pool owner for the single application database.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Get the shared pool, creating it on first use from DATABASE_URL.
    ///
    /// A failed connect is not cached; the next caller retries.
    pub async fn pool() -> Result<PgPool, DatabaseError> {
        let pool = POOL
            .get_or_try_init(|| async {
                let url = Self::database_url()?;
                let db = config::config().database.clone();

                let pool = PgPoolOptions::new()
                    .max_connections(db.max_connections)
                    .acquire_timeout(Duration::from_secs(db.acquire_timeout_secs))
                    .connect(&url)
                    .await?;

                info!("Created database pool");
                Ok::<_, DatabaseError>(pool)
            })
            .await?;

        Ok(pool.clone())
    }

    fn database_url() -> Result<String, DatabaseError> {
        let raw = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;

        // Validate early so a typo surfaces as config error, not a connect error
        url::Url::parse(&raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        Ok(raw)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Create the schema if it does not exist yet. Idempotent.
    pub async fn migrate() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        Self::run_migrations(&pool).await
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), DatabaseError> {
        info!("Running database migrations");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admin_users (
                id BIGSERIAL PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
        "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS portfolios (
                id BIGINT PRIMARY KEY,
                display_name TEXT NOT NULL,
                headline TEXT,
                bio TEXT,
                contact_email TEXT,
                contact_phone TEXT,
                contact_location TEXT,
                photo_url TEXT,
                summary_snippets TEXT,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
        "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS skills (
                id BIGSERIAL PRIMARY KEY,
                portfolio_id BIGINT NOT NULL REFERENCES portfolios(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                level INT,
                description TEXT
            )
        "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS experiences (
                id BIGSERIAL PRIMARY KEY,
                portfolio_id BIGINT NOT NULL REFERENCES portfolios(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                company TEXT,
                description TEXT,
                start_date DATE,
                end_date DATE
            )
        "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS style_settings (
                portfolio_id BIGINT PRIMARY KEY REFERENCES portfolios(id) ON DELETE CASCADE,
                navbar_orientation TEXT NOT NULL DEFAULT 'HORIZONTAL',
                primary_color TEXT,
                secondary_color TEXT,
                accent_color TEXT,
                cursor_style TEXT NOT NULL DEFAULT 'GLOW_WINDY',
                show_cursor BOOLEAN NOT NULL DEFAULT true,
                align TEXT NOT NULL DEFAULT 'LEFT',
                enable_3d_scene BOOLEAN NOT NULL DEFAULT true,
                scene_3d_type TEXT NOT NULL DEFAULT 'ANIMATED_SPHERE',
                scene_3d_color TEXT,
                scene_3d_speed DOUBLE PRECISION NOT NULL DEFAULT 1.0
            )
        "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_skills_portfolio_id ON skills(portfolio_id)")
            .execute(pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_experiences_portfolio_id ON experiences(portfolio_id)",
        )
        .execute(pool)
        .await?;

        info!("Database migrations completed");
        Ok(())
    }
}
