//! Out-of-band admin provisioning.
//!
//! Creates the admin account and the placeholder portfolio row without going
//! through the login endpoint's bootstrap path. Intended to be run once at
//! deploy time; safe to re-run (an existing account is left untouched).

use anyhow::{Context, Result};
use clap::Parser;

use folio_api::auth::hash_password;
use folio_api::database::manager::DatabaseError;
use folio_api::database::{CredentialStore, DatabaseManager, PortfolioRepository};

#[derive(Parser)]
#[command(name = "seed_admin")]
#[command(about = "Provision the admin account and placeholder portfolio")]
#[command(version)]
struct Args {
    /// Admin email (falls back to ADMIN_EMAIL, then admin@example.com)
    #[arg(long)]
    email: Option<String>,

    /// Admin password (falls back to ADMIN_PASSWORD, then admin123)
    #[arg(long)]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let email = args
        .email
        .or_else(|| std::env::var("ADMIN_EMAIL").ok())
        .unwrap_or_else(|| "admin@example.com".to_string());
    let password = args
        .password
        .or_else(|| std::env::var("ADMIN_PASSWORD").ok())
        .unwrap_or_else(|| "admin123".to_string());

    DatabaseManager::migrate()
        .await
        .context("failed to prepare database schema")?;

    let pool = DatabaseManager::pool().await?;

    let hash = hash_password(&password).context("failed to hash password")?;
    let store = CredentialStore::new(pool.clone());
    match store.create(&email, &hash).await {
        Ok(_) => println!("Created admin account: {}", email),
        Err(DatabaseError::Conflict(_)) => println!("Admin account already exists: {}", email),
        Err(e) => return Err(e).context("failed to create admin account"),
    }

    // Make sure the public page has something to show
    let portfolio = PortfolioRepository::new(pool).fetch_or_create().await?;
    println!("Seed complete. Portfolio id: {}", portfolio.id);

    Ok(())
}
