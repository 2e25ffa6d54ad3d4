use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    AdminUser, ExperienceRow, Portfolio, PortfolioDraft, PortfolioRow, SkillRow,
    StyleSettingsRow, PORTFOLIO_ID,
};

/// Postgres unique_violation
const UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

// ---------------------------------------------------------------------------
// Credential store: the single admin account
// ---------------------------------------------------------------------------

pub struct CredentialStore {
    pool: PgPool,
}

impl CredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create the admin account. A duplicate email maps to Conflict so the
    /// caller can tell "someone already claimed this" apart from a real fault.
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<AdminUser, DatabaseError> {
        let result = sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admin_users (email, password_hash) VALUES ($1, $2) \
             RETURNING id, email, password_hash, created_at",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => {
                info!("Created admin account for {}", email);
                Ok(user)
            }
            Err(e) if is_unique_violation(&e) => {
                Err(DatabaseError::Conflict(format!("Account already exists: {}", email)))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, DatabaseError> {
        let user = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, password_hash, created_at FROM admin_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

// ---------------------------------------------------------------------------
// Portfolio repository: the singleton aggregate at PORTFOLIO_ID
// ---------------------------------------------------------------------------

pub struct PortfolioRepository {
    pool: PgPool,
}

impl PortfolioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the aggregate, creating the placeholder row on first read.
    /// Idempotent: concurrent first reads converge on the same row.
    pub async fn fetch_or_create(&self) -> Result<Portfolio, DatabaseError> {
        if let Some(portfolio) = self.load().await? {
            return Ok(portfolio);
        }

        sqlx::query(
            "INSERT INTO portfolios (id, display_name, headline) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(PORTFOLIO_ID)
        .bind("Your Name")
        .bind("Your headline")
        .execute(&self.pool)
        .await?;

        self.load()
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Portfolio row missing after create".to_string()))
    }

    /// Full-replacement update in one transaction: upsert the scalar columns,
    /// drop and recreate every owned skill and experience, upsert the style
    /// record. Child ids are not preserved across saves. No partial state is
    /// ever visible outside the transaction.
    pub async fn replace(&self, draft: &PortfolioDraft) -> Result<Portfolio, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO portfolios \
                 (id, display_name, headline, bio, contact_email, contact_phone, contact_location, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, now()) \
             ON CONFLICT (id) DO UPDATE SET \
                 display_name = EXCLUDED.display_name, \
                 headline = EXCLUDED.headline, \
                 bio = EXCLUDED.bio, \
                 contact_email = EXCLUDED.contact_email, \
                 contact_phone = EXCLUDED.contact_phone, \
                 contact_location = EXCLUDED.contact_location, \
                 updated_at = now()",
        )
        .bind(PORTFOLIO_ID)
        .bind(&draft.display_name)
        .bind(&draft.headline)
        .bind(&draft.bio)
        .bind(&draft.contact_email)
        .bind(&draft.contact_phone)
        .bind(&draft.contact_location)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM skills WHERE portfolio_id = $1")
            .bind(PORTFOLIO_ID)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM experiences WHERE portfolio_id = $1")
            .bind(PORTFOLIO_ID)
            .execute(&mut *tx)
            .await?;

        for skill in &draft.skills {
            sqlx::query(
                "INSERT INTO skills (portfolio_id, name, level, description) VALUES ($1, $2, $3, $4)",
            )
            .bind(PORTFOLIO_ID)
            .bind(&skill.name)
            .bind(skill.level)
            .bind(&skill.description)
            .execute(&mut *tx)
            .await?;
        }

        for exp in &draft.experiences {
            sqlx::query(
                "INSERT INTO experiences (portfolio_id, title, company, description, start_date, end_date) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(PORTFOLIO_ID)
            .bind(&exp.title)
            .bind(&exp.company)
            .bind(&exp.description)
            .bind(exp.start_date)
            .bind(exp.end_date)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(styles) = &draft.styles {
            sqlx::query(
                "INSERT INTO style_settings \
                     (portfolio_id, navbar_orientation, primary_color, secondary_color, accent_color, \
                      cursor_style, show_cursor, align, enable_3d_scene, scene_3d_type, scene_3d_color, \
                      scene_3d_speed) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
                 ON CONFLICT (portfolio_id) DO UPDATE SET \
                     navbar_orientation = EXCLUDED.navbar_orientation, \
                     primary_color = EXCLUDED.primary_color, \
                     secondary_color = EXCLUDED.secondary_color, \
                     accent_color = EXCLUDED.accent_color, \
                     cursor_style = EXCLUDED.cursor_style, \
                     show_cursor = EXCLUDED.show_cursor, \
                     align = EXCLUDED.align, \
                     enable_3d_scene = EXCLUDED.enable_3d_scene, \
                     scene_3d_type = EXCLUDED.scene_3d_type, \
                     scene_3d_color = EXCLUDED.scene_3d_color, \
                     scene_3d_speed = EXCLUDED.scene_3d_speed",
            )
            .bind(PORTFOLIO_ID)
            .bind(styles.navbar_orientation.as_str())
            .bind(&styles.primary_color)
            .bind(&styles.secondary_color)
            .bind(&styles.accent_color)
            .bind(styles.cursor_style.as_str())
            .bind(styles.show_cursor)
            .bind(styles.align.as_str())
            .bind(styles.enable_3d_scene)
            .bind(styles.scene_3d_type.as_str())
            .bind(&styles.scene_3d_color)
            .bind(styles.scene_3d_speed)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.load()
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Portfolio row missing after update".to_string()))
    }

    async fn load(&self) -> Result<Option<Portfolio>, DatabaseError> {
        let row = sqlx::query_as::<_, PortfolioRow>(
            "SELECT id, display_name, headline, bio, contact_email, contact_phone, \
                    contact_location, photo_url, summary_snippets, updated_at \
             FROM portfolios WHERE id = $1",
        )
        .bind(PORTFOLIO_ID)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let skills = sqlx::query_as::<_, SkillRow>(
            "SELECT id, portfolio_id, name, level, description \
             FROM skills WHERE portfolio_id = $1 ORDER BY id",
        )
        .bind(PORTFOLIO_ID)
        .fetch_all(&self.pool)
        .await?;

        let experiences = sqlx::query_as::<_, ExperienceRow>(
            "SELECT id, portfolio_id, title, company, description, start_date, end_date \
             FROM experiences WHERE portfolio_id = $1 ORDER BY id",
        )
        .bind(PORTFOLIO_ID)
        .fetch_all(&self.pool)
        .await?;

        let styles = sqlx::query_as::<_, StyleSettingsRow>(
            "SELECT portfolio_id, navbar_orientation, primary_color, secondary_color, \
                    accent_color, cursor_style, show_cursor, align, enable_3d_scene, \
                    scene_3d_type, scene_3d_color, scene_3d_speed \
             FROM style_settings WHERE portfolio_id = $1",
        )
        .bind(PORTFOLIO_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(Some(Portfolio::assemble(row, skills, experiences, styles)))
    }
}
