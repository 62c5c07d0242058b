//! Database initialization
//!
//! Creates the SQLite database on first run, applies the schema idempotently,
//! and seeds default settings. Safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::{info, warn};

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Schema creation (idempotent - safe to call multiple times)
    create_settings_table(&pool).await?;
    create_users_table(&pool).await?;
    create_sessions_table(&pool).await?;
    create_campaigns_table(&pool).await?;
    create_pledges_table(&pool).await?;
    create_comments_table(&pool).await?;
    create_polls_tables(&pool).await?;
    create_surveys_tables(&pool).await?;
    create_team_members_table(&pool).await?;
    create_milestones_table(&pool).await?;
    create_contribution_events_table(&pool).await?;
    create_signal_scores_table(&pool).await?;

    init_default_settings(&pool).await?;

    Ok(pool)
}

/// Create the settings table
///
/// Stores operational key-value configuration.
pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            guid TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL DEFAULT '',
            password_hash TEXT NOT NULL,
            password_salt TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(username) >= 3)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create Anonymous user if it doesn't exist
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO users (guid, username, display_name, password_hash, password_salt)
        VALUES (?, 'anonymous', 'Anonymous', '', '')
        "#,
    )
    .bind(super::ANONYMOUS_USER_GUID)
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token_hash TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            expires_at TIMESTAMP NOT NULL,
            CHECK (length(token_hash) = 64)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_expires ON sessions(expires_at)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the campaigns table
///
/// A campaign is a request aimed at a brand; supporters pledge to it.
pub async fn create_campaigns_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS campaigns (
            guid TEXT PRIMARY KEY,
            creator_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            title TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            brand_name TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'general',
            description TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'active'
                CHECK (status IN ('draft', 'active', 'delivered', 'closed')),
            pledge_goal INTEGER NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(title) > 0),
            CHECK (pledge_goal > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_campaigns_status ON campaigns(status)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_campaigns_brand ON campaigns(brand_name)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_campaigns_category ON campaigns(category)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_campaigns_created ON campaigns(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the pledges table
///
/// One lobby per user per campaign, enforced by the unique constraint.
pub async fn create_pledges_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pledges (
            guid TEXT PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(guid) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            amount_cents INTEGER NOT NULL DEFAULT 0,
            note TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (campaign_id, user_id),
            CHECK (amount_cents >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_pledges_campaign ON pledges(campaign_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_pledges_user ON pledges(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_pledges_created ON pledges(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_comments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            guid TEXT PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(guid) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            body TEXT NOT NULL,
            sentiment REAL NOT NULL DEFAULT 0.0,
            sentiment_label TEXT NOT NULL DEFAULT 'neutral'
                CHECK (sentiment_label IN ('positive', 'neutral', 'negative')),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(body) > 0),
            CHECK (sentiment >= -1.0 AND sentiment <= 1.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_campaign ON comments(campaign_id, created_at)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_polls_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS creator_polls (
            guid TEXT PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(guid) ON DELETE CASCADE,
            question TEXT NOT NULL,
            options TEXT NOT NULL,
            closes_at TIMESTAMP,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(question) > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_polls_campaign ON creator_polls(campaign_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS poll_votes (
            poll_id TEXT NOT NULL REFERENCES creator_polls(guid) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            option_index INTEGER NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (poll_id, user_id),
            CHECK (option_index >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_poll_votes_poll ON poll_votes(poll_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_surveys_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS surveys (
            guid TEXT PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(guid) ON DELETE CASCADE,
            title TEXT NOT NULL,
            questions TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(title) > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_surveys_campaign ON surveys(campaign_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS survey_responses (
            guid TEXT PRIMARY KEY,
            survey_id TEXT NOT NULL REFERENCES surveys(guid) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            answers TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (survey_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_survey_responses_survey ON survey_responses(survey_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_team_members_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_members (
            campaign_id TEXT NOT NULL REFERENCES campaigns(guid) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            role TEXT NOT NULL DEFAULT 'supporter'
                CHECK (role IN ('owner', 'organizer', 'supporter')),
            joined_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (campaign_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_team_members_user ON team_members(user_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the milestones table
///
/// Thresholds are pledge counts; reached_at is stamped exactly once when the
/// campaign's pledge count first crosses the threshold.
pub async fn create_milestones_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS milestones (
            guid TEXT PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(guid) ON DELETE CASCADE,
            label TEXT NOT NULL,
            threshold INTEGER NOT NULL,
            reached_at TIMESTAMP,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (campaign_id, threshold),
            CHECK (threshold > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_milestones_campaign ON milestones(campaign_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_contribution_events_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contribution_events (
            guid TEXT PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(guid) ON DELETE CASCADE,
            user_id TEXT REFERENCES users(guid) ON DELETE SET NULL,
            event_type TEXT NOT NULL CHECK (event_type IN (
                'campaign_created', 'pledge_added', 'pledge_removed',
                'comment_added', 'poll_created', 'poll_vote',
                'survey_response', 'member_joined', 'milestone_reached'
            )),
            detail TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_events_campaign ON contribution_events(campaign_id, created_at)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_events_created ON contribution_events(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_signal_scores_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS signal_scores (
            campaign_id TEXT PRIMARY KEY REFERENCES campaigns(guid) ON DELETE CASCADE,
            score REAL NOT NULL,
            tier TEXT NOT NULL,
            factors TEXT NOT NULL,
            computed_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (score >= 0.0 AND score <= 100.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize or update default settings
///
/// Ensures all required settings exist with default values and resets NULL
/// values to defaults.
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    // HTTP server settings
    ensure_setting(pool, "http_port", "5730").await?;

    // Session settings
    ensure_setting(pool, "session_ttl_seconds", "2592000").await?; // 30 days

    // Pagination settings
    ensure_setting(pool, "feed_page_size", "50").await?;
    ensure_setting(pool, "list_page_size", "25").await?;

    // Signal score cache settings
    ensure_setting(pool, "score_stale_after_seconds", "300").await?; // 5 minutes

    info!("Default settings initialized");
    Ok(())
}

/// Ensure a setting exists with the specified default value
///
/// If the setting doesn't exist, it will be created with the default.
/// If the setting exists but has a NULL value, it will be reset to the default.
pub async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM settings WHERE key = ?)")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if !exists {
        // INSERT OR IGNORE handles concurrent initialization race conditions
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(default_value)
            .execute(pool)
            .await?;

        info!("Initialized setting '{}' with default value: {}", key, default_value);
        return Ok(());
    }

    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if value.is_none() {
        sqlx::query("UPDATE settings SET value = ? WHERE key = ?")
            .bind(default_value)
            .bind(key)
            .execute(pool)
            .await?;

        warn!("Setting '{}' was NULL, reset to default: {}", key, default_value);
    }

    Ok(())
}
