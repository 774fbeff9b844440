//! Database access layer
//!
//! Opens the SQLite pool and creates the schema on first run. Foreign keys and
//! cascade deletes are declared in the schema itself; duplicate prevention is
//! backed by UNIQUE constraints rather than application-level probes.

use crate::config::Config;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub mod models;
pub mod progress;
pub mod reviews;
pub mod users;
pub mod videos;

/// Open the connection pool and initialize the schema.
///
/// The pool is bounded by the configured base size plus a burst overflow
/// allowance. Connect options are applied to every pooled connection: cascade
/// deletes depend on foreign keys being on, and WAL mode lets concurrent
/// request handlers read while one writes.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections())
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    info!("Database ready: {}", config.database_url);

    Ok(pool)
}

/// Create all tables if they do not exist (idempotent, safe on every start)
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS videos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            youtube_id TEXT NOT NULL UNIQUE,
            mentor_email TEXT NOT NULL,
            category TEXT NOT NULL,
            display_order INTEGER NOT NULL,
            title TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            publication_date TEXT NOT NULL,
            views INTEGER NOT NULL DEFAULT 0,
            likes INTEGER NOT NULL DEFAULT 0,
            average_rating REAL NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS progress (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            video_id INTEGER NOT NULL REFERENCES videos(id) ON DELETE CASCADE,
            mentee_email TEXT NOT NULL,
            watched INTEGER NOT NULL DEFAULT 0,
            UNIQUE(video_id, mentee_email)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            video_id INTEGER NOT NULL REFERENCES videos(id) ON DELETE CASCADE,
            mentee_email TEXT NOT NULL,
            stars INTEGER NOT NULL CHECK (stars BETWEEN 1 AND 5),
            comment TEXT,
            created_at TEXT NOT NULL,
            UNIQUE(video_id, mentee_email)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            logged_in INTEGER NOT NULL DEFAULT 0,
            picture TEXT NOT NULL DEFAULT '',
            track TEXT NOT NULL DEFAULT '',
            mentor TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // A single connection: every in-memory connection is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();
    init_schema(&pool).await.unwrap();
    pool
}
