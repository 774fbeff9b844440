//! Video queries and mutations

use crate::db::models::Video;
use crate::error::{Error, Result};
use crate::youtube::VideoMetadata;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;

/// Partial update for a video: only `Some` fields are applied.
///
/// Unlike the dynamic merge this replaces, an explicit empty string is a real
/// value and clears the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Insert a new video from fetched metadata.
///
/// When `order` is not supplied it becomes one past the current maximum for
/// the (mentor, category) pair, or 1 for a fresh pair. A duplicate youtube_id
/// trips the UNIQUE constraint and surfaces as Conflict.
pub async fn create_video(
    pool: &SqlitePool,
    meta: &VideoMetadata,
    mentor_email: &str,
    category: &str,
    order: Option<i64>,
) -> Result<Video> {
    let display_order = match order {
        Some(o) => o,
        None => next_display_order(pool, mentor_email, category).await?,
    };

    let publication_date = parse_publication_date(&meta.publication_date);

    let result = sqlx::query(
        r#"
        INSERT INTO videos
            (youtube_id, mentor_email, category, display_order,
             title, description, publication_date, views, likes, average_rating)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
        "#,
    )
    .bind(&meta.video_id)
    .bind(mentor_email)
    .bind(category)
    .bind(display_order)
    .bind(&meta.title)
    .bind(&meta.description)
    .bind(publication_date)
    .bind(meta.views)
    .bind(meta.likes)
    .execute(pool)
    .await
    .map_err(|e| Error::conflict_on_unique(e, "This video is already registered"))?;

    get_video(pool, result.last_insert_rowid()).await
}

fn parse_publication_date(raw: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(_) => {
            warn!("Unparseable publication date '{}', using current time", raw);
            Utc::now()
        }
    }
}

/// Next display order for a (mentor, category) pair: MAX + 1, or 1 when empty
pub async fn next_display_order(
    pool: &SqlitePool,
    mentor_email: &str,
    category: &str,
) -> Result<i64> {
    let max: Option<i64> = sqlx::query_scalar(
        "SELECT MAX(display_order) FROM videos WHERE mentor_email = ? AND category = ?",
    )
    .bind(mentor_email)
    .bind(category)
    .fetch_one(pool)
    .await?;

    Ok(max.unwrap_or(0) + 1)
}

pub async fn get_video(pool: &SqlitePool, video_id: i64) -> Result<Video> {
    sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = ?")
        .bind(video_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Video {} not found", video_id)))
}

/// Look up a video by its external YouTube id.
///
/// Used by the create handler to reject duplicates before spending an API
/// call; the UNIQUE constraint remains authoritative against races.
pub async fn find_by_youtube_id(pool: &SqlitePool, youtube_id: &str) -> Result<Option<Video>> {
    Ok(
        sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE youtube_id = ?")
            .bind(youtube_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// All videos ordered for display: by category, then display order
pub async fn list_videos(pool: &SqlitePool) -> Result<Vec<Video>> {
    Ok(
        sqlx::query_as::<_, Video>("SELECT * FROM videos ORDER BY category, display_order")
            .fetch_all(pool)
            .await?,
    )
}

/// Apply a typed patch to a video; fields left as None are untouched
pub async fn update_video(pool: &SqlitePool, video_id: i64, patch: &VideoPatch) -> Result<Video> {
    // Existence check first so an empty patch still 404s correctly
    let current = get_video(pool, video_id).await?;

    let title = patch.title.as_deref().unwrap_or(&current.title);
    let description = patch.description.as_deref().unwrap_or(&current.description);
    let category = patch.category.as_deref().unwrap_or(&current.category);

    sqlx::query("UPDATE videos SET title = ?, description = ?, category = ? WHERE id = ?")
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(video_id)
        .execute(pool)
        .await?;

    get_video(pool, video_id).await
}

/// Directly set a video's display order
pub async fn update_order(pool: &SqlitePool, video_id: i64, new_order: i64) -> Result<Video> {
    let result = sqlx::query("UPDATE videos SET display_order = ? WHERE id = ?")
        .bind(new_order)
        .bind(video_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Video {} not found", video_id)));
    }

    get_video(pool, video_id).await
}

/// Delete a video, cascading to its progress and review rows.
///
/// Returns the row's last known state.
pub async fn delete_video(pool: &SqlitePool, video_id: i64) -> Result<Video> {
    let video = get_video(pool, video_id).await?;

    sqlx::query("DELETE FROM videos WHERE id = ?")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(video)
}
