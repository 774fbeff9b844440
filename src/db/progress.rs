//! Watch-progress tracking
//!
//! One row per (video, mentee) pair, enforced by a UNIQUE constraint. The
//! `watched` column is a counter bumped by 1 on every tracking call.

use crate::db::models::Progress;
use crate::db::videos;
use crate::error::Result;
use sqlx::SqlitePool;

/// Record one watch event for a mentee on a video.
///
/// Creates the row with watched = 1 on first call, increments in place after
/// that. Fails with NotFound when the video does not exist.
pub async fn track_progress(
    pool: &SqlitePool,
    video_id: i64,
    mentee_email: &str,
) -> Result<Progress> {
    // 404 beats a foreign-key error for a missing video
    videos::get_video(pool, video_id).await?;

    sqlx::query(
        r#"
        INSERT INTO progress (video_id, mentee_email, watched)
        VALUES (?, ?, 1)
        ON CONFLICT(video_id, mentee_email) DO UPDATE SET watched = watched + 1
        "#,
    )
    .bind(video_id)
    .bind(mentee_email)
    .execute(pool)
    .await?;

    let progress = sqlx::query_as::<_, Progress>(
        "SELECT * FROM progress WHERE video_id = ? AND mentee_email = ?",
    )
    .bind(video_id)
    .bind(mentee_email)
    .fetch_one(pool)
    .await?;

    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::db::videos::create_video;
    use crate::error::Error;
    use crate::youtube::VideoMetadata;

    async fn seed_video(pool: &SqlitePool) -> i64 {
        let meta = VideoMetadata {
            video_id: "abc123".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            publication_date: "2024-03-01T12:00:00Z".to_string(),
            views: 0,
            likes: 0,
        };
        create_video(pool, &meta, "m@x.com", "rust", None)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_first_call_creates_with_watched_one() {
        let pool = test_pool().await;
        let video_id = seed_video(&pool).await;

        let progress = track_progress(&pool, video_id, "mentee@x.com")
            .await
            .unwrap();
        assert_eq!(progress.watched, 1);
    }

    #[tokio::test]
    async fn test_repeat_call_increments_same_row() {
        let pool = test_pool().await;
        let video_id = seed_video(&pool).await;

        track_progress(&pool, video_id, "mentee@x.com").await.unwrap();
        let progress = track_progress(&pool, video_id, "mentee@x.com")
            .await
            .unwrap();

        assert_eq!(progress.watched, 2);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM progress")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_separate_mentees_get_separate_rows() {
        let pool = test_pool().await;
        let video_id = seed_video(&pool).await;

        track_progress(&pool, video_id, "a@x.com").await.unwrap();
        track_progress(&pool, video_id, "b@x.com").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM progress")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_missing_video_not_found() {
        let pool = test_pool().await;
        let err = track_progress(&pool, 99, "mentee@x.com").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
