//! Reviews and average-rating maintenance

use crate::db::models::Review;
use crate::db::videos;
use crate::error::{Error, Result};
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;

/// Incoming review payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub video_id: i64,
    pub mentee_email: String,
    pub stars: i64,
    pub comment: Option<String>,
}

/// Insert a review and recompute the owning video's average rating.
///
/// At most one review per (video, mentee) pair; the UNIQUE constraint turns a
/// repeat into Conflict. Insert and recompute happen in one transaction so the
/// stored average never drifts from the review rows.
pub async fn add_review(pool: &SqlitePool, review: &NewReview) -> Result<Review> {
    if !(1..=5).contains(&review.stars) {
        return Err(Error::InvalidInput(
            "stars must be between 1 and 5".to_string(),
        ));
    }

    videos::get_video(pool, review.video_id).await?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO reviews (video_id, mentee_email, stars, comment, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(review.video_id)
    .bind(&review.mentee_email)
    .bind(review.stars)
    .bind(&review.comment)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await
    .map_err(|e| Error::conflict_on_unique(e, "You have already reviewed this video"))?;
    let review_id = result.last_insert_rowid();

    let average: f64 = sqlx::query_scalar("SELECT AVG(stars) FROM reviews WHERE video_id = ?")
        .bind(review.video_id)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query("UPDATE videos SET average_rating = ? WHERE id = ?")
        .bind(round2(average))
        .bind(review.video_id)
        .execute(&mut *tx)
        .await?;

    let inserted = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
        .bind(review_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(inserted)
}

/// All reviews for a video (empty when the video has none or does not exist)
pub async fn reviews_for_video(pool: &SqlitePool, video_id: i64) -> Result<Vec<Review>> {
    Ok(
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE video_id = ?")
            .bind(video_id)
            .fetch_all(pool)
            .await?,
    )
}

/// Mean of all review stars for a video, rounded to 2 decimals; 0 with no
/// reviews. NotFound when the video itself is absent.
pub async fn average_rating(pool: &SqlitePool, video_id: i64) -> Result<f64> {
    videos::get_video(pool, video_id).await?;

    let average: Option<f64> =
        sqlx::query_scalar("SELECT AVG(stars) FROM reviews WHERE video_id = ?")
            .bind(video_id)
            .fetch_one(pool)
            .await?;

    Ok(average.map(round2).unwrap_or(0.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
