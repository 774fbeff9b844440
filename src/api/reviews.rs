//! Review endpoints

use crate::db::models::Review;
use crate::db::reviews::{self, NewReview};
use crate::error::Result;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;

/// POST /reviews - add a review and refresh the video's average rating
pub async fn create_review(
    State(state): State<AppState>,
    Json(review): Json<NewReview>,
) -> Result<Json<Review>> {
    Ok(Json(reviews::add_review(&state.db, &review).await?))
}

/// GET /reviews/:video_id - all reviews for a video
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(video_id): Path<i64>,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(reviews::reviews_for_video(&state.db, video_id).await?))
}

/// GET /videos/:id/rating - mean star rating, 0 when unreviewed
pub async fn video_rating(
    State(state): State<AppState>,
    Path(video_id): Path<i64>,
) -> Result<Json<f64>> {
    Ok(Json(reviews::average_rating(&state.db, video_id).await?))
}
