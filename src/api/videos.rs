//! Video endpoints

use crate::db::models::Video;
use crate::db::videos::{self, VideoPatch};
use crate::error::{Error, Result};
use crate::youtube::resolve_video_id;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    /// YouTube URL (short or long form) or raw video id
    pub youtube_url: String,
    pub mentor_email: String,
    pub category: String,
    /// Explicit display order; computed from the (mentor, category) pair when absent
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub new_order: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /videos - register a video, enriching it from the YouTube Data API
pub async fn create_video(
    State(state): State<AppState>,
    Json(req): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Video>)> {
    let video_id = resolve_video_id(&req.youtube_url).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Could not extract a video id from '{}'",
            req.youtube_url
        ))
    })?;

    // Reject known duplicates before spending an API call; the UNIQUE
    // constraint on youtube_id still catches concurrent registrations.
    if videos::find_by_youtube_id(&state.db, &video_id).await?.is_some() {
        return Err(Error::Conflict("This video is already registered".to_string()));
    }

    let meta = state.youtube.video_metadata(&video_id).await?;

    let video = videos::create_video(
        &state.db,
        &meta,
        &req.mentor_email,
        &req.category,
        req.order,
    )
    .await?;

    info!(
        "Registered video {} ({}) for {} in '{}'",
        video.id, video.youtube_id, video.mentor_email, video.category
    );
    Ok((StatusCode::CREATED, Json(video)))
}

/// GET /videos - all videos sorted by category, then display order
pub async fn list_videos(State(state): State<AppState>) -> Result<Json<Vec<Video>>> {
    Ok(Json(videos::list_videos(&state.db).await?))
}

/// GET /videos/:id
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Video>> {
    Ok(Json(videos::get_video(&state.db, id).await?))
}

/// PUT /videos/:id - apply a partial update
pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<VideoPatch>,
) -> Result<Json<Video>> {
    Ok(Json(videos::update_video(&state.db, id, &patch).await?))
}

/// PUT /videos/:id/update_order - directly set the display order
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<Video>> {
    Ok(Json(videos::update_order(&state.db, id, req.new_order).await?))
}

/// DELETE /videos/:id - cascades to progress and reviews
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let video = videos::delete_video(&state.db, id).await?;
    info!("Deleted video {} ({})", video.id, video.youtube_id);
    Ok(Json(MessageResponse {
        message: "Video deleted".to_string(),
    }))
}
