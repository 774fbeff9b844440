//! Watch-progress endpoint

use crate::db::models::Progress;
use crate::db::progress;
use crate::error::Result;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TrackProgressRequest {
    pub video_id: i64,
    pub mentee_email: String,
}

/// POST /progress - bump the watch counter for a (video, mentee) pair
pub async fn track_progress(
    State(state): State<AppState>,
    Json(req): Json<TrackProgressRequest>,
) -> Result<Json<Progress>> {
    let progress = progress::track_progress(&state.db, req.video_id, &req.mentee_email).await?;
    Ok(Json(progress))
}
