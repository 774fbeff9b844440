//! User endpoints

use crate::db::models::User;
use crate::db::users::{self, NewUser, UserPatch};
use crate::error::Result;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

/// POST /users - create an account; duplicate emails are rejected
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    let user = users::create_user(&state.db, &user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(users::list_users(&state.db).await?))
}

/// GET /users/:id
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<User>> {
    Ok(Json(users::get_user(&state.db, id).await?))
}

/// PUT /users/:id - apply a partial update
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>> {
    Ok(Json(users::update_user(&state.db, id, &patch).await?))
}

/// DELETE /users/:id - returns the deleted record
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>> {
    Ok(Json(users::delete_user(&state.db, id).await?))
}
