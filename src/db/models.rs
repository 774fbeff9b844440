//! Database row models
//!
//! These are the shapes serialized straight back to API clients. Association
//! between users and videos/progress/reviews is by email string only; there is
//! no foreign key from those tables into users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered YouTube video owned by a mentor within a category
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: i64,
    /// External YouTube video id (unique)
    pub youtube_id: String,
    pub mentor_email: String,
    pub category: String,
    /// Display rank within the (mentor, category) grouping
    #[serde(rename = "order")]
    pub display_order: i64,
    pub title: String,
    pub description: String,
    pub publication_date: DateTime<Utc>,
    pub views: i64,
    pub likes: i64,
    /// Mean of all review stars, recomputed on every review insert
    pub average_rating: f64,
}

/// One mentee's watch counter for one video.
///
/// `watched` is incremented by 1 per tracking call; it is a counter, not a
/// percentage or duration.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Progress {
    pub id: i64,
    pub video_id: i64,
    pub mentee_email: String,
    pub watched: i64,
}

/// One mentee's star rating and optional comment for one video
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub video_id: i64,
    pub mentee_email: String,
    pub stars: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A platform account (mentor or mentee)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub logged_in: bool,
    pub picture: String,
    pub track: String,
    pub mentor: String,
    pub created_at: DateTime<Utc>,
}
