//! Elimu backend library
//!
//! Mentors register YouTube videos under categories, mentees track watch
//! progress and leave star ratings, and basic user records are kept. Handlers
//! are a thin mapping from HTTP verb+path to the db layer; the YouTube Data
//! API is called once per video registration to fill in metadata.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::http::Method;
use axum::routing::{get, post, put};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod youtube;

use config::Config;
use youtube::YouTubeClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// YouTube Data API client
    pub youtube: YouTubeClient,
}

impl AppState {
    pub fn new(db: SqlitePool, youtube: YouTubeClient) -> Self {
        Self { db, youtube }
    }
}

/// Build the application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route(
            "/videos",
            post(api::videos::create_video).get(api::videos::list_videos),
        )
        .route(
            "/videos/:id",
            get(api::videos::get_video)
                .put(api::videos::update_video)
                .delete(api::videos::delete_video),
        )
        .route("/videos/:id/update_order", put(api::videos::update_order))
        .route("/videos/:id/rating", get(api::reviews::video_rating))
        .route("/progress", post(api::progress::track_progress))
        .route("/reviews", post(api::reviews::create_review))
        .route("/reviews/:video_id", get(api::reviews::list_reviews))
        .route(
            "/users",
            post(api::users::create_user).get(api::users::list_users),
        )
        .route(
            "/users/:id",
            get(api::users::get_user)
                .put(api::users::update_user)
                .delete(api::users::delete_user),
        )
        .route("/health", get(api::health))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy: explicit allow-list in production, permissive when the list
/// is empty (development)
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring unparseable CORS origin: {}", o);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true)
    }
}
