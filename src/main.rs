//! elimu-backend - mentorship video-tracking service
//!
//! Mentors register YouTube videos under categories; mentees track watch
//! progress and leave star ratings. Configuration comes from flags or the
//! environment; a missing YOUTUBE_API_KEY aborts startup.

use anyhow::Result;
use clap::Parser;
use elimu_backend::config::Config;
use elimu_backend::youtube::YouTubeClient;
use elimu_backend::{build_router, db, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting elimu-backend v{}", env!("CARGO_PKG_VERSION"));

    // clap refuses to start without YOUTUBE_API_KEY
    let config = Config::parse();

    let pool = db::connect(&config).await?;
    let youtube = YouTubeClient::new(config.youtube_api_key.clone())?;

    let state = AppState::new(pool, youtube);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("elimu-backend listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
