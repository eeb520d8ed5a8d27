use std::{sync::Arc, time::Duration};

use anime_recs_api::{
    config::Config,
    routes::{cors_layer, create_router, AppState},
    services::{AniListClient, RecommendationEngine},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("anime_recs_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let graph = AniListClient::new(
        config.anilist_api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let engine = RecommendationEngine::new(Arc::new(graph)).with_max_per_genre(config.max_per_genre);

    let app = create_router(Arc::new(AppState::new(engine)))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
