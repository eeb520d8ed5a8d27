use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Rating, RecommendationSet},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub max_per_genre: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub user_id: Option<String>,
    pub total_ratings: usize,
    pub recommendations: RecommendationSet,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let max_per_genre = request
        .max_per_genre
        .unwrap_or_else(|| state.engine.max_per_genre());
    if max_per_genre == 0 {
        return Err(AppError::InvalidInput(
            "max_per_genre must be at least 1".to_string(),
        ));
    }

    tracing::info!(
        user_id = request.user_id.as_deref().unwrap_or("anonymous"),
        ratings = request.ratings.len(),
        max_per_genre,
        "Processing recommendation request"
    );

    let recommendations = state
        .engine
        .get_recommendations_with_cap(&request.ratings, max_per_genre)
        .await;

    Ok(Json(RecommendationResponse {
        total_ratings: request.ratings.len(),
        user_id: request.user_id,
        recommendations,
    }))
}
