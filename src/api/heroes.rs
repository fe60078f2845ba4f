use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::types::ReviewPageQuery;
use super::validation::{validate_limit, validate_offset};
use super::{ApiError, ApiResponse, AppState};
use crate::services::HeroSummary;
use crate::services::hero_service::HeroError;
use crate::services::review_service::HeroReviewPage;

impl From<HeroError> for ApiError {
    fn from(err: HeroError) -> Self {
        match err {
            HeroError::NotFound => Self::NotFound(err.to_string()),
            HeroError::Database(msg) => Self::DatabaseError(msg),
            HeroError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /heroes
pub async fn list_heroes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<HeroSummary>>>, ApiError> {
    let heroes = state.hero_service().list_heroes().await?;
    Ok(Json(ApiResponse::success(heroes)))
}

/// GET /heroes/{hero_id}
pub async fn get_hero(
    State(state): State<Arc<AppState>>,
    Path(hero_id): Path<String>,
) -> Result<Json<ApiResponse<HeroSummary>>, ApiError> {
    let hero = state.hero_service().get_hero(&hero_id).await?;
    Ok(Json(ApiResponse::success(hero)))
}

/// GET /heroes/{hero_id}/reviews?limit&offset
pub async fn list_hero_reviews(
    State(state): State<Arc<AppState>>,
    Path(hero_id): Path<String>,
    Query(query): Query<ReviewPageQuery>,
) -> Result<Json<ApiResponse<HeroReviewPage>>, ApiError> {
    let limit = validate_limit(query.limit, state.config().reviews.max_page_size)?;
    let offset = validate_offset(query.offset)?;

    let page = state
        .review_service()
        .list_reviews_for_hero(&hero_id, limit, offset)
        .await?;

    Ok(Json(ApiResponse::success(page)))
}
