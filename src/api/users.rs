use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::services::auth_service::PublicUser;
use crate::services::review_service::UserReview;
use crate::services::{CurrentUser, UserInfo};

#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub user: UserInfo,
    pub reviews: Vec<UserReview>,
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PublicUser>>>, ApiError> {
    let users = state.auth_service().list_users().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// GET /users/{id}
///
/// Only the caller's own profile is visible; it includes their reviews.
pub async fn get_user_profile(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CurrentUser>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserProfileResponse>>, ApiError> {
    let user = state.auth_service().get_profile(&caller, &user_id).await?;
    let reviews = state.review_service().list_user_reviews(&user.id).await?;

    Ok(Json(ApiResponse::success(UserProfileResponse {
        user,
        reviews,
    })))
}
