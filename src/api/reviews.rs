use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::types::{MessageResponse, SubmitReviewRequest, UpdateReviewRequest};
use super::validation::ValidatedJson;
use super::{ApiError, ApiResponse, AppState};
use crate::services::CurrentUser;
use crate::services::review_service::{
    Review, ReviewChanges, ReviewError, ReviewSubmission, SubmittedReview,
};

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Validation(msg) => Self::validation(msg),
            ReviewError::NotFound(msg) => Self::NotFound(msg),
            ReviewError::Database(msg) => Self::DatabaseError(msg),
            ReviewError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /reviews
///
/// Creates the caller's review of a hero, or overwrites the existing one.
/// Answers 201 for a new review and 200 for an overwrite.
pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubmittedReview>>), ApiError> {
    if let Some(claimed) = payload.user_id.as_deref()
        && claimed != user.id
    {
        return Err(ApiError::forbidden("Cannot submit a review as another user"));
    }

    let submitted = state
        .review_service()
        .submit_review(ReviewSubmission {
            hero_id: payload.hero_id,
            user_id: user.id,
            rating: payload.rating,
            review_text: payload.review_text,
        })
        .await?;

    let status = if submitted.is_update {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((status, Json(ApiResponse::success(submitted))))
}

/// PUT /reviews/{id}
pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(review_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateReviewRequest>,
) -> Result<Json<ApiResponse<Review>>, ApiError> {
    let review = state
        .review_service()
        .update_review(
            &review_id,
            &user.id,
            ReviewChanges {
                rating: payload.rating,
                review_text: payload.review_text,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(review)))
}

/// DELETE /reviews/{id}
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(review_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .review_service()
        .delete_review(&review_id, &user.id)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Review deleted successfully",
    ))))
}
