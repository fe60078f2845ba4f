use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::types::{
    CreateRequestRequest, HeroRequestsQuery, MessageResponse, UpdateRequestRequest,
    UpdateStatusRequest,
};
use super::validation::{ValidatedJson, validate_status, validate_status_filter};
use super::{ApiError, ApiResponse, AppState};
use crate::services::CurrentUser;
use crate::services::request_service::{
    IncomingRequest, NewRequest, OutgoingRequest, Request, RequestEdit, RequestError,
};

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Validation(msg) => Self::validation(msg),
            RequestError::NotFound(msg) => Self::NotFound(msg),
            RequestError::Forbidden(msg) => Self::forbidden(msg),
            RequestError::Conflict(msg) => Self::Conflict(msg),
            RequestError::Database(msg) => Self::DatabaseError(msg),
            RequestError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /requests
pub async fn create_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateRequestRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Request>>), ApiError> {
    let request = state
        .request_service()
        .create_request(NewRequest {
            user_id: user.id,
            hero_id: payload.hero_id,
            title: payload.title,
            description: payload.description,
            location: payload.location,
            urgency: payload.urgency,
            contact_info: payload.contact_info,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(request))))
}

/// GET /requests
pub async fn list_my_requests(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<OutgoingRequest>>>, ApiError> {
    let requests = state.request_service().list_user_requests(&user.id).await?;
    Ok(Json(ApiResponse::success(requests)))
}

/// GET /requests/hero?status=
pub async fn list_hero_requests(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<HeroRequestsQuery>,
) -> Result<Json<ApiResponse<Vec<IncomingRequest>>>, ApiError> {
    let status = validate_status_filter(query.status.as_deref())?;

    let requests = state
        .request_service()
        .list_hero_requests(&user, status)
        .await?;

    Ok(Json(ApiResponse::success(requests)))
}

/// PATCH /requests/{id}/status
pub async fn update_request_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(request_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Request>>, ApiError> {
    let status = validate_status(&payload.status)?;

    let request = state
        .request_service()
        .update_request_status(&request_id, status, &user, payload.message)
        .await?;

    Ok(Json(ApiResponse::success(request)))
}

/// PUT /requests/{id}
pub async fn update_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(request_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateRequestRequest>,
) -> Result<Json<ApiResponse<Request>>, ApiError> {
    let request = state
        .request_service()
        .update_request_content(
            &request_id,
            &user.id,
            RequestEdit {
                title: payload.title,
                description: payload.description,
                location: payload.location,
                urgency: payload.urgency,
                contact_info: payload.contact_info,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(request)))
}

/// DELETE /requests/{id}
pub async fn delete_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(request_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .request_service()
        .delete_request(&request_id, &user.id)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Request deleted successfully",
    ))))
}
