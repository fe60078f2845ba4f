//! Domain service for assistance requests.
//!
//! Requesters own the content of their requests; the targeted hero owns the
//! status, which moves once from `pending` to `accepted` or `rejected`.

use serde::Serialize;
use thiserror::Error;

use crate::entities::{heroes, request_responses, requests, users};
use crate::models::request::RequestStatus;
use crate::services::auth_service::CurrentUser;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for RequestError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for RequestError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub id: String,
    pub user_id: String,
    pub hero_id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub urgency: String,
    pub contact_info: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<requests::Model> for Request {
    fn from(model: requests::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            hero_id: model.hero_id,
            title: model.title,
            description: model.description,
            location: model.location,
            urgency: model.urgency,
            contact_info: model.contact_info,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// The hero's note attached to a status change.
#[derive(Debug, Clone, Serialize)]
pub struct HeroResponse {
    pub responder_id: String,
    pub status: String,
    pub message: String,
    pub created_at: String,
}

impl From<request_responses::Model> for HeroResponse {
    fn from(model: request_responses::Model) -> Self {
        Self {
            responder_id: model.responder_id,
            status: model.status,
            message: model.message,
            created_at: model.created_at,
        }
    }
}

/// A request as seen by its author.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingRequest {
    #[serde(flatten)]
    pub request: Request,
    pub hero_name: Option<String>,
    pub hero_image: Option<String>,
    pub hero_response: Option<HeroResponse>,
}

impl OutgoingRequest {
    #[must_use]
    pub fn new(
        request: requests::Model,
        hero: Option<heroes::Model>,
        response: Option<request_responses::Model>,
    ) -> Self {
        let (hero_name, hero_image) = match hero {
            Some(hero) => (Some(hero.name), hero.image),
            None => (None, None),
        };
        Self {
            request: Request::from(request),
            hero_name,
            hero_image,
            hero_response: response.map(HeroResponse::from),
        }
    }
}

/// A request as seen by the targeted hero.
#[derive(Debug, Clone, Serialize)]
pub struct IncomingRequest {
    #[serde(flatten)]
    pub request: Request,
    pub requester_username: Option<String>,
    pub hero_response: Option<HeroResponse>,
}

impl IncomingRequest {
    #[must_use]
    pub fn new(
        request: requests::Model,
        requester: Option<users::Model>,
        response: Option<request_responses::Model>,
    ) -> Self {
        Self {
            request: Request::from(request),
            requester_username: requester.map(|u| u.username),
            hero_response: response.map(HeroResponse::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewRequest {
    pub user_id: String,
    pub hero_id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub urgency: String,
    pub contact_info: String,
}

/// Content fields a requester may change; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct RequestEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub urgency: Option<String>,
    pub contact_info: Option<String>,
}

#[async_trait::async_trait]
pub trait RequestService: Send + Sync {
    /// Files a new request; its status always starts at `pending`.
    ///
    /// # Errors
    ///
    /// [`RequestError::Validation`] for blank fields or an unknown urgency,
    /// [`RequestError::NotFound`] when the hero does not exist.
    async fn create_request(&self, request: NewRequest) -> Result<Request, RequestError>;

    /// Requests authored by `user_id`, newest first.
    async fn list_user_requests(&self, user_id: &str)
    -> Result<Vec<OutgoingRequest>, RequestError>;

    /// Requests addressed to the caller's hero profile, newest first.
    ///
    /// # Errors
    ///
    /// [`RequestError::Forbidden`] when the caller is not a hero account.
    async fn list_hero_requests(
        &self,
        caller: &CurrentUser,
        status: Option<RequestStatus>,
    ) -> Result<Vec<IncomingRequest>, RequestError>;

    /// Accepts or rejects a pending request addressed to the caller.
    ///
    /// # Errors
    ///
    /// [`RequestError::Forbidden`] when the caller is not the targeted hero,
    /// [`RequestError::Conflict`] when the request is already resolved.
    async fn update_request_status(
        &self,
        request_id: &str,
        status: RequestStatus,
        caller: &CurrentUser,
        message: Option<String>,
    ) -> Result<Request, RequestError>;

    /// # Errors
    ///
    /// [`RequestError::Forbidden`] when `user_id` is not the author,
    /// [`RequestError::Conflict`] once the request is resolved.
    async fn update_request_content(
        &self,
        request_id: &str,
        user_id: &str,
        edit: RequestEdit,
    ) -> Result<Request, RequestError>;

    /// Deletes the request and its hero responses.
    async fn delete_request(&self, request_id: &str, user_id: &str) -> Result<(), RequestError>;
}
