//! `SeaORM` implementation of the `RequestService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::RequestConfig;
use crate::constants::requests::{MAX_FIELD_LEN, MAX_TITLE_LEN};
use crate::db::{
    ContentUpdate, NewRequestRow, RequestContentChanges, RequestDelete, StatusChange, Store,
};
use crate::entities::heroes;
use crate::models::request::{RequestStatus, normalize_urgency};
use crate::services::auth_service::CurrentUser;
use crate::services::request_service::{
    IncomingRequest, NewRequest, OutgoingRequest, Request, RequestEdit, RequestError,
    RequestService,
};

pub struct SeaOrmRequestService {
    store: Store,
    config: RequestConfig,
}

impl SeaOrmRequestService {
    #[must_use]
    pub const fn new(store: Store, config: RequestConfig) -> Self {
        Self { store, config }
    }

    fn urgency(&self, urgency: &str) -> Result<String, RequestError> {
        normalize_urgency(urgency, &self.config.urgency_levels).map_err(RequestError::Validation)
    }

    /// Hero row linked to the caller's account. The hero flag is read from
    /// the store, not from the token, so a revoked flag takes effect at once.
    async fn linked_hero(&self, caller: &CurrentUser) -> Result<heroes::Model, RequestError> {
        let user = self
            .store
            .get_user(&caller.id)
            .await?
            .ok_or_else(|| RequestError::NotFound("User not found".to_string()))?;

        if !user.is_hero {
            return Err(RequestError::Forbidden(
                "Only hero accounts can manage incoming requests".to_string(),
            ));
        }

        self.store
            .find_hero_by_name(&user.username)
            .await?
            .ok_or_else(|| {
                RequestError::NotFound("No hero profile is linked to this account".to_string())
            })
    }
}

fn not_requested_hero() -> RequestError {
    RequestError::Forbidden("Only the requested hero can respond to this request".to_string())
}

fn required(field: &str, value: &str, max_len: usize) -> Result<String, RequestError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RequestError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(RequestError::Validation(format!(
            "{field} must be {max_len} characters or less"
        )));
    }
    Ok(trimmed.to_string())
}

fn optional(field: &str, value: Option<&str>, max_len: usize) -> Result<Option<String>, RequestError> {
    value.map(|v| required(field, v, max_len)).transpose()
}

#[async_trait]
impl RequestService for SeaOrmRequestService {
    async fn create_request(&self, request: NewRequest) -> Result<Request, RequestError> {
        let row = NewRequestRow {
            title: required("title", &request.title, MAX_TITLE_LEN)?,
            description: required("description", &request.description, MAX_FIELD_LEN)?,
            location: required("location", &request.location, MAX_FIELD_LEN)?,
            urgency: self.urgency(&request.urgency)?,
            contact_info: required("contact_info", &request.contact_info, MAX_FIELD_LEN)?,
            user_id: request.user_id,
            hero_id: request.hero_id,
        };

        if self.store.get_hero(&row.hero_id).await?.is_none() {
            return Err(RequestError::NotFound("Hero not found".to_string()));
        }
        if self.store.get_user(&row.user_id).await?.is_none() {
            return Err(RequestError::NotFound("User not found".to_string()));
        }

        let model = self.store.create_request(row).await?;
        Ok(Request::from(model))
    }

    async fn list_user_requests(
        &self,
        user_id: &str,
    ) -> Result<Vec<OutgoingRequest>, RequestError> {
        let rows = self.store.list_requests_for_user(user_id).await?;
        let ids: Vec<String> = rows.iter().map(|(r, _)| r.id.clone()).collect();
        let mut responses = self.store.latest_request_responses(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|(request, hero)| {
                let response = responses.remove(&request.id);
                OutgoingRequest::new(request, hero, response)
            })
            .collect())
    }

    async fn list_hero_requests(
        &self,
        caller: &CurrentUser,
        status: Option<RequestStatus>,
    ) -> Result<Vec<IncomingRequest>, RequestError> {
        let hero = self.linked_hero(caller).await?;

        let rows = self.store.list_requests_for_hero(&hero.id, status).await?;
        let ids: Vec<String> = rows.iter().map(|(r, _)| r.id.clone()).collect();
        let mut responses = self.store.latest_request_responses(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|(request, requester)| {
                let response = responses.remove(&request.id);
                IncomingRequest::new(request, requester, response)
            })
            .collect())
    }

    async fn update_request_status(
        &self,
        request_id: &str,
        status: RequestStatus,
        caller: &CurrentUser,
        message: Option<String>,
    ) -> Result<Request, RequestError> {
        if !status.is_terminal() {
            return Err(RequestError::Validation(
                "Status must be 'accepted' or 'rejected'".to_string(),
            ));
        }

        let message = match message.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(text) => Some(required("message", text, MAX_FIELD_LEN)?),
        };

        let request = self
            .store
            .get_request(request_id)
            .await?
            .ok_or_else(|| RequestError::NotFound("Request not found".to_string()))?;

        // Without a linked hero the caller cannot be the addressed hero.
        let hero = self.linked_hero(caller).await.map_err(|err| match err {
            RequestError::NotFound(_) => not_requested_hero(),
            other => other,
        })?;
        if hero.id != request.hero_id {
            warn!(
                request_id,
                caller_id = %caller.id,
                "Rejected status change by a hero the request is not addressed to"
            );
            return Err(not_requested_hero());
        }

        match self
            .store
            .transition_request(request_id, status, &caller.id, message.as_deref())
            .await?
        {
            StatusChange::Changed(model) => Ok(Request::from(model)),
            StatusChange::NotFound => Err(RequestError::NotFound("Request not found".to_string())),
            StatusChange::NotPending(current) => Err(RequestError::Conflict(format!(
                "Request is already {current}"
            ))),
        }
    }

    async fn update_request_content(
        &self,
        request_id: &str,
        user_id: &str,
        edit: RequestEdit,
    ) -> Result<Request, RequestError> {
        let changes = RequestContentChanges {
            title: optional("title", edit.title.as_deref(), MAX_TITLE_LEN)?,
            description: optional("description", edit.description.as_deref(), MAX_FIELD_LEN)?,
            location: optional("location", edit.location.as_deref(), MAX_FIELD_LEN)?,
            urgency: edit.urgency.as_deref().map(|u| self.urgency(u)).transpose()?,
            contact_info: optional("contact_info", edit.contact_info.as_deref(), MAX_FIELD_LEN)?,
        };

        if changes.title.is_none()
            && changes.description.is_none()
            && changes.location.is_none()
            && changes.urgency.is_none()
            && changes.contact_info.is_none()
        {
            return Err(RequestError::Validation(
                "Provide at least one field to update".to_string(),
            ));
        }

        match self
            .store
            .update_request_content(request_id, user_id, changes)
            .await?
        {
            ContentUpdate::Updated(model) => {
                info!(request_id, user_id, "Updated request content");
                Ok(Request::from(model))
            }
            ContentUpdate::NotFound => Err(RequestError::NotFound("Request not found".to_string())),
            ContentUpdate::NotOwner => Err(RequestError::Forbidden(
                "You can only edit your own requests".to_string(),
            )),
            ContentUpdate::NotPending(current) => Err(RequestError::Conflict(format!(
                "Request is already {current} and can no longer be edited"
            ))),
        }
    }

    async fn delete_request(&self, request_id: &str, user_id: &str) -> Result<(), RequestError> {
        match self.store.delete_owned_request(request_id, user_id).await? {
            RequestDelete::Deleted => Ok(()),
            RequestDelete::NotFound => Err(RequestError::NotFound("Request not found".to_string())),
            RequestDelete::NotOwner => Err(RequestError::Forbidden(
                "You can only delete your own requests".to_string(),
            )),
        }
    }
}
