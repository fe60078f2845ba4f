use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::db::begin_write;
use crate::entities::{heroes, request_responses, requests, users};
use crate::models::request::RequestStatus;
use crate::models::timestamp;

pub struct NewRequestRow {
    pub user_id: String,
    pub hero_id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub urgency: String,
    pub contact_info: String,
}

/// Content fields a requester may change; `None` leaves the column as is.
#[derive(Debug, Default, Clone)]
pub struct RequestContentChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub urgency: Option<String>,
    pub contact_info: Option<String>,
}

#[derive(Debug)]
pub enum ContentUpdate {
    Updated(requests::Model),
    NotFound,
    NotOwner,
    NotPending(String),
}

#[derive(Debug)]
pub enum StatusChange {
    Changed(requests::Model),
    NotFound,
    NotPending(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum RequestDelete {
    Deleted,
    NotFound,
    NotOwner,
}

pub struct RequestRepository {
    conn: DatabaseConnection,
}

impl RequestRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a request; status always starts at `pending`.
    pub async fn create(&self, row: NewRequestRow) -> Result<requests::Model> {
        let now = timestamp::now();

        let model = requests::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(row.user_id),
            hero_id: Set(row.hero_id),
            title: Set(row.title),
            description: Set(row.description),
            location: Set(row.location),
            urgency: Set(row.urgency),
            contact_info: Set(row.contact_info),
            status: Set(RequestStatus::Pending.as_str().to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert request")?;

        info!(request_id = %model.id, hero_id = %model.hero_id, "Created request");
        Ok(model)
    }

    pub async fn get(&self, id: &str) -> Result<Option<requests::Model>> {
        requests::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query request by ID")
    }

    /// Requests authored by `user_id`, newest first, joined with the hero.
    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<(requests::Model, Option<heroes::Model>)>> {
        requests::Entity::find()
            .filter(requests::Column::UserId.eq(user_id))
            .order_by_desc(requests::Column::CreatedAt)
            .order_by_desc(requests::Column::Id)
            .find_also_related(heroes::Entity)
            .all(&self.conn)
            .await
            .context("Failed to list requests for user")
    }

    /// Requests targeting `hero_id`, newest first, joined with the requester.
    pub async fn list_for_hero(
        &self,
        hero_id: &str,
        status: Option<RequestStatus>,
    ) -> Result<Vec<(requests::Model, Option<users::Model>)>> {
        let mut query = requests::Entity::find().filter(requests::Column::HeroId.eq(hero_id));

        if let Some(status) = status {
            query = query.filter(requests::Column::Status.eq(status.as_str()));
        }

        query
            .order_by_desc(requests::Column::CreatedAt)
            .order_by_desc(requests::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.conn)
            .await
            .context("Failed to list requests for hero")
    }

    /// Latest hero response per request.
    pub async fn latest_responses(
        &self,
        request_ids: &[String],
    ) -> Result<HashMap<String, request_responses::Model>> {
        if request_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = request_responses::Entity::find()
            .filter(request_responses::Column::RequestId.is_in(request_ids.iter().cloned()))
            .order_by_asc(request_responses::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to query request responses")?;

        Ok(rows
            .into_iter()
            .map(|row| (row.request_id.clone(), row))
            .collect())
    }

    /// Applies content changes when `user_id` owns the request and it is
    /// still pending.
    pub async fn update_content(
        &self,
        id: &str,
        user_id: &str,
        changes: RequestContentChanges,
    ) -> Result<ContentUpdate> {
        let txn = begin_write::<requests::Entity>(&self.conn, requests::Column::Id).await?;

        let Some(request) = requests::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(ContentUpdate::NotFound);
        };
        if request.user_id != user_id {
            return Ok(ContentUpdate::NotOwner);
        }
        if request.status != RequestStatus::Pending.as_str() {
            return Ok(ContentUpdate::NotPending(request.status));
        }

        let updated_at = timestamp::advance(&request.updated_at);

        let mut active: requests::ActiveModel = request.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(location) = changes.location {
            active.location = Set(location);
        }
        if let Some(urgency) = changes.urgency {
            active.urgency = Set(urgency);
        }
        if let Some(contact_info) = changes.contact_info {
            active.contact_info = Set(contact_info);
        }
        active.updated_at = Set(updated_at);

        let model = active.update(&txn).await?;
        txn.commit().await?;

        Ok(ContentUpdate::Updated(model))
    }

    /// Moves a pending request to `next`, recording the responder's message
    /// in the same transaction. The update is conditional on the row still
    /// being pending, so a resolved request is never moved again.
    pub async fn transition(
        &self,
        id: &str,
        next: RequestStatus,
        responder_id: &str,
        message: Option<&str>,
    ) -> Result<StatusChange> {
        let txn = begin_write::<requests::Entity>(&self.conn, requests::Column::Id).await?;

        let Some(request) = requests::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(StatusChange::NotFound);
        };

        let updated_at = timestamp::advance(&request.updated_at);

        let result = requests::Entity::update_many()
            .col_expr(requests::Column::Status, Expr::value(next.as_str()))
            .col_expr(requests::Column::UpdatedAt, Expr::value(updated_at.clone()))
            .filter(requests::Column::Id.eq(id))
            .filter(requests::Column::Status.eq(RequestStatus::Pending.as_str()))
            .exec(&txn)
            .await
            .context("Failed to update request status")?;

        if result.rows_affected == 0 {
            return Ok(StatusChange::NotPending(request.status));
        }

        if let Some(message) = message {
            request_responses::ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                request_id: Set(id.to_string()),
                responder_id: Set(responder_id.to_string()),
                status: Set(next.as_str().to_string()),
                message: Set(message.to_string()),
                created_at: Set(updated_at),
            }
            .insert(&txn)
            .await
            .context("Failed to record request response")?;
        }

        let updated = requests::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Request vanished during status update"))?;

        txn.commit().await?;

        info!(request_id = id, status = %next, responder_id, "Request resolved");
        Ok(StatusChange::Changed(updated))
    }

    /// Removes a request owned by `user_id` together with its responses.
    pub async fn delete_owned(&self, id: &str, user_id: &str) -> Result<RequestDelete> {
        let txn = begin_write::<requests::Entity>(&self.conn, requests::Column::Id).await?;

        let Some(request) = requests::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(RequestDelete::NotFound);
        };
        if request.user_id != user_id {
            return Ok(RequestDelete::NotOwner);
        }

        request_responses::Entity::delete_many()
            .filter(request_responses::Column::RequestId.eq(id))
            .exec(&txn)
            .await?;

        requests::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        info!(request_id = id, user_id, "Deleted request");
        Ok(RequestDelete::Deleted)
    }
}
