use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::info;

use crate::db::begin_write;
use crate::entities::{heroes, reviews, users};
use crate::models::timestamp;

/// Outcome of [`ReviewRepository::upsert`].
#[derive(Debug)]
pub enum ReviewWrite {
    Created(reviews::Model),
    Updated(reviews::Model),
    MissingHero,
    MissingUser,
}

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts or overwrites the single review of `user_id` for `hero_id`.
    ///
    /// Existence checks, the lookup and the write share one transaction that
    /// holds the write lock throughout, so concurrent submissions for the same
    /// pair run one after another: the first inserts, the rest update. The
    /// write is still an `ON CONFLICT (hero_id, user_id) DO UPDATE` so the
    /// unique index decides the outcome.
    pub async fn upsert(
        &self,
        hero_id: &str,
        user_id: &str,
        rating: i32,
        review_text: &str,
    ) -> Result<ReviewWrite> {
        let txn = begin_write::<reviews::Entity>(&self.conn, reviews::Column::Id).await?;

        if heroes::Entity::find_by_id(hero_id).one(&txn).await?.is_none() {
            return Ok(ReviewWrite::MissingHero);
        }
        if users::Entity::find_by_id(user_id).one(&txn).await?.is_none() {
            return Ok(ReviewWrite::MissingUser);
        }

        let existing = reviews::Entity::find()
            .filter(reviews::Column::HeroId.eq(hero_id))
            .filter(reviews::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        let (created_at, updated_at) = match &existing {
            Some(review) => (review.created_at.clone(), timestamp::advance(&review.updated_at)),
            None => {
                let now = timestamp::now();
                (now.clone(), now)
            }
        };

        let model = reviews::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            hero_id: Set(hero_id.to_string()),
            user_id: Set(user_id.to_string()),
            rating: Set(rating),
            review_text: Set(review_text.to_string()),
            created_at: Set(created_at),
            updated_at: Set(updated_at),
        };

        reviews::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([reviews::Column::HeroId, reviews::Column::UserId])
                    .update_columns([
                        reviews::Column::Rating,
                        reviews::Column::ReviewText,
                        reviews::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .context("Failed to upsert review")?;

        let saved = reviews::Entity::find()
            .filter(reviews::Column::HeroId.eq(hero_id))
            .filter(reviews::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Review vanished after upsert"))?;

        txn.commit().await?;

        // New rows carry identical timestamps; updates always advance.
        if saved.updated_at != saved.created_at {
            info!(review_id = %saved.id, hero_id, user_id, "Updated review");
            Ok(ReviewWrite::Updated(saved))
        } else {
            info!(review_id = %saved.id, hero_id, user_id, "Created review");
            Ok(ReviewWrite::Created(saved))
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<reviews::Model>> {
        reviews::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query review by ID")
    }

    /// Newest first, joined with the author.
    pub async fn list_for_hero(
        &self,
        hero_id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<(reviews::Model, Option<users::Model>)>> {
        reviews::Entity::find()
            .filter(reviews::Column::HeroId.eq(hero_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .limit(limit)
            .offset(offset)
            .find_also_related(users::Entity)
            .all(&self.conn)
            .await
            .context("Failed to list reviews for hero")
    }

    /// `(rating, count)` over every review of the hero.
    pub async fn rating_counts(&self, hero_id: &str) -> Result<Vec<(i32, i64)>> {
        reviews::Entity::find()
            .select_only()
            .column(reviews::Column::Rating)
            .column_as(Expr::col(reviews::Column::Id).count(), "count")
            .filter(reviews::Column::HeroId.eq(hero_id))
            .group_by(reviews::Column::Rating)
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to aggregate review ratings")
    }

    pub async fn count_for_hero(&self, hero_id: &str) -> Result<u64> {
        reviews::Entity::find()
            .filter(reviews::Column::HeroId.eq(hero_id))
            .count(&self.conn)
            .await
            .context("Failed to count reviews for hero")
    }

    /// Newest first, joined with the reviewed hero.
    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<(reviews::Model, Option<heroes::Model>)>> {
        reviews::Entity::find()
            .filter(reviews::Column::UserId.eq(user_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .find_also_related(heroes::Entity)
            .all(&self.conn)
            .await
            .context("Failed to list reviews for user")
    }

    /// Updates rating and/or text of a review owned by `user_id`. `None` when
    /// no review matches both the id and the owner.
    pub async fn update_owned(
        &self,
        id: &str,
        user_id: &str,
        rating: Option<i32>,
        review_text: Option<&str>,
    ) -> Result<Option<reviews::Model>> {
        let txn = begin_write::<reviews::Entity>(&self.conn, reviews::Column::Id).await?;

        let Some(review) = reviews::Entity::find_by_id(id)
            .filter(reviews::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let updated_at = timestamp::advance(&review.updated_at);

        let mut active: reviews::ActiveModel = review.into();
        if let Some(rating) = rating {
            active.rating = Set(rating);
        }
        if let Some(text) = review_text {
            active.review_text = Set(text.to_string());
        }
        active.updated_at = Set(updated_at);

        let model = active.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(model))
    }

    /// Deletes only when `user_id` owns the review.
    pub async fn delete_owned(&self, id: &str, user_id: &str) -> Result<bool> {
        let result = reviews::Entity::delete_many()
            .filter(reviews::Column::Id.eq(id))
            .filter(reviews::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete review")?;

        let removed = result.rows_affected > 0;
        if removed {
            info!(review_id = id, user_id, "Deleted review");
        }
        Ok(removed)
    }
}
