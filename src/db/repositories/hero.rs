use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::{heroes, reviews};

/// Review count and rating sum for one hero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingSummary {
    pub review_count: i64,
    pub rating_sum: i64,
}

pub struct HeroRepository {
    conn: DatabaseConnection,
}

impl HeroRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: &str) -> Result<Option<heroes::Model>> {
        heroes::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query hero by ID")
    }

    pub async fn list(&self) -> Result<Vec<heroes::Model>> {
        heroes::Entity::find()
            .order_by_asc(heroes::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list heroes")
    }

    /// Case-insensitive lookup used to link hero accounts to hero rows.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<heroes::Model>> {
        find_by_name_on(&self.conn, name).await
    }

    pub async fn rating_summaries(&self) -> Result<HashMap<String, RatingSummary>> {
        let rows: Vec<(String, i64, i64)> = reviews::Entity::find()
            .select_only()
            .column(reviews::Column::HeroId)
            .column_as(Expr::col(reviews::Column::Id).count(), "review_count")
            .column_as(Expr::col(reviews::Column::Rating).sum(), "rating_sum")
            .group_by(reviews::Column::HeroId)
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to aggregate hero ratings")?;

        Ok(rows
            .into_iter()
            .map(|(hero_id, review_count, rating_sum)| {
                (
                    hero_id,
                    RatingSummary {
                        review_count,
                        rating_sum,
                    },
                )
            })
            .collect())
    }
}

pub async fn find_by_name_on<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<heroes::Model>> {
    heroes::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(heroes::Column::Name))).eq(name.to_lowercase()))
        .one(conn)
        .await
        .context("Failed to query hero by name")
}
